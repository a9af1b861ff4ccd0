use crate::core::scoring::{calculate_match_score, finalize_score};
use crate::models::{CatalogGift, RecipientProfile, ScoredGift, ScoringWeights};

/// Ranks catalog gifts for a recipient profile
///
/// Every catalog entry is scored and returned exactly once. Results are
/// sorted by match score, highest first; entries with equal scores keep
/// their catalog order. Scoring has no randomness, so identical inputs
/// always produce identical rankings.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn rank(&self, profile: &RecipientProfile, catalog: &[CatalogGift]) -> Vec<ScoredGift> {
        let mut scored: Vec<ScoredGift> = catalog
            .iter()
            .map(|gift| {
                let (raw, matched_tags) = calculate_match_score(profile, gift, &self.weights);
                ScoredGift {
                    gift: gift.clone(),
                    match_score: finalize_score(raw),
                    matched_tags,
                }
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
