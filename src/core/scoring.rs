use crate::core::preferences::{interest_tokens, matching_tags, parse_budget};
use crate::models::{CatalogGift, RecipientProfile, ScoringWeights};

/// Calculate the raw adjusted score of a catalog gift for a profile
///
/// Scoring formula, starting from the gift's base score:
/// score = base
///     + gender_bonus                  # profile gender listed on the gift
///     + age_match * weights.age       # 1.0 at the range midpoint, linear falloff
///     + shared_hobby_tags * 2.0
///     + other_hobby_tags * 1.5
///     + value_tags * 2.0
///     + budget_fit (+3) | budget_miss (-5)
///
/// The returned score is not clamped; [`finalize_score`] turns it into the
/// 0-100 integer shown to users. The second element lists the tags that
/// matched any hobby or value.
pub fn calculate_match_score(
    profile: &RecipientProfile,
    gift: &CatalogGift,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let mut score = gift.base_match_score as f64;
    let mut matched: Vec<String> = Vec::new();

    if gift.suits_gender(profile.gender) {
        score += weights.gender;
    }

    score += calculate_age_match(profile.age, gift.min_age, gift.max_age) * weights.age;

    let interests = [
        (profile.shared_hobbies(), weights.shared_hobbies),
        (profile.other_hobbies(), weights.other_hobbies),
        (profile.values(), weights.values),
    ];
    for (answer, weight) in interests {
        let Some(answer) = answer else { continue };
        let tags = matching_tags(gift, &interest_tokens(answer));
        score += tags.len() as f64 * weight;
        for tag in tags {
            if !matched.iter().any(|m| m == tag) {
                matched.push(tag.to_string());
            }
        }
    }

    if let Some(budget) = profile.budget().and_then(parse_budget) {
        score += calculate_budget_adjustment(gift.price_range.average(), budget, weights);
    }

    (score, matched)
}

/// Clamp to 0-100 and round to the nearest integer
#[inline]
pub fn finalize_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Age match factor
/// 1.0 at the midpoint of the gift's age range, 0.0 at its edges and
/// negative beyond them. A single-age range matches fully or not at all.
#[inline]
fn calculate_age_match(age: u8, min_age: u8, max_age: u8) -> f64 {
    let mid = (min_age as f64 + max_age as f64) / 2.0;
    let half_range = (max_age as f64 - min_age as f64) / 2.0;

    if half_range <= 0.0 {
        return if age == min_age { 1.0 } else { 0.0 };
    }

    1.0 - (age as f64 - mid).abs() / half_range
}

#[inline]
fn calculate_budget_adjustment(average_price: f64, budget: f64, weights: &ScoringWeights) -> f64 {
    if average_price <= budget {
        weights.budget_fit
    } else {
        -weights.budget_miss
    }
}
