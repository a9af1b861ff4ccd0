// Unit tests for Giftwise

use giftwise::core::{
    calculate_match_score, decode_payload, default_catalog, finalize_score, mock_theme_set,
    parse_budget, parse_example_products, ApiPayload, Matcher,
};
use giftwise::models::{CatalogGift, Gender, PriceRange, RecipientProfile, ScoringWeights};
use giftwise::services::RecommendationClient;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use validator::Validate;

fn create_profile(age: u8, budget: Option<&str>) -> RecipientProfile {
    RecipientProfile {
        relationship: "mother".to_string(),
        occasion: "anniversary".to_string(),
        gender: Gender::Female,
        age,
        shared_hobbies: Some("gardening, cooking".to_string()),
        other_hobbies: Some("reading".to_string()),
        values: Some("sustainability".to_string()),
        budget: budget.map(str::to_string),
        ethnicity: None,
        milestones: None,
        loved_gifts: None,
        exclude_gifts: None,
        other_info: None,
        exclusions: None,
    }
}

fn create_gift(min_age: u8, max_age: u8, low: f64, high: f64) -> CatalogGift {
    CatalogGift {
        title: "Fixture".to_string(),
        description: String::new(),
        tags: vec!["unrelated".to_string()],
        price_range: PriceRange { low, high },
        for_gender: None,
        min_age,
        max_age,
        base_match_score: 50,
    }
}

#[test]
fn test_budget_rule() {
    let weights = ScoringWeights::default();
    let gift = create_gift(20, 40, 80.0, 120.0);

    let (no_budget, _) = calculate_match_score(&create_profile(30, None), &gift, &weights);
    let (within, _) = calculate_match_score(&create_profile(30, Some("$150")), &gift, &weights);
    let (over, _) = calculate_match_score(&create_profile(30, Some("$50")), &gift, &weights);

    assert_eq!(within - no_budget, 3.0);
    assert_eq!(over - no_budget, -5.0);
}

#[test]
fn test_age_rule() {
    let weights = ScoringWeights::default();
    let gift = create_gift(20, 40, 1.0, 2.0);

    let (at_mid, _) = calculate_match_score(&create_profile(30, None), &gift, &weights);
    let (outside, _) = calculate_match_score(&create_profile(50, None), &gift, &weights);

    // 50 base + full 5 point age bonus
    assert_eq!(at_mid, 55.0);
    // Beyond the range the bonus goes negative
    assert!(outside < 50.0);
}

#[test]
fn test_rank_covers_catalog_once() {
    let matcher = Matcher::with_default_weights();
    let catalog = default_catalog();
    let ranked = matcher.rank(&create_profile(45, Some("$100")), &catalog);

    assert_eq!(ranked.len(), catalog.len());
    for gift in &catalog {
        assert_eq!(ranked.iter().filter(|s| s.gift == *gift).count(), 1);
    }
    assert!(ranked.windows(2).all(|w| w[0].match_score >= w[1].match_score));
}

#[test]
fn test_rank_is_idempotent() {
    let matcher = Matcher::with_default_weights();
    let catalog = default_catalog();
    let profile = create_profile(62, Some("around 75"));

    assert_eq!(matcher.rank(&profile, &catalog), matcher.rank(&profile, &catalog));
}

#[test]
fn test_interests_lift_matching_gifts() {
    let matcher = Matcher::with_default_weights();
    let catalog = default_catalog();
    let ranked = matcher.rank(&create_profile(45, None), &catalog);

    let herb_garden = ranked
        .iter()
        .find(|s| s.gift.title == "Indoor Herb Garden")
        .unwrap();
    assert!(herb_garden.matched_tags.contains(&"gardening".to_string()));
    assert!(herb_garden.matched_tags.contains(&"sustainability".to_string()));
}

#[test]
fn test_finalize_clamps() {
    assert_eq!(finalize_score(130.0), 100);
    assert_eq!(finalize_score(-12.0), 0);
}

#[test]
fn test_budget_parsing() {
    assert_eq!(parse_budget("$150"), Some(150.0));
    assert_eq!(parse_budget("no limit"), None);
}

#[test]
fn test_payload_normalization() {
    let three = json!({ "themes": [
        { "gift_theme": "a" }, { "gift_theme": "b" }, { "gift_theme": "c" }
    ]});
    let set = decode_payload(&three).into_theme_set().unwrap();
    assert_eq!(set.themes.len(), 3);
    assert!(!set.is_mock_data);

    let two = json!([{ "gift_theme": "a" }, { "gift_theme": "b" }]);
    let set = decode_payload(&two).into_theme_set().unwrap();
    assert_eq!(set.themes.len(), 2);
    assert!(!set.is_mock_data);

    assert_eq!(decode_payload(&json!({})), ApiPayload::Unrecognized);
    assert_eq!(decode_payload(&json!({ "themes": [] })), ApiPayload::Unrecognized);
}

#[test]
fn test_mock_products_parse() {
    for theme in mock_theme_set().themes {
        let products = parse_example_products(&theme.gift_theme_example_products);
        assert_eq!(products.len(), 2, "theme: {}", theme.gift_theme);
        assert!(products.iter().all(|p| p.price.as_deref().is_some_and(|p| p.starts_with('$'))));
    }
}

#[test]
fn test_profile_validation() {
    assert_ok!(create_profile(30, None).validate());

    let mut profile = create_profile(0, None);
    assert_err!(profile.validate());

    profile.age = 30;
    profile.relationship.clear();
    assert_err!(profile.validate());
}

#[test]
fn test_client_without_proxy_returns_mock() {
    let client = assert_ok!(RecommendationClient::new(
        "http://127.0.0.1:9/api/gifts",
        Duration::from_millis(500)
    ));
    let set = tokio_test::block_on(client.fetch_themes(&create_profile(30, Some("$40"))));

    assert!(set.is_mock_data);
    assert_eq!(set, mock_theme_set());
}
