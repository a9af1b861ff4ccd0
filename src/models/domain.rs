use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Gender options offered by the recipient form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::NonBinary => "non-binary",
            Gender::Other => "other",
        }
    }
}

/// Everything the user told us about the person receiving the gift
///
/// Built once from a form submission and never mutated afterwards. Optional
/// free-text fields that arrive as empty strings are treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipientProfile {
    #[validate(length(min = 1, message = "Please enter your relationship"))]
    pub relationship: String,
    #[validate(length(min = 1, message = "Please enter the occasion"))]
    pub occasion: String,
    pub gender: Gender,
    #[validate(range(min = 1, max = 120))]
    pub age: u8,
    #[serde(default)]
    pub shared_hobbies: Option<String>,
    #[serde(default)]
    pub other_hobbies: Option<String>,
    #[serde(default)]
    pub values: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub milestones: Option<String>,
    #[serde(default)]
    pub loved_gifts: Option<String>,
    #[serde(default)]
    pub exclude_gifts: Option<String>,
    #[serde(default)]
    pub other_info: Option<String>,
    #[serde(default)]
    pub exclusions: Option<String>,
}

/// Form field -> recommendation API query parameter
pub const QUERY_PARAM_NAMES: &[(&str, &str)] = &[
    ("age", "age"),
    ("gender", "gender"),
    ("occasion", "occasion"),
    ("relationship", "relationship"),
    ("sharedHobbies", "shared_hobbies"),
    ("otherHobbies", "other_hobbies"),
    ("values", "values"),
    ("ethnicity", "culture"),
    ("milestones", "milestones"),
    ("lovedGifts", "past_gifts_loved"),
    ("excludeGifts", "past_gifts_exclude"),
    ("otherInfo", "other_info"),
    ("exclusions", "other_exclude"),
    ("budget", "budget"),
];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl RecipientProfile {
    pub fn shared_hobbies(&self) -> Option<&str> {
        non_empty(&self.shared_hobbies)
    }

    pub fn other_hobbies(&self) -> Option<&str> {
        non_empty(&self.other_hobbies)
    }

    pub fn values(&self) -> Option<&str> {
        non_empty(&self.values)
    }

    pub fn budget(&self) -> Option<&str> {
        non_empty(&self.budget)
    }

    /// Look up a profile field by its form name
    fn form_field(&self, name: &str) -> Option<String> {
        let text = |v: &Option<String>| non_empty(v).map(str::to_string);
        match name {
            "age" => Some(self.age.to_string()),
            "gender" => Some(self.gender.as_str().to_string()),
            "occasion" => Some(self.occasion.trim().to_string()).filter(|v| !v.is_empty()),
            "relationship" => Some(self.relationship.trim().to_string()).filter(|v| !v.is_empty()),
            "sharedHobbies" => text(&self.shared_hobbies),
            "otherHobbies" => text(&self.other_hobbies),
            "values" => text(&self.values),
            "ethnicity" => text(&self.ethnicity),
            "milestones" => text(&self.milestones),
            "lovedGifts" => text(&self.loved_gifts),
            "excludeGifts" => text(&self.exclude_gifts),
            "otherInfo" => text(&self.other_info),
            "exclusions" => text(&self.exclusions),
            "budget" => text(&self.budget),
            _ => None,
        }
    }

    /// Query parameters for the recommendation API, empty fields omitted
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        QUERY_PARAM_NAMES
            .iter()
            .filter_map(|(form, api)| self.form_field(form).map(|v| (api.to_string(), v)))
            .collect()
    }
}

/// Inclusive price band of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub fn average(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Static catalog entry with the metadata the scorer works from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGift {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub for_gender: Option<Vec<Gender>>,
    pub min_age: u8,
    pub max_age: u8,
    pub base_match_score: u8,
}

impl CatalogGift {
    pub fn is_valid(&self) -> bool {
        self.min_age <= self.max_age
            && self.base_match_score <= 100
            && self.price_range.low <= self.price_range.high
    }

    pub fn suits_gender(&self, gender: Gender) -> bool {
        self.for_gender
            .as_ref()
            .is_some_and(|genders| genders.contains(&gender))
    }
}

/// Catalog entry with the score computed for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredGift {
    #[serde(flatten)]
    pub gift: CatalogGift,
    pub match_score: u8,
    pub matched_tags: Vec<String>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub gender: f64,
    pub age: f64,
    pub shared_hobbies: f64,
    pub other_hobbies: f64,
    pub values: f64,
    pub budget_fit: f64,
    pub budget_miss: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gender: 3.0,
            age: 5.0,
            shared_hobbies: 2.0,
            other_hobbies: 1.5,
            values: 2.0,
            budget_fit: 3.0,
            budget_miss: 5.0,
        }
    }
}

/// Gift idea as produced by the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftTheme {
    pub gift_theme: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gift_theme_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gift_theme_example_products: String,
    #[serde(default, deserialize_with = "deserialize_match_score")]
    pub match_score: u8,
    #[serde(default = "generate_theme_id", deserialize_with = "deserialize_theme_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_image_url: Option<String>,
}

impl GiftTheme {
    pub fn example_products(&self) -> Vec<ExampleProduct> {
        crate::core::products::parse_example_products(&self.gift_theme_example_products)
    }
}

fn generate_theme_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalar that upstream services send either bare or quoted
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn deserialize_theme_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let id = match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => n.to_string(),
        Some(NumberOrString::Text(text)) => text,
        None => String::new(),
    };
    Ok(if id.is_empty() { generate_theme_id() } else { id })
}

/// Any number, or a numeric string, rounded into 0-100; anything else is 0
fn deserialize_match_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => n.as_f64(),
        Some(NumberOrString::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    }
    .unwrap_or(0.0);

    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// One entry of a theme's example products, e.g. `Spa voucher (~$200)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleProduct {
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
}

/// Normalized theme list handed to the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSet {
    pub themes: Vec<GiftTheme>,
    #[serde(rename = "isMockData")]
    pub is_mock_data: bool,
}

impl ThemeSet {
    pub fn live(themes: Vec<GiftTheme>) -> Self {
        Self { themes, is_mock_data: false }
    }

    /// Themes ordered by match score, highest first; ties keep their order
    pub fn ranked(mut self) -> Self {
        self.themes.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        self
    }
}
