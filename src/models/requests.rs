use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::products::parse_example_products;
use crate::models::domain::ExampleProduct;

/// Request to share a gift theme with someone by email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub gift_theme: Option<String>,
    #[serde(default)]
    pub gift_description: Option<String>,
    #[serde(default)]
    pub example_products: Option<ExampleProducts>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ShareRequest {
    /// Both the recipient address and the theme must be present and non-blank
    pub fn has_required_fields(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.recipient_email) && present(&self.gift_theme)
    }

    pub fn products(&self) -> Vec<ExampleProduct> {
        match &self.example_products {
            Some(products) => products.to_list(),
            None => Vec::new(),
        }
    }
}

/// Example products either already split by the caller or in the raw theme text form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleProducts {
    Listed(Vec<ExampleProduct>),
    Raw(String),
}

impl ExampleProducts {
    pub fn to_list(&self) -> Vec<ExampleProduct> {
        match self {
            ExampleProducts::Listed(list) => list.clone(),
            ExampleProducts::Raw(text) => parse_example_products(text),
        }
    }
}
