//! Giftwise - gift recommendation service
//!
//! This library ranks a built-in gift catalog against a recipient profile and
//! relays recommendation queries to an external service, degrading to a fixed
//! set of mock themes whenever that service is slow, unreachable or returns
//! something unusable.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{default_catalog, mock_theme_set, Matcher, RequestCoordinator};
pub use models::{CatalogGift, GiftTheme, RecipientProfile, ScoredGift, ScoringWeights, ThemeSet};
pub use services::{RecommendationClient, ThemeProxy, UpstreamClient};
