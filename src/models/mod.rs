// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogGift, ExampleProduct, Gender, GiftTheme, PriceRange, RecipientProfile, ScoredGift,
    ScoringWeights, ThemeSet, QUERY_PARAM_NAMES,
};
pub use requests::{ExampleProducts, ShareRequest};
pub use responses::{ErrorResponse, HealthResponse, LoadingResponse, ScoreResponse, ShareResponse};
