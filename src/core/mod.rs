// Core algorithm exports
pub mod catalog;
pub mod coordinator;
pub mod matcher;
pub mod mock;
pub mod payload;
pub mod preferences;
pub mod products;
pub mod scoring;

pub use catalog::default_catalog;
pub use coordinator::{RequestCoordinator, RequestTicket};
pub use matcher::Matcher;
pub use mock::{mock_theme_set, mock_themes};
pub use payload::{decode_payload, normalize_upstream, ApiPayload, RelayBody};
pub use preferences::{interest_tokens, matching_tags, parse_budget};
pub use products::parse_example_products;
pub use scoring::{calculate_match_score, finalize_score};
