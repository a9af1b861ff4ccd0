// Service exports
pub mod client;
pub mod proxy;
pub mod query;
pub mod upstream;

pub use client::{ClientError, RecommendationClient};
pub use proxy::{MockReason, ProxyOutcome, ProxyPolicy, ThemeProxy};
pub use query::{build_url, strip_cache_busting, CacheBuster, NO_STORE_HEADERS};
pub use upstream::{ThemeSource, UpstreamClient, UpstreamError};
