use chrono::Utc;

/// Response and request headers that keep intermediaries from caching
pub const NO_STORE_HEADERS: [(&str, &str); 3] = [
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// Query parameters reserved for cache busting
pub const CACHE_BUSTING_PARAMS: [&str; 2] = ["_t", "_r"];

/// Fresh `_t` / `_r` pair making a request URL unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheBuster {
    timestamp: i64,
    token: String,
}

impl CacheBuster {
    pub fn fresh() -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string();
        Self {
            timestamp: Utc::now().timestamp_millis(),
            token: token[..13].to_string(),
        }
    }

    /// Value for the `X-Request-ID` header
    pub fn request_id(&self) -> String {
        format!("{}-{}", self.timestamp, self.token)
    }

    pub fn params(&self) -> [(String, String); 2] {
        [
            ("_t".to_string(), self.timestamp.to_string()),
            ("_r".to_string(), self.token.clone()),
        ]
    }
}

/// Drop cache-busting parameters a caller already attached
pub fn strip_cache_busting(params: &[(String, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(name, _)| !CACHE_BUSTING_PARAMS.contains(&name.as_str()))
        .cloned()
        .collect()
}

/// Append url-encoded parameters to `base`
pub fn build_url(base: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }

    let query = params
        .iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}
