use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

/// External recommendation service and the proxy's retry policy
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_upstream_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_direct_timeout_ms")]
    pub direct_timeout_ms: u64,
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    #[serde(default = "default_total_timeout_ms")]
    pub total_timeout_ms: u64,
    #[serde(default = "default_early_exit_margin_ms")]
    pub early_exit_margin_ms: u64,
    #[serde(default = "default_grace_attempts")]
    pub grace_attempts: u32,
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    #[serde(default = "default_backoff_step_ms")]
    pub backoff_step_ms: u64,
    #[serde(default = "default_backoff_cap_ms")]
    pub backoff_cap_ms: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            endpoint: default_upstream_endpoint(),
            direct_timeout_ms: default_direct_timeout_ms(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            total_timeout_ms: default_total_timeout_ms(),
            early_exit_margin_ms: default_early_exit_margin_ms(),
            grace_attempts: default_grace_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_step_ms: default_backoff_step_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
        }
    }
}

fn default_upstream_endpoint() -> String { "http://localhost:8000/api/gifts".to_string() }
fn default_direct_timeout_ms() -> u64 { 6_000 }
fn default_attempt_timeout_ms() -> u64 { 10_000 }
fn default_total_timeout_ms() -> u64 { 50_000 }
fn default_early_exit_margin_ms() -> u64 { 5_000 }
fn default_grace_attempts() -> u32 { 2 }
fn default_backoff_base_ms() -> u64 { 1_000 }
fn default_backoff_step_ms() -> u64 { 300 }
fn default_backoff_cap_ms() -> u64 { 3_000 }

/// Recommendation client settings (caller side of the proxy)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default = "default_client_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            timeout_ms: default_client_timeout_ms(),
        }
    }
}

fn default_proxy_url() -> String { "http://localhost:3000/api/gifts".to_string() }
fn default_client_timeout_ms() -> u64 { 25_000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_shared_hobbies_weight")]
    pub shared_hobbies: f64,
    #[serde(default = "default_other_hobbies_weight")]
    pub other_hobbies: f64,
    #[serde(default = "default_values_weight")]
    pub values: f64,
    #[serde(default = "default_budget_fit_weight")]
    pub budget_fit: f64,
    #[serde(default = "default_budget_miss_weight")]
    pub budget_miss: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            gender: default_gender_weight(),
            age: default_age_weight(),
            shared_hobbies: default_shared_hobbies_weight(),
            other_hobbies: default_other_hobbies_weight(),
            values: default_values_weight(),
            budget_fit: default_budget_fit_weight(),
            budget_miss: default_budget_miss_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            gender: config.gender,
            age: config.age,
            shared_hobbies: config.shared_hobbies,
            other_hobbies: config.other_hobbies,
            values: config.values,
            budget_fit: config.budget_fit,
            budget_miss: config.budget_miss,
        }
    }
}

fn default_gender_weight() -> f64 { 3.0 }
fn default_age_weight() -> f64 { 5.0 }
fn default_shared_hobbies_weight() -> f64 { 2.0 }
fn default_other_hobbies_weight() -> f64 { 1.5 }
fn default_values_weight() -> f64 { 2.0 }
fn default_budget_fit_weight() -> f64 { 3.0 }
fn default_budget_miss_weight() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GIFTWISE__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GIFTWISE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GIFTWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GIFTWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the bare `RECOMMENDATION_API_URL` deployment variable
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(endpoint) = std::env::var("RECOMMENDATION_API_URL") {
        if !endpoint.trim().is_empty() {
            builder = builder.set_override("upstream.endpoint", endpoint)?;
        }
    }

    builder.build()
}
