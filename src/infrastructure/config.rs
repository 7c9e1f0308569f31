// Configuration loading for the dashboard service
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub monitoring: MonitoringSettings,
    #[serde(default)]
    pub features: FeatureSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Remote battery API connection settings.
#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the battery API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value for the `x-api-key` header.
    #[serde(default)]
    pub key: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Logged at startup; the client performs no retries.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("key", &"***REDACTED***")
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_attempts", &self.retry_attempts)
            .finish()
    }
}

/// Refresh and charting behavior.
#[derive(Debug, Deserialize, Clone)]
pub struct MonitoringSettings {
    /// Auto-refresh period in milliseconds.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Maximum points per chart series before downsampling kicks in.
    #[serde(default = "default_max_data_points")]
    pub max_data_points: usize,

    /// When true, the service starts with auto-refresh enabled.
    #[serde(default = "default_true")]
    pub enable_real_time_updates: bool,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            max_data_points: default_max_data_points(),
            enable_real_time_updates: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FeatureSettings {
    /// Lowers the log filter for this crate to debug.
    #[serde(default)]
    pub enable_debug_logs: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Listen address for the dashboard HTTP surface.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_refresh_interval_ms() -> u64 {
    30_000
}

fn default_max_data_points() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Load configuration from `config/dashboard.toml`, falling back to defaults
/// when the file is absent.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
