use std::env;
use std::time::Duration;

/// Runtime configuration, read once at startup from the environment (with
/// `.env` support for local development).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, no trailing slash.
    pub api_base: String,
    /// Currency code sent with payment-intent requests.
    pub currency: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

const DEFAULT_API_BASE: &str = "http://localhost:4000";
const DEFAULT_CURRENCY: &str = "usd";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let mut config = Self::default();
        if let Ok(base) = env::var("BEAUTYSPA_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(currency) = env::var("BEAUTYSPA_CURRENCY") {
            config.currency = currency;
        }
        config
    }

    /// Test/preview constructor pointing at an arbitrary base URL.
    pub fn with_base(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            api_base: base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
