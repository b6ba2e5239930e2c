use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the profile's JSON snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Simulated credential-lookup latency.
    #[serde(default = "default_auth_latency_ms")]
    pub latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Simulated gateway capture latency.
    #[serde(default = "default_payment_latency_ms")]
    pub latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// How many consecutive days are open for booking, starting today.
    #[serde(default = "default_booking_window_days")]
    pub booking_window_days: u64,
}

fn default_data_dir() -> String {
    ".marquee".to_string()
}

fn default_auth_latency_ms() -> u64 {
    500
}

fn default_payment_latency_ms() -> u64 {
    2000
}

fn default_booking_window_days() -> u64 {
    7
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_auth_latency_ms(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_payment_latency_ms(),
        }
    }
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            booking_window_days: default_booking_window_days(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Base configuration file; every field has a default, so it is optional
            .add_source(config::File::with_name("config/default").required(false))
            // Environment-specific overrides ('development' unless RUN_MODE says otherwise)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, kept out of version control
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `MARQUEE__PAYMENT__LATENCY_MS=0`
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
