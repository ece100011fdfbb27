use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Absence is reported per request as "service not configured", not at
    /// startup.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            currency: default_currency(),
            locale: default_locale(),
        }
    }
}

fn default_base_url() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `BOOFLIGHT__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("BOOFLIGHT").separator("__"))
            .build()?;

        let mut cfg: Self = s.try_deserialize()?;

        // Some deployments supply the key as a bare env var.
        if cfg.provider.api_key.as_deref().map_or(true, str::is_empty) {
            cfg.provider.api_key = env::var("SERPAPI_KEY").ok().filter(|k| !k.is_empty());
        }

        Ok(cfg)
    }
}
