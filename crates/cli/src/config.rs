use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/gruzzolo.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Sent as `x-api-token`; omitted when unset.
    pub token: Option<String>,
    /// Currency quick-add amounts are parsed in.
    pub currency: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            token: None,
            currency: "USD".to_string(),
            level: "warn".to_string(),
        }
    }
}

/// Command-line overrides; they win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub currency: Option<String>,
}

pub fn load(overrides: Overrides) -> Result<AppConfig> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GRUZZOLO"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = overrides.base_url {
        settings.base_url = base_url;
    }
    if let Some(token) = overrides.token {
        settings.token = Some(token);
    }
    if let Some(currency) = overrides.currency {
        settings.currency = currency;
    }

    Ok(settings)
}
