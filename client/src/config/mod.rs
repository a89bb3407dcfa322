use dotenv::dotenv;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
pub const DEFAULT_STORAGE_PATH: &str = "marketplace-storage.json";

#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    pub api_base: String,
    pub storage_path: PathBuf,
    /// Passed through as a bearer `Authorization` header when set.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, then `marketplace.toml` if present, then `MARKETPLACE_*` env vars.
    pub fn load() -> Result<Self> {
        dotenv().ok(); // Load .env file if present
        let settings = config::Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("storage_path", DEFAULT_STORAGE_PATH)?
            .add_source(config::File::with_name("marketplace").required(false))
            .add_source(config::Environment::with_prefix("MARKETPLACE"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }
}
