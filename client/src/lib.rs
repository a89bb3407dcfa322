//! Client for the real estate marketplace REST API, plus the helpers the
//! listing pages need: price and status formatting, property card rendering,
//! form validation, rental date arithmetic and a small local key/value store.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

pub mod board;
pub mod bookings;
pub mod config;
pub mod error;
pub mod format;
pub mod inquiries;
pub mod models;
pub mod offers;
pub mod properties;
pub mod render;
pub mod rental;
pub mod rental_agreements;
pub mod request;
pub mod storage;
pub mod users;
pub mod validate;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use properties::PropertyFilters;
pub use request::ApiBody;

#[derive(Clone, Debug)]
pub struct MarketplaceClient {
    api_base: String,
    client: reqwest::Client,
}

impl MarketplaceClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        url::Url::parse(&config.api_base)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.auth_token {
            headers.insert(AUTHORIZATION, format!("Bearer {}", token).parse()?);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}
