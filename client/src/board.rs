//! Listing page state: the property grid plus its loading and error
//! indicators, driven by the fetch helpers.

use crate::error::Result;
use crate::models::{Property, PropertyStatus};
use crate::properties::PropertyFilters;
use crate::render::property_grid;
use crate::MarketplaceClient;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load properties. Please try again later.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Values of the search form; blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub kind: String,
    pub location: String,
    pub min_price: String,
    pub max_price: String,
}

impl SearchForm {
    /// Searches only ever cover available listings.
    pub fn filters(&self) -> PropertyFilters {
        let field = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());
        PropertyFilters {
            kind: field(&self.kind),
            location: field(&self.location),
            min_price: field(&self.min_price),
            max_price: field(&self.max_price),
            status: Some(PropertyStatus::Available.to_string()),
            ..PropertyFilters::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertyBoard {
    grid_html: String,
    loading: bool,
    error: Option<String>,
}

impl PropertyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid_html(&self) -> &str {
        &self.grid_html
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_loading(&mut self, show: bool) {
        self.loading = show;
    }

    pub fn show_error(&mut self, message: &str) {
        log::error!("Showing error: {}", message);
        self.error = Some(message.to_string());
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    pub fn display_properties(&mut self, properties: &[Property]) -> Result<()> {
        log::info!("Displaying {} properties", properties.len());
        self.grid_html = property_grid(properties)?;
        Ok(())
    }

    /// Initial page load: every available property.
    pub async fn load_properties(&mut self, client: &MarketplaceClient) {
        self.show_loading(true);
        self.hide_error();

        let outcome = match client.fetch_all_properties(&PropertyFilters::available()).await {
            Ok(properties) => {
                log::info!("Properties loaded successfully: {}", properties.len());
                self.display_properties(&properties)
            }
            Err(e) => Err(e),
        };

        self.show_loading(false);
        if let Err(e) = outcome {
            log::error!("Failed to load properties: {}", e);
            self.show_error(LOAD_FAILED_MESSAGE);
        }
    }

    pub async fn search_properties(&mut self, client: &MarketplaceClient, form: &SearchForm) {
        self.show_loading(true);

        let outcome = match client.fetch_all_properties(&form.filters()).await {
            Ok(properties) => self.display_properties(&properties),
            Err(e) => Err(e),
        };

        self.show_loading(false);
        if let Err(e) = outcome {
            log::error!("Search failed: {}", e);
            self.show_error(SEARCH_FAILED_MESSAGE);
        }
    }
}
