use askama::Template;

use crate::error::Result;
use crate::format::{format_price, status_class};
use crate::models::{Property, PropertyType};

pub const EMPTY_GRID_HTML: &str =
    r#"<div class="text-center"><p>No properties found matching your criteria.</p></div>"#;

#[derive(Template)]
#[template(path = "property_card.html")]
struct PropertyCard<'a> {
    id: String,
    main_image: Option<&'a str>,
    title: &'a str,
    location: &'a str,
    price: String,
    kind: &'a str,
    status: &'a str,
    status_class: &'static str,
    description: &'a str,
}

impl<'a> From<&'a Property> for PropertyCard<'a> {
    fn from(property: &'a Property) -> Self {
        let kind = property.kind.as_deref();
        // Sale listings show the asking price, everything else the monthly rent.
        let price = if kind == Some(PropertyType::Sale.as_str()) {
            format_price(property.price, None)
        } else {
            format_price(property.rent_amount, Some(PropertyType::Rent.as_str()))
        };

        Self {
            id: property.id.map(|id| id.to_string()).unwrap_or_default(),
            main_image: property.main_image.as_deref().filter(|s| !s.is_empty()),
            title: property.title.as_deref().unwrap_or("Untitled Property"),
            location: property
                .location
                .as_deref()
                .unwrap_or("Location not specified"),
            price,
            kind: kind.unwrap_or("N/A"),
            status: property.status.as_deref().unwrap_or("UNKNOWN"),
            status_class: status_class(property.status.as_deref().unwrap_or_default()),
            description: property
                .description
                .as_deref()
                .unwrap_or("No description available"),
        }
    }
}

/// One listing card. All backend-supplied text is HTML-escaped.
pub fn property_card(property: &Property) -> Result<String> {
    Ok(PropertyCard::from(property).render()?)
}

/// Cards for every property, or the "no properties" notice for an empty list.
pub fn property_grid(properties: &[Property]) -> Result<String> {
    if properties.is_empty() {
        return Ok(EMPTY_GRID_HTML.to_string());
    }
    properties
        .iter()
        .map(property_card)
        .collect::<Result<Vec<_>>>()
        .map(|cards| cards.join(""))
}

pub fn quick_contact_message(property_id: i64) -> String {
    format!("Quick contact feature for property {} coming soon!", property_id)
}
