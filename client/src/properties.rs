use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;
use std::path::Path;

use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyStatus, PropertyUpdate, UploadedImages};
use crate::MarketplaceClient;

/// Search filters for `GET /properties`. Absent or blank values are left out
/// of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilters {
    pub kind: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rent: Option<String>,
    pub max_rent: Option<String>,
}

impl PropertyFilters {
    pub fn available() -> Self {
        Self {
            status: Some(PropertyStatus::Available.to_string()),
            ..Self::default()
        }
    }

    fn pairs(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("type", self.kind.as_deref()),
            ("status", self.status.as_deref()),
            ("location", self.location.as_deref()),
            ("minPrice", self.min_price.as_deref()),
            ("maxPrice", self.max_price.as_deref()),
            ("minRent", self.min_rent.as_deref()),
            ("maxRent", self.max_rent.as_deref()),
        ]
    }

    /// URL-encoded query string without the leading `?`; empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    pub fn endpoint(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/properties".to_string()
        } else {
            format!("/properties?{}", query)
        }
    }
}

/// An image to attach to a listing. The backend keeps only `image/*` parts
/// and stores them under `/uploads/properties/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Content type is guessed from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = image_mime_type(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

fn image_mime_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn attach_images(mut form: Form, images: Vec<ImageFile>) -> Result<Form> {
    for image in images {
        form = form.part("files", image.into_part()?);
    }
    Ok(form)
}

/// Listing fields as the `*-with-images` endpoints take them: form fields,
/// `description` always present, prices only when set.
fn listing_form(property: &NewProperty) -> Form {
    let mut form = Form::new()
        .text("title", property.title.clone())
        .text("type", property.kind.as_str())
        .text("location", property.location.clone())
        .text("description", property.description.clone().unwrap_or_default());
    if let Some(price) = property.price {
        form = form.text("price", price.to_string());
    }
    if let Some(rent_amount) = property.rent_amount {
        form = form.text("rentAmount", rent_amount.to_string());
    }
    form
}

impl MarketplaceClient {
    pub async fn fetch_all_properties(&self, filters: &PropertyFilters) -> Result<Vec<Property>> {
        log::info!("Fetching properties with filters: {:?}", filters);
        let endpoint = filters.endpoint();
        log::debug!("Fetching from endpoint: {}", endpoint);

        match self.get_json::<Vec<Property>>(&endpoint).await {
            Ok(properties) => {
                log::info!("Properties fetched successfully: {} properties", properties.len());
                Ok(properties)
            }
            Err(e) => {
                log::error!("Failed to fetch properties: {}", e);
                Err(e)
            }
        }
    }

    pub async fn fetch_property_by_id(&self, property_id: i64) -> Result<Property> {
        log::info!("Fetching property by ID: {}", property_id);
        self.get_json(&format!("/properties/{}", property_id)).await
    }

    pub async fn create_property(&self, property: &NewProperty) -> Result<Property> {
        self.send_json(Method::POST, "/properties", property).await
    }

    pub async fn update_property(&self, property_id: i64, update: &PropertyUpdate) -> Result<Property> {
        self.send_json(Method::PUT, &format!("/properties/{}", property_id), update)
            .await
    }

    /// Uploads images on their own and returns the stored paths, ready to be
    /// used as `mainImage`/`images`.
    pub async fn upload_property_images(&self, images: Vec<ImageFile>) -> Result<Vec<String>> {
        log::info!("Uploading {} property images", images.len());
        let form = attach_images(Form::new(), images)?;
        let uploaded: UploadedImages = self
            .api_call_multipart(Method::POST, "/properties/upload", form)
            .await?
            .decode()?;
        Ok(uploaded.uploaded_files)
    }

    /// Creates a listing and its images in one request. The first stored
    /// image becomes the main image.
    pub async fn create_property_with_images(
        &self,
        property: &NewProperty,
        images: Vec<ImageFile>,
    ) -> Result<Property> {
        log::info!("Creating property with {} images: {}", images.len(), property.title);
        let form = listing_form(property).text("sellerId", property.seller_id.to_string());
        let form = attach_images(form, images)?;
        self.api_call_multipart(Method::POST, "/properties/create-with-images", form)
            .await?
            .decode()
    }

    /// Replaces the listing fields and appends any new images to the
    /// existing ones. `seller_id` is not sent; the seller cannot change here.
    pub async fn update_property_with_images(
        &self,
        property_id: i64,
        property: &NewProperty,
        images: Vec<ImageFile>,
    ) -> Result<Property> {
        let form = attach_images(listing_form(property), images)?;
        self.api_call_multipart(
            Method::PUT,
            &format!("/properties/{}/update-with-images", property_id),
            form,
        )
        .await?
        .decode()
    }

    pub async fn update_property_status(
        &self,
        property_id: i64,
        status: PropertyStatus,
    ) -> Result<Property> {
        self.send_json(
            Method::PATCH,
            &format!("/properties/{}/status", property_id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_property(&self, property_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/properties/{}", property_id))
            .await
    }

    pub async fn fetch_properties_by_seller(&self, seller_id: i64) -> Result<Vec<Property>> {
        log::info!("Fetching properties for seller: {}", seller_id);
        self.get_json(&format!("/properties/seller/{}", seller_id)).await
    }

    pub async fn fetch_available_properties_by_seller(&self, seller_id: i64) -> Result<Vec<Property>> {
        self.get_json(&format!("/properties/seller/{}/available", seller_id))
            .await
    }

    pub async fn fetch_rental_properties_by_seller(&self, seller_id: i64) -> Result<Vec<Property>> {
        self.get_json(&format!("/properties/seller/{}/rental", seller_id))
            .await
    }

    pub async fn fetch_rental_properties(&self) -> Result<Vec<Property>> {
        self.get_json("/properties/rental").await
    }
}
