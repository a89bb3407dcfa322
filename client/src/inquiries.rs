use reqwest::Method;
use serde_json::json;

use crate::error::Result;
use crate::models::{Inquiry, InquiryStatus, NewInquiry};
use crate::MarketplaceClient;

impl MarketplaceClient {
    pub async fn fetch_all_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.get_json("/inquiries").await
    }

    pub async fn fetch_inquiry_by_id(&self, inquiry_id: i64) -> Result<Inquiry> {
        self.get_json(&format!("/inquiries/{}", inquiry_id)).await
    }

    pub async fn create_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry> {
        self.send_json(Method::POST, "/inquiries", inquiry).await
    }

    /// Replaces the inquiry text. Status changes go through [`Self::update_inquiry_status`].
    pub async fn update_inquiry(&self, inquiry_id: i64, inquiry: &NewInquiry) -> Result<Inquiry> {
        self.send_json(Method::PUT, &format!("/inquiries/{}", inquiry_id), inquiry)
            .await
    }

    pub async fn update_inquiry_status(&self, inquiry_id: i64, status: InquiryStatus) -> Result<Inquiry> {
        self.send_json(
            Method::PATCH,
            &format!("/inquiries/{}/status", inquiry_id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn fetch_inquiries_by_property(&self, property_id: i64) -> Result<Vec<Inquiry>> {
        self.get_json(&format!("/inquiries/property/{}", property_id))
            .await
    }

    pub async fn fetch_inquiries_by_sender(&self, sender_id: i64) -> Result<Vec<Inquiry>> {
        self.get_json(&format!("/inquiries/sender/{}", sender_id)).await
    }

    pub async fn fetch_inquiries_by_status(&self, status: InquiryStatus) -> Result<Vec<Inquiry>> {
        self.get_json(&format!("/inquiries/status/{}", status)).await
    }

    pub async fn fetch_open_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.get_json("/inquiries/open").await
    }

    /// Asks the backend to archive stale inquiries; returns its confirmation message.
    pub async fn archive_old_inquiries(&self) -> Result<String> {
        self.send_empty(Method::POST, "/inquiries/archive-old").await
    }

    pub async fn delete_inquiry(&self, inquiry_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/inquiries/{}", inquiry_id))
            .await
    }
}
