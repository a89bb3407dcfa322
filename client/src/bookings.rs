use reqwest::Method;
use serde_json::json;

use crate::error::Result;
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::MarketplaceClient;

impl MarketplaceClient {
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking> {
        self.send_json(Method::POST, "/bookings", booking).await
    }

    pub async fn fetch_all_bookings(&self) -> Result<Vec<Booking>> {
        self.get_json("/bookings").await
    }

    pub async fn fetch_booking_by_id(&self, booking_id: i64) -> Result<Booking> {
        self.get_json(&format!("/bookings/{}", booking_id)).await
    }

    pub async fn fetch_bookings_by_buyer(&self, buyer_id: i64) -> Result<Vec<Booking>> {
        self.get_json(&format!("/bookings/buyer/{}", buyer_id)).await
    }

    pub async fn fetch_bookings_by_property(&self, property_id: i64) -> Result<Vec<Booking>> {
        self.get_json(&format!("/bookings/property/{}", property_id))
            .await
    }

    /// Replaces the booking; the backend validates the body like a new booking.
    pub async fn update_booking(&self, booking_id: i64, booking: &NewBooking) -> Result<Booking> {
        self.send_json(Method::PUT, &format!("/bookings/{}", booking_id), booking)
            .await
    }

    /// Booking status changes go through PUT, unlike the other resources.
    pub async fn update_booking_status(&self, booking_id: i64, status: BookingStatus) -> Result<Booking> {
        self.send_json(
            Method::PUT,
            &format!("/bookings/{}/status", booking_id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_booking(&self, booking_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/bookings/{}", booking_id))
            .await
    }
}
