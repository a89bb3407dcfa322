use reqwest::Method;
use serde_json::json;

use crate::error::Result;
use crate::models::{CounterOffer, NewOffer, Offer, OfferStatus};
use crate::MarketplaceClient;

impl MarketplaceClient {
    pub async fn fetch_all_offers(&self) -> Result<Vec<Offer>> {
        self.get_json("/offers").await
    }

    pub async fn fetch_offer_by_id(&self, offer_id: i64) -> Result<Offer> {
        self.get_json(&format!("/offers/{}", offer_id)).await
    }

    pub async fn create_offer(&self, offer: &NewOffer) -> Result<Offer> {
        self.send_json(Method::POST, "/offers", offer).await
    }

    pub async fn update_offer(&self, offer_id: i64, offer: &NewOffer) -> Result<Offer> {
        self.send_json(Method::PUT, &format!("/offers/{}", offer_id), offer)
            .await
    }

    pub async fn update_offer_status(&self, offer_id: i64, status: OfferStatus) -> Result<Offer> {
        self.send_json(
            Method::PATCH,
            &format!("/offers/{}/status", offer_id),
            &json!({ "status": status }),
        )
        .await
    }

    /// Accepting marks the property SOLD on the backend side.
    pub async fn accept_offer(&self, offer_id: i64) -> Result<Offer> {
        self.send_empty_json(Method::POST, &format!("/offers/{}/accept", offer_id))
            .await
    }

    /// Returns the newly created counter offer.
    pub async fn counter_offer(&self, offer_id: i64, counter: &CounterOffer) -> Result<Offer> {
        self.send_json(Method::POST, &format!("/offers/{}/counter", offer_id), counter)
            .await
    }

    pub async fn fetch_offers_by_property(&self, property_id: i64) -> Result<Vec<Offer>> {
        self.get_json(&format!("/offers/property/{}", property_id)).await
    }

    pub async fn fetch_offers_by_buyer(&self, buyer_id: i64) -> Result<Vec<Offer>> {
        self.get_json(&format!("/offers/buyer/{}", buyer_id)).await
    }

    pub async fn fetch_offers_by_status(&self, status: OfferStatus) -> Result<Vec<Offer>> {
        self.get_json(&format!("/offers/status/{}", status)).await
    }

    pub async fn fetch_pending_offers(&self) -> Result<Vec<Offer>> {
        self.get_json("/offers/pending").await
    }

    pub async fn expire_old_offers(&self) -> Result<String> {
        self.send_empty(Method::POST, "/offers/expire-old").await
    }

    pub async fn delete_offer(&self, offer_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/offers/{}", offer_id))
            .await
    }
}
