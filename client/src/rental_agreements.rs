use reqwest::Method;
use serde_json::json;

use crate::error::Result;
use crate::models::{AgreementStatus, NewRentalAgreement, RentalAgreement};
use crate::MarketplaceClient;

pub const DEFAULT_EXPIRING_WITHIN_DAYS: u32 = 30;

impl MarketplaceClient {
    pub async fn fetch_all_rental_agreements(&self) -> Result<Vec<RentalAgreement>> {
        self.get_json("/rental-agreements").await
    }

    pub async fn fetch_rental_agreement_by_id(&self, agreement_id: i64) -> Result<RentalAgreement> {
        self.get_json(&format!("/rental-agreements/{}", agreement_id))
            .await
    }

    pub async fn create_rental_agreement(&self, agreement: &NewRentalAgreement) -> Result<RentalAgreement> {
        self.send_json(Method::POST, "/rental-agreements", agreement)
            .await
    }

    pub async fn update_rental_agreement(
        &self,
        agreement_id: i64,
        agreement: &NewRentalAgreement,
    ) -> Result<RentalAgreement> {
        self.send_json(
            Method::PUT,
            &format!("/rental-agreements/{}", agreement_id),
            agreement,
        )
        .await
    }

    pub async fn update_rental_agreement_status(
        &self,
        agreement_id: i64,
        status: AgreementStatus,
    ) -> Result<RentalAgreement> {
        self.send_json(
            Method::PATCH,
            &format!("/rental-agreements/{}/status", agreement_id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn extend_rental_agreement(
        &self,
        agreement_id: i64,
        additional_months: u32,
    ) -> Result<RentalAgreement> {
        self.send_json(
            Method::PATCH,
            &format!("/rental-agreements/{}/extend", agreement_id),
            &json!({ "additionalMonths": additional_months }),
        )
        .await
    }

    pub async fn fetch_rental_agreements_by_property(&self, property_id: i64) -> Result<Vec<RentalAgreement>> {
        self.get_json(&format!("/rental-agreements/property/{}", property_id))
            .await
    }

    pub async fn fetch_rental_agreements_by_tenant(&self, tenant_id: i64) -> Result<Vec<RentalAgreement>> {
        self.get_json(&format!("/rental-agreements/tenant/{}", tenant_id))
            .await
    }

    pub async fn fetch_rental_agreements_by_landlord(&self, landlord_id: i64) -> Result<Vec<RentalAgreement>> {
        self.get_json(&format!("/rental-agreements/landlord/{}", landlord_id))
            .await
    }

    pub async fn fetch_rental_agreements_by_status(
        &self,
        status: AgreementStatus,
    ) -> Result<Vec<RentalAgreement>> {
        self.get_json(&format!("/rental-agreements/status/{}", status))
            .await
    }

    /// Agreements ending within `days` days (the backend defaults to 30).
    pub async fn fetch_expiring_agreements(&self, days: u32) -> Result<Vec<RentalAgreement>> {
        self.get_json(&format!("/rental-agreements/expiring?days={}", days))
            .await
    }

    pub async fn delete_rental_agreement(&self, agreement_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/rental-agreements/{}", agreement_id))
            .await
    }
}
