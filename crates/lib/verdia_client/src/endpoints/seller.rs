//! Seller endpoints — listings, orders, analytics, payouts, profile.

use serde::Serialize;

use crate::auth::Acknowledgement;
use crate::endpoints::catalog::Product;
use crate::endpoints::orders::Order;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// Payload for creating or updating a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ApiClient {
    /// `GET /seller/dashboard` — headline numbers (free-form document).
    pub async fn seller_dashboard(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/seller/dashboard")).await
    }

    /// `GET /seller/plants` — the seller's listings.
    pub async fn seller_plants(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/seller/plants")).await
    }

    /// `GET /seller/plants/:id` — one listing.
    pub async fn seller_plant(&self, id: &str) -> ApiResult<Product> {
        self.send_json(&ApiRequest::get(format!("/seller/plants/{id}")))
            .await
    }

    /// `POST /seller/plants` — create a listing.
    pub async fn create_plant(&self, draft: &ListingDraft) -> ApiResult<Product> {
        let request = ApiRequest::post("/seller/plants").json(draft)?;
        self.send_json(&request).await
    }

    /// `PUT /seller/plants/:id` — update a listing.
    pub async fn update_plant(&self, id: &str, draft: &ListingDraft) -> ApiResult<Product> {
        let request = ApiRequest::put(format!("/seller/plants/{id}")).json(draft)?;
        self.send_json(&request).await
    }

    /// `DELETE /seller/plants/:id` — withdraw a listing.
    pub async fn delete_plant(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::delete(format!("/seller/plants/{id}")))
            .await
    }

    /// `PUT /seller/plants/:id/promotion` — set or clear a promotion.
    pub async fn apply_promotion(
        &self,
        id: &str,
        discount_percent: u8,
    ) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put(format!("/seller/plants/{id}/promotion"))
            .json(&serde_json::json!({ "discountPercent": discount_percent }))?;
        self.send_json(&request).await
    }

    /// `GET /seller/analytics/products` — per-product analytics.
    pub async fn product_analytics(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/seller/analytics/products"))
            .await
    }

    /// `GET /seller/salesanalytics/dashboard` — sales and payout dashboard.
    pub async fn sales_dashboard(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/seller/salesanalytics/dashboard"))
            .await
    }

    /// `POST /seller/payouts/request` — request a payout.
    pub async fn request_payout(&self, amount: f64) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::post("/seller/payouts/request")
            .json(&serde_json::json!({ "amount": amount }))?;
        self.send_json(&request).await
    }

    /// `GET /seller/orders` — orders containing the seller's products.
    pub async fn seller_orders(&self) -> ApiResult<Vec<Order>> {
        self.send_json(&ApiRequest::get("/seller/orders")).await
    }

    /// `PUT /seller/orders/:id/status` — advance an order's status.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put(format!("/seller/orders/{order_id}/status"))
            .json(&serde_json::json!({ "status": status }))?;
        self.send_json(&request).await
    }

    /// `PUT /seller/orders/:id/mark-paid` — record an offline payment.
    pub async fn mark_order_paid(&self, order_id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::put(format!(
            "/seller/orders/{order_id}/mark-paid"
        )))
        .await
    }

    /// `GET /seller/notifications` — seller-facing notifications.
    pub async fn seller_notifications(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/seller/notifications"))
            .await
    }

    /// `GET /seller/profile` — the shop profile.
    pub async fn seller_profile(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/seller/profile")).await
    }

    /// `PUT /seller/profile` — update the shop profile.
    pub async fn update_seller_profile(
        &self,
        profile: &serde_json::Value,
    ) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put("/seller/profile").json(profile)?;
        self.send_json(&request).await
    }
}
