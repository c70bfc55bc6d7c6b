//! Admin endpoints — moderation and platform oversight.

use serde::Serialize;

use verdia_core::models::auth::{Role, UserProfile};

use crate::auth::Acknowledgement;
use crate::endpoints::catalog::{Category, Product};
use crate::endpoints::orders::Order;
use crate::endpoints::tips::Tip;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// Payload for creating a user from the admin console.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl ApiClient {
    /// `GET /admin/dashboard` — platform headline numbers.
    pub async fn admin_dashboard(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/admin/dashboard")).await
    }

    /// `GET /admin/users` — all accounts.
    pub async fn admin_users(&self) -> ApiResult<Vec<UserProfile>> {
        self.send_json(&ApiRequest::get("/admin/users")).await
    }

    /// `POST /admin/users` — create an account.
    pub async fn add_user(&self, user: &NewUser) -> ApiResult<UserProfile> {
        let request = ApiRequest::post("/admin/users").json(user)?;
        self.send_json(&request).await
    }

    /// `PUT /admin/users/:id` — update an account.
    pub async fn update_user(
        &self,
        id: &str,
        changes: &serde_json::Value,
    ) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put(format!("/admin/users/{id}")).json(changes)?;
        self.send_json(&request).await
    }

    /// `GET /admin/orders` — all orders, optionally filtered.
    pub async fn admin_orders(&self, status: Option<&str>) -> ApiResult<Vec<Order>> {
        let mut request = ApiRequest::get("/admin/orders");
        if let Some(status) = status {
            request = request.query("status", status);
        }
        self.send_json(&request).await
    }

    /// `GET /admin/revenue` — revenue rollup.
    pub async fn admin_revenue(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/admin/revenue")).await
    }

    /// `GET /admin/products` — all listings.
    pub async fn admin_products(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/admin/products")).await
    }

    /// `DELETE /admin/products/:id` — take down a listing.
    pub async fn delete_product(&self, id: &str, reason: &str) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::delete(format!("/admin/products/{id}"))
            .json(&serde_json::json!({ "reason": reason }))?;
        self.send_json(&request).await
    }

    /// `GET /admin/deleted-plants` — taken-down listings.
    pub async fn deleted_plants(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/admin/deleted-plants"))
            .await
    }

    /// `POST /admin/categories` — add a category.
    pub async fn add_category(&self, name: &str) -> ApiResult<Category> {
        let request =
            ApiRequest::post("/admin/categories").json(&serde_json::json!({ "name": name }))?;
        self.send_json(&request).await
    }

    /// `PUT /admin/categories/:id` — rename a category.
    pub async fn update_category(&self, id: &str, name: &str) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put(format!("/admin/categories/{id}"))
            .json(&serde_json::json!({ "name": name }))?;
        self.send_json(&request).await
    }

    /// `DELETE /admin/categories/:id` — remove a category.
    pub async fn delete_category(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::delete(format!("/admin/categories/{id}")))
            .await
    }

    /// `GET /admin/tips` — published tips for moderation.
    pub async fn admin_tips(&self) -> ApiResult<Vec<Tip>> {
        self.send_json(&ApiRequest::get("/admin/tips")).await
    }

    /// `GET /admin/tips/deleted` — removed tips.
    pub async fn deleted_tips(&self) -> ApiResult<Vec<Tip>> {
        self.send_json(&ApiRequest::get("/admin/tips/deleted")).await
    }

    /// `DELETE /admin/tips/:id` — remove a tip.
    pub async fn delete_tip(&self, id: &str, reason: &str) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::delete(format!("/admin/tips/{id}"))
            .json(&serde_json::json!({ "reason": reason }))?;
        self.send_json(&request).await
    }

    /// `GET /admin/disease-reports` — user-submitted disease reports.
    pub async fn disease_reports(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/admin/disease-reports"))
            .await
    }

    /// `DELETE /admin/disease-reports/:id` — dismiss a report.
    pub async fn delete_disease_report(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::delete(format!("/admin/disease-reports/{id}")))
            .await
    }
}
