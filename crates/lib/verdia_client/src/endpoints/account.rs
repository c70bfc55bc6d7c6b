//! Account endpoints — settings, notifications, owned plants, AI care.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Acknowledgement;
use crate::endpoints::catalog::Product;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// A notification entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry in the AI scan history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: String,
    pub plant_name: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a disease-detection scan.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionReport {
    pub report: serde_json::Value,
}

impl ApiClient {
    /// `GET /settings` — account settings (free-form document).
    pub async fn settings(&self) -> ApiResult<serde_json::Value> {
        self.send_json(&ApiRequest::get("/settings")).await
    }

    /// `PUT /settings` — update account settings.
    pub async fn update_settings(&self, settings: &serde_json::Value) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put("/settings").json(settings)?;
        self.send_json(&request).await
    }

    /// `GET /notifications` — notifications for the signed-in user.
    pub async fn notifications(&self) -> ApiResult<Vec<Notification>> {
        self.send_json(&ApiRequest::get("/notifications")).await
    }

    /// `GET /user/my-plants` — products the user bought.
    pub async fn my_plants(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/user/my-plants")).await
    }

    /// `POST /user/rate-plant` — rate a bought product.
    pub async fn rate_plant(&self, product_id: &str, rating: u8) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::post("/user/rate-plant").json(&serde_json::json!({
            "productId": product_id,
            "rating": rating,
        }))?;
        self.send_json(&request).await
    }

    /// `GET /ai/history` — past AI scans.
    pub async fn ai_scan_history(&self) -> ApiResult<Vec<ScanRecord>> {
        self.send_json(&ApiRequest::get("/ai/history")).await
    }

    /// `GET /ai/generate-care/:plant` — AI-generated care instructions.
    pub async fn generate_care(&self, plant_name: &str) -> ApiResult<serde_json::Value> {
        let encoded: String = url::form_urlencoded::byte_serialize(plant_name.as_bytes()).collect();
        self.send_json(&ApiRequest::get(format!("/ai/generate-care/{encoded}")))
            .await
    }

    /// `POST /ai/detect` — upload a photo for disease detection.
    ///
    /// Multipart upload sent directly with the current bearer; a 401 here is
    /// not refreshed-and-replayed.
    pub async fn detect_disease(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> ApiResult<DetectionReport> {
        let part = reqwest::multipart::Part::bytes(image).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let mut builder = self.http().post(self.endpoint("/ai/detect")).multipart(form);
        if let Some(session) = self.store().load() {
            builder = builder.bearer_auth(session.access_token);
        }
        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(crate::error::ApiError::from_response(response).await);
        }
        response
            .json::<DetectionReport>()
            .await
            .map_err(|e| crate::error::ApiError::Decode(e.to_string()))
    }
}
