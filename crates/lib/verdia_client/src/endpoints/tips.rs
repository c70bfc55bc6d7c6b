//! Community tips endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// A community care tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    /// `GET /tips` — published tips.
    pub async fn tips(&self) -> ApiResult<Vec<Tip>> {
        self.send_json(&ApiRequest::get("/tips")).await
    }

    /// `POST /tips` — submit a tip.
    pub async fn add_tip(&self, title: &str, text: &str) -> ApiResult<Tip> {
        let request = ApiRequest::post("/tips")
            .json(&serde_json::json!({ "title": title, "text": text }))?;
        self.send_json(&request).await
    }
}
