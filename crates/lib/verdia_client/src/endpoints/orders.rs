//! Order endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Acknowledgement;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: String,
    pub total: f64,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub shipping_address: String,
}

impl ApiClient {
    /// `POST /orders` — place an order from the given draft.
    pub async fn place_order(&self, draft: &OrderDraft) -> ApiResult<Order> {
        let request = ApiRequest::post("/orders").json(draft)?;
        self.send_json(&request).await
    }

    /// `GET /orders` — the signed-in user's orders.
    pub async fn orders(&self) -> ApiResult<Vec<Order>> {
        self.send_json(&ApiRequest::get("/orders")).await
    }

    /// `PUT /orders/:id/refund` — request a refund.
    pub async fn refund_order(&self, order_id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::put(format!("/orders/{order_id}/refund")))
            .await
    }
}
