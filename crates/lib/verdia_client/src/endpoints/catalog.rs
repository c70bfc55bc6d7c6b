//! Product catalog — browsing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// A plant listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl ApiClient {
    /// `GET /products` — all listed products.
    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/products")).await
    }

    /// `GET /products/:id` — a single product.
    pub async fn product(&self, id: &str) -> ApiResult<Product> {
        self.send_json(&ApiRequest::get(format!("/products/{id}")))
            .await
    }

    /// `GET /plants/featured` — curated front-page picks.
    pub async fn featured_products(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/plants/featured")).await
    }

    /// `GET /plants/offers` — products with an active promotion.
    pub async fn offer_products(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/plants/offers")).await
    }

    /// `GET /categories` — the category list.
    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.send_json(&ApiRequest::get("/categories")).await
    }
}
