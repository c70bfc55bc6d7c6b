//! Cart and wishlist endpoints.

use serde::{Deserialize, Serialize};

use crate::auth::Acknowledgement;
use crate::endpoints::catalog::Product;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// One line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Embedded product projection, when the API expands it.
    #[serde(default)]
    pub product: Option<Product>,
}

impl ApiClient {
    /// `GET /cart` — current cart contents.
    pub async fn cart(&self) -> ApiResult<Vec<CartItem>> {
        self.send_json(&ApiRequest::get("/cart")).await
    }

    /// `POST /cart` — add a product.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::post("/cart").json(&serde_json::json!({
            "productId": product_id,
            "quantity": quantity,
        }))?;
        self.send_json(&request).await
    }

    /// `DELETE /cart/:productId` — remove a product.
    pub async fn remove_from_cart(&self, product_id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::delete(format!("/cart/{product_id}")))
            .await
    }

    /// `GET /wishlist` — saved products.
    pub async fn wishlist(&self) -> ApiResult<Vec<Product>> {
        self.send_json(&ApiRequest::get("/wishlist")).await
    }

    /// `POST /wishlist` — save a product.
    pub async fn add_to_wishlist(&self, product_id: &str) -> ApiResult<Acknowledgement> {
        let request =
            ApiRequest::post("/wishlist").json(&serde_json::json!({ "productId": product_id }))?;
        self.send_json(&request).await
    }

    /// `DELETE /wishlist/:productId` — unsave a product.
    pub async fn remove_from_wishlist(&self, product_id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::delete(format!("/wishlist/{product_id}")))
            .await
    }
}
