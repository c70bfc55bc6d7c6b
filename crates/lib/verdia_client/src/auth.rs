// @zen-component: AUTH-ClientFlows
//
//! Authentication flows — login, registration and credential management.

use serde::{Deserialize, Serialize};
use tracing::info;

use verdia_core::models::auth::{Role, UserProfile};
use verdia_core::session::Session;

use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

/// Token pair plus user projection returned by a successful login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Registration form. The server creates the account; a follow-up login
/// establishes the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Success marker for calls whose body is only an optional message.
#[derive(Debug, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    // @zen-impl: AUTH-C1_AC-1
    /// Authenticate and persist the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        let request = ApiRequest::post("/auth/")
            .json(&serde_json::json!({ "email": email, "password": password }))?;
        let tokens: LoginResponse = self.send_json(&request).await?;

        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: tokens.user,
        };
        self.store().save(&session)?;
        info!(user = %session.user.id, role = %session.user.role, "logged in");
        Ok(session.user)
    }

    // @zen-impl: AUTH-C2_AC-1 — seller accounts need a shop name
    /// Register a new account. Does not establish a session.
    pub async fn register(&self, form: &RegistrationForm) -> ApiResult<Acknowledgement> {
        if form.role == Role::Seller
            && form.shop_name.as_deref().is_none_or(|s| s.trim().is_empty())
        {
            return Err(ApiError::Validation(
                "Seller registration requires a shop name".into(),
            ));
        }
        let request = ApiRequest::post("/auth/register").json(form)?;
        self.send_json(&request).await
    }

    /// Drop the local session. Explicit user action — the expired hook does
    /// not fire.
    pub fn logout(&self) -> ApiResult<()> {
        self.store().clear()?;
        info!("logged out");
        Ok(())
    }

    /// Profile of the signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store().load().map(|s| s.user)
    }

    /// Change the password of the signed-in user (bearer-protected).
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put("/auth/change-password").json(&serde_json::json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        }))?;
        self.send_json(&request).await
    }

    /// Start a password reset (unauthenticated).
    pub async fn forgot_password(&self, email: &str) -> ApiResult<Acknowledgement> {
        let request =
            ApiRequest::post("/auth/forgot-password").json(&serde_json::json!({ "email": email }))?;
        self.send_json(&request).await
    }

    /// Complete a password reset with the emailed token (unauthenticated).
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<Acknowledgement> {
        let request = ApiRequest::put(format!("/auth/reset-password/{token}"))
            .json(&serde_json::json!({ "newPassword": new_password }))?;
        self.send_json(&request).await
    }
}
