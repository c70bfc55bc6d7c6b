// @zen-component: GWY-AuthorizedRequestGateway
//
//! The authorized request gateway.
//!
//! Every REST call goes through [`ApiClient::send`]. The gateway:
//!
//! 1. attaches `Authorization: Bearer <access token>` to protected calls
//!    (bootstrap auth endpoints are always sent bare);
//! 2. on a 401, refreshes the access token and replays the request — at most
//!    once per logical request, so a rejected refreshed token surfaces
//!    instead of looping;
//! 3. single-flights concurrent refreshes: the first 401 performs the
//!    refresh call, concurrent 401s wait and reuse its result;
//! 4. on irrecoverable refresh failure (no refresh token, or the refresh
//!    endpoint rejects) wipes the session store and fires the
//!    session-expired hook, then surfaces the original 401.
//!
//! Only 401s are intercepted. Every other failure passes through to the
//! caller untouched.

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use verdia_core::session::{Session, SessionStore};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::ApiRequest;

/// Callback invoked after an irrecoverable authorization failure has wiped
/// the session — the client-side analog of a redirect to the login page.
pub type SessionExpiredHook = Box<dyn Fn() + Send + Sync>;

/// Auth endpoints that must never carry a bearer header: a stale token on
/// these would mask the real failure mode of the call itself.
const BOOTSTRAP_PATHS: &[&str] = &[
    "/auth/register",
    "/auth/refresh-token",
    "/auth/forgot-password",
    "/auth/reset-password",
];

/// Whether `path` targets an unauthenticated bootstrap endpoint.
pub(crate) fn is_bootstrap(path: &str) -> bool {
    path == "/auth/" || BOOTSTRAP_PATHS.iter().any(|p| path.starts_with(p))
}

/// Fresh token material returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    /// Present only when the backend rotates refresh tokens.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// The Verdia API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    /// Serializes refresh attempts across concurrent failing requests.
    refresh_gate: Mutex<()>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClient {
    /// Create a client over the given session store.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, store)
    }

    /// Create a client with a custom reqwest client (proxies, timeouts).
    pub fn with_http_client(
        http: reqwest::Client,
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            store,
            refresh_gate: Mutex::new(()),
            on_session_expired: None,
        }
    }

    /// Register the hook fired after an irrecoverable authorization failure.
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Box::new(hook));
        self
    }

    /// Session store this client reads credentials from.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw HTTP client, for the few calls that go around the send pipeline.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // -----------------------------------------------------------------------
    // Send pipeline
    // -----------------------------------------------------------------------

    // @zen-impl: GWY-1_AC-1 — bearer attach with bootstrap bypass
    /// Build and dispatch one attempt of `request`. `bearer` is the token
    /// used for this attempt, `None` for bootstrap or anonymous calls.
    async fn dispatch(&self, request: &ApiRequest, bearer: Option<&str>) -> ApiResult<Response> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.endpoint(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        Ok(builder.send().await?)
    }

    // @zen-impl: GWY-2_AC-1, GWY-2_AC-2 — at most one refresh-and-replay
    /// Send a request through the gateway.
    ///
    /// Returns the HTTP response for every non-401 outcome (callers map
    /// non-success statuses themselves); returns [`ApiError::Unauthorized`]
    /// for a 401 that survived the refresh cycle.
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<Response> {
        let bootstrap = is_bootstrap(&request.path);
        let mut attempt: u32 = 0;
        loop {
            let token = if bootstrap {
                None
            } else {
                self.store.load().map(|s| s.access_token)
            };
            let response = self.dispatch(request, token.as_deref()).await?;

            if response.status() != StatusCode::UNAUTHORIZED || bootstrap {
                return Ok(response);
            }

            // Keep the original 401 — it is what the caller sees if
            // recovery is impossible or the replay fails the same way.
            let unauthorized = ApiError::from_response(response).await;
            if attempt > 0 {
                debug!(path = %request.path, "401 after replay, surfacing");
                return Err(unauthorized);
            }
            attempt += 1;

            match self.refresh_access_token(token.as_deref()).await {
                Ok(()) => {
                    debug!(path = %request.path, "access token refreshed, replaying");
                }
                Err(e) => {
                    warn!(path = %request.path, error = %e, "token refresh failed");
                    return Err(unauthorized);
                }
            }
        }
    }

    /// Send a request and decode a successful JSON response into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // Refresh sub-protocol
    // -----------------------------------------------------------------------

    // @zen-impl: GWY-3_AC-1 — single-flight refresh
    /// Mint a new access token using the stored refresh token.
    ///
    /// `stale_token` is the access token the failing attempt carried. All
    /// refreshes serialize on one gate; a waiter that finds the stored token
    /// already changed reuses it instead of spending another refresh call.
    async fn refresh_access_token(&self, stale_token: Option<&str>) -> ApiResult<()> {
        let _gate = self.refresh_gate.lock().await;

        let session = match self.store.load() {
            // @zen-impl: GWY-3_AC-3 — no refresh token is irrecoverable
            None => {
                self.expire_session();
                return Err(ApiError::Unauthorized {
                    message: "No refresh token".into(),
                });
            }
            Some(session) => session,
        };

        if stale_token != Some(session.access_token.as_str()) {
            // Another request already refreshed while we waited on the gate.
            debug!("reusing access token refreshed by a concurrent request");
            return Ok(());
        }

        match self.request_refreshed_tokens(&session.refresh_token).await {
            Ok(fresh) => {
                match fresh.refresh_token {
                    // Rotating backend: replace the whole pair.
                    Some(rotated) => self.store.save(&Session {
                        access_token: fresh.access_token,
                        refresh_token: rotated,
                        user: session.user,
                    })?,
                    None => self.store.replace_access_token(&fresh.access_token)?,
                }
                Ok(())
            }
            // @zen-impl: GWY-3_AC-4 — refresh rejection is irrecoverable
            Err(e) => {
                self.expire_session();
                Err(e)
            }
        }
    }

    /// The dedicated, unauthenticated refresh call. Goes around the send
    /// pipeline so no stale bearer header is attached.
    async fn request_refreshed_tokens(&self, refresh_token: &str) -> ApiResult<RefreshResponse> {
        let response = self
            .http
            .post(self.endpoint("/auth/refresh-token"))
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json::<RefreshResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Wipe the session and fire the expired hook.
    fn expire_session(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear session store");
        }
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_register_and_refresh_are_bootstrap() {
        assert!(is_bootstrap("/auth/"));
        assert!(is_bootstrap("/auth/register"));
        assert!(is_bootstrap("/auth/refresh-token"));
        assert!(is_bootstrap("/auth/forgot-password"));
        assert!(is_bootstrap("/auth/reset-password/tok-123"));
    }

    #[test]
    fn protected_paths_are_not_bootstrap() {
        assert!(!is_bootstrap("/products"));
        assert!(!is_bootstrap("/auth/change-password"));
        assert!(!is_bootstrap("/chat/conversation"));
    }

    #[test]
    fn refresh_response_tolerates_missing_rotation() {
        let fresh: RefreshResponse =
            serde_json::from_str(r#"{"accessToken":"a2"}"#).unwrap();
        assert_eq!(fresh.access_token, "a2");
        assert!(fresh.refresh_token.is_none());
    }
}
