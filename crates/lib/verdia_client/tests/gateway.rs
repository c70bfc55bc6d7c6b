//! Integration tests for the authorized request gateway — start an
//! in-process stub API, drive the client against it, assert on the
//! refresh-and-replay protocol.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use verdia_client::{ApiClient, ApiError, ApiRequest, ClientConfig};
use verdia_core::models::auth::{Role, UserProfile};
use verdia_core::session::{MemoryStore, Session, SessionStore};

// ---------------------------------------------------------------------------
// Stub API
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StubState {
    /// The access token the protected route currently accepts.
    valid_token: StdMutex<String>,
    refresh_calls: AtomicUsize,
    protected_calls: AtomicUsize,
    /// Make the refresh endpoint reject every call.
    refresh_fails: AtomicBool,
    /// Make the protected route reject even fresh tokens.
    always_reject: AtomicBool,
    login_saw_auth_header: AtomicBool,
    refresh_saw_auth_header: AtomicBool,
}

fn unauthorized(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized", "message": message })),
    )
}

async fn login(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.contains_key(AUTHORIZATION) {
        state.login_saw_auth_header.store(true, Ordering::SeqCst);
    }
    (
        StatusCode::OK,
        Json(json!({
            "accessToken": "token-login",
            "refreshToken": "refresh-login",
            "user": {
                "id": "u1",
                "name": "Ada",
                "email": "ada@example.com",
                "role": "user"
            }
        })),
    )
}

async fn refresh(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.contains_key(AUTHORIZATION) {
        state.refresh_saw_auth_header.store(true, Ordering::SeqCst);
    }
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if state.refresh_fails.load(Ordering::SeqCst) {
        return unauthorized("refresh token revoked");
    }
    if body["refreshToken"] != "refresh-1" {
        return unauthorized("unknown refresh token");
    }

    *state.valid_token.lock().unwrap() = "token-2".to_string();
    (StatusCode::OK, Json(json!({ "accessToken": "token-2" })))
}

async fn products(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.protected_calls.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let valid = state.valid_token.lock().unwrap().clone();

    if state.always_reject.load(Ordering::SeqCst) || bearer != Some(valid.as_str()) {
        return unauthorized("jwt expired");
    }
    (
        StatusCode::OK,
        Json(json!([{ "id": "p1", "name": "Fern", "price": 9.5 }])),
    )
}

async fn boom() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "message": "boom" })),
    )
}

/// Bind the stub on an ephemeral port; returns the API base URL.
async fn spawn_stub(state: Arc<StubState>) -> String {
    let app = Router::new()
        .route("/api/auth/", post(login))
        .route("/api/auth/refresh-token", post(refresh))
        .route("/api/products", get(products))
        .route("/api/boom", get(boom))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    format!("http://{addr}/api")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn stale_session() -> Session {
    Session {
        access_token: "token-1".into(),
        refresh_token: "refresh-1".into(),
        user: UserProfile {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::User,
            shop_name: None,
        },
    }
}

fn client_over(base: &str, session: Option<Session>) -> (ApiClient, Arc<MemoryStore>) {
    let store = Arc::new(match session {
        Some(session) => MemoryStore::with_session(session),
        None => MemoryStore::new(),
    });
    let client = ApiClient::new(
        &ClientConfig::with_api_url(base),
        store.clone() as Arc<dyn SessionStore>,
    );
    (client, store)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_token_passes_through_without_refresh() {
    let state = Arc::new(StubState::default());
    *state.valid_token.lock().unwrap() = "token-1".into();
    let base = spawn_stub(state.clone()).await;
    let (client, _store) = client_over(&base, Some(stale_session()));

    let products = client.products().await.expect("request succeeds");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Fern");
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.protected_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_token_refreshes_once_and_replays() {
    let state = Arc::new(StubState::default());
    *state.valid_token.lock().unwrap() = "token-2".into(); // token-1 is stale
    let base = spawn_stub(state.clone()).await;
    let (client, store) = client_over(&base, Some(stale_session()));

    let products = client.products().await.expect("replay succeeds");

    assert_eq!(products.len(), 1);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    // Original attempt + one replay, nothing more.
    assert_eq!(state.protected_calls.load(Ordering::SeqCst), 2);
    // The refresh call itself went out unauthenticated.
    assert!(!state.refresh_saw_auth_header.load(Ordering::SeqCst));

    // Store holds the new access token; the refresh half is untouched.
    let session = store.load().expect("still authenticated");
    assert_eq!(session.access_token, "token-2");
    assert_eq!(session.refresh_token, "refresh-1");
}

#[tokio::test]
async fn replayed_401_surfaces_without_second_refresh() {
    let state = Arc::new(StubState::default());
    state.always_reject.store(true, Ordering::SeqCst);
    let base = spawn_stub(state.clone()).await;
    let (client, _store) = client_over(&base, Some(stale_session()));

    let err = client.products().await.expect_err("terminal 401");

    assert!(err.is_unauthorized(), "got {err}");
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.protected_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn anonymous_401_skips_refresh_and_fires_hook() {
    let state = Arc::new(StubState::default());
    *state.valid_token.lock().unwrap() = "token-1".into();
    let base = spawn_stub(state.clone()).await;

    let store = Arc::new(MemoryStore::new());
    let expired = Arc::new(AtomicBool::new(false));
    let expired_flag = expired.clone();
    let client = ApiClient::new(
        &ClientConfig::with_api_url(&base),
        store.clone() as Arc<dyn SessionStore>,
    )
    .on_session_expired(move || expired_flag.store(true, Ordering::SeqCst));

    let err = client.products().await.expect_err("terminal 401");

    assert!(err.is_unauthorized(), "got {err}");
    // No refresh token — no refresh call was even attempted.
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.protected_calls.load(Ordering::SeqCst), 1);
    assert!(store.load().is_none());
    assert!(expired.load(Ordering::SeqCst), "expired hook must fire");
}

#[tokio::test]
async fn refresh_rejection_wipes_session_and_fires_hook() {
    let state = Arc::new(StubState::default());
    state.refresh_fails.store(true, Ordering::SeqCst);
    let base = spawn_stub(state.clone()).await;

    let store = Arc::new(MemoryStore::with_session(stale_session()));
    let expired = Arc::new(AtomicBool::new(false));
    let expired_flag = expired.clone();
    let client = ApiClient::new(
        &ClientConfig::with_api_url(&base),
        store.clone() as Arc<dyn SessionStore>,
    )
    .on_session_expired(move || expired_flag.store(true, Ordering::SeqCst));

    let err = client.products().await.expect_err("terminal 401");

    assert!(err.is_unauthorized(), "got {err}");
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    // Credential record fully cleared — never a lone token.
    assert!(store.load().is_none());
    assert!(expired.load(Ordering::SeqCst), "expired hook must fire");
}

#[tokio::test]
async fn non_401_failures_pass_through_untouched() {
    let state = Arc::new(StubState::default());
    let base = spawn_stub(state.clone()).await;
    let (client, store) = client_over(&base, Some(stale_session()));

    let err = client
        .send_json::<Value>(&ApiRequest::get("/boom"))
        .await
        .expect_err("500 surfaces");

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other}"),
    }
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
    // Session untouched by a non-401 failure.
    assert!(store.load().is_some());
}

#[tokio::test]
async fn login_carries_no_bearer_despite_stale_session() {
    let state = Arc::new(StubState::default());
    let base = spawn_stub(state.clone()).await;
    let (client, store) = client_over(&base, Some(stale_session()));

    let user = client.login("ada@example.com", "pw").await.expect("login");

    assert_eq!(user.id, "u1");
    assert!(
        !state.login_saw_auth_header.load(Ordering::SeqCst),
        "login must never carry a stale bearer header"
    );
    // Login replaced the whole session.
    let session = store.load().expect("authenticated");
    assert_eq!(session.access_token, "token-login");
    assert_eq!(session.refresh_token, "refresh-login");
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    let state = Arc::new(StubState::default());
    *state.valid_token.lock().unwrap() = "token-2".into(); // token-1 is stale
    let base = spawn_stub(state.clone()).await;
    let (client, store) = client_over(&base, Some(stale_session()));

    let (a, b) = tokio::join!(client.products(), client.products());

    a.expect("first request succeeds");
    b.expect("second request succeeds");
    assert_eq!(
        state.refresh_calls.load(Ordering::SeqCst),
        1,
        "concurrent 401s must coalesce into one refresh call"
    );
    assert_eq!(store.load().expect("authenticated").access_token, "token-2");
}
