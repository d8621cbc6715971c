//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router with the same middleware stack as
//! `main.rs`, pointed at a stub hosted backend served on a local listener,
//! so tests exercise the gate, the session resolver, and the store clients
//! end to end.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use foundry_store::auth::AuthClient;
use foundry_store::profiles::ProfileStore;
use foundry_web::config::AppConfig;
use foundry_web::routes;
use foundry_web::state::AppState;

/// HMAC secret shared by minted tokens and the app under test.
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

#[derive(Serialize)]
struct MintClaims {
    sub: Uuid,
    exp: i64,
}

/// Mint an access token for `sub` expiring `exp_offset_secs` from now
/// (negative for an already-expired token).
pub fn mint_access_token(sub: Uuid, exp_offset_secs: i64) -> String {
    let claims = MintClaims {
        sub,
        exp: chrono::Utc::now().timestamp() + exp_offset_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Behavior of the stub hosted backend for one test.
#[derive(Clone)]
pub struct StubBackend {
    /// Status and body returned by the profile row endpoint.
    pub profile_response: (StatusCode, Value),
    /// `Some(user)` makes token refresh/exchange succeed with a fresh pair
    /// for that user; `None` rejects every token grant.
    pub token_user: Option<Uuid>,
}

impl StubBackend {
    pub fn with_profile(row: Value) -> Self {
        Self {
            profile_response: (StatusCode::OK, row),
            token_user: None,
        }
    }

    pub fn without_profile() -> Self {
        // The row API answers 406 when a single-object request matches
        // zero rows.
        Self {
            profile_response: (
                StatusCode::NOT_ACCEPTABLE,
                json!({ "message": "JSON object requested, multiple (or no) rows returned" }),
            ),
            token_user: None,
        }
    }

    pub fn failing_profiles() -> Self {
        Self {
            profile_response: (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "backend exploded" }),
            ),
            token_user: None,
        }
    }

    pub fn granting_tokens_for(mut self, user: Uuid) -> Self {
        self.token_user = Some(user);
        self
    }
}

async fn profiles_endpoint(State(stub): State<Arc<StubBackend>>) -> Response {
    let (status, body) = stub.profile_response.clone();
    (status, Json(body)).into_response()
}

async fn token_endpoint(State(stub): State<Arc<StubBackend>>) -> Response {
    match stub.token_user {
        Some(user) => Json(json!({
            "access_token": mint_access_token(user, 3600),
            "refresh_token": "rotated-refresh-token",
            "expires_in": 3600,
        }))
        .into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
    }
}

/// Serve the stub backend on an ephemeral local port, returning its base URL.
pub async fn spawn_backend(stub: StubBackend) -> String {
    let router = Router::new()
        .route("/rest/v1/profiles", get(profiles_endpoint))
        .route("/auth/v1/token", post(token_endpoint))
        .route("/auth/v1/health", get(|| async { StatusCode::OK }))
        .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
        .with_state(Arc::new(stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub backend should bind");
    let addr: SocketAddr = listener.local_addr().expect("stub backend addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub backend serve");
    });

    format!("http://{addr}")
}

/// Build a test `AppConfig` pointed at the given stub backend.
pub fn test_config(backend_url: String) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend_url,
        backend_anon_key: "test-anon-key".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        request_timeout_secs: 30,
        cookie_secure: false,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same stack (gate, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(backend_url: String) -> Router {
    let config = test_config(backend_url);

    let http = reqwest::Client::new();
    let auth = AuthClient::new(
        http.clone(),
        config.backend_url.clone(),
        config.backend_anon_key.clone(),
    );
    let profiles = ProfileStore::new(
        http,
        config.backend_url.clone(),
        config.backend_anon_key.clone(),
    );

    let state = AppState {
        config: Arc::new(config),
        auth: Arc::new(auth),
        profiles: Arc::new(profiles),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    routes::app_router(state)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

/// Drive a GET request through the app.
pub async fn get_path(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("app should respond")
}

/// Drive a GET request carrying a `Cookie` header.
pub async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("cookie", cookie)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("app should respond")
}

/// Drive a POST request carrying a `Cookie` header.
pub async fn post_with_cookie(app: Router, path: &str, cookie: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("cookie", cookie)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("app should respond")
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("response should carry a Location header")
        .to_str()
        .expect("Location should be valid UTF-8")
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Parse the response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
