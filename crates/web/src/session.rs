//! Session resolution from request cookies.
//!
//! The session is carried in two cookies: the provider-issued access token
//! (an HS256 JWT whose `sub` claim is the identity reference) and the
//! rotating refresh token. Resolution validates the access token locally
//! and, when it has expired, transparently trades the refresh token for a
//! new pair — surfacing the new cookies so the gate can attach them to
//! whatever response it ends up producing. Resolution never fails: every
//! error path degrades to "no session".

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use foundry_store::auth::TokenPair;

use crate::state::AppState;

pub const ACCESS_COOKIE: &str = "fy-access-token";
pub const REFRESH_COOKIE: &str = "fy-refresh-token";

/// The refresh cookie outlives the access token; the provider rotates the
/// token itself on every use.
const REFRESH_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Claims we read from an access token. The provider stamps more (audience,
/// issuer, session id); the gate only needs the subject, and expiry is
/// checked by the decoder itself.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Uuid,
}

/// An authenticated session in force for the current request.
#[derive(Debug)]
pub struct AuthedSession {
    /// Identity reference from the access token's `sub` claim.
    pub user_id: Uuid,
    /// The access token to forward to the row API (row-level security).
    pub access_token: String,
}

/// Result of resolving the session for one request.
#[derive(Debug, Default)]
pub struct SessionContext {
    /// `None` means the request is unauthenticated.
    pub session: Option<AuthedSession>,
    /// Set when a transparent refresh happened; the new pair must reach the
    /// browser as Set-Cookie headers on the response.
    pub refreshed: Option<TokenPair>,
}

/// Resolve the session from request cookies, refreshing if necessary.
pub async fn resolve(headers: &HeaderMap, state: &AppState) -> SessionContext {
    if let Some(token) = cookie_value(headers, ACCESS_COOKIE) {
        if let Some(user_id) = validate_access_token(&token, &state.config.jwt_secret) {
            return SessionContext {
                session: Some(AuthedSession {
                    user_id,
                    access_token: token,
                }),
                refreshed: None,
            };
        }
    }

    // Access token absent, expired, or malformed: try a transparent refresh.
    let Some(refresh_token) = cookie_value(headers, REFRESH_COOKIE) else {
        return SessionContext::default();
    };

    match state.auth.refresh_session(&refresh_token).await {
        Ok(pair) => match validate_access_token(&pair.access_token, &state.config.jwt_secret) {
            Some(user_id) => SessionContext {
                session: Some(AuthedSession {
                    user_id,
                    access_token: pair.access_token.clone(),
                }),
                refreshed: Some(pair),
            },
            None => {
                tracing::warn!("refreshed access token failed validation");
                SessionContext::default()
            }
        },
        Err(error) => {
            tracing::debug!(%error, "session refresh failed; treating request as unauthenticated");
            SessionContext::default()
        }
    }
}

/// Extract a cookie value from the request's `Cookie` header(s).
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Validate an access token and return its subject, or `None` when the
/// token is expired, malformed, or signed with the wrong secret.
fn validate_access_token(token: &str, secret: &str) -> Option<Uuid> {
    let mut validation = Validation::new(Algorithm::HS256);
    // The provider stamps its own audience claim; only subject and expiry
    // matter here.
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims.sub)
        .ok()
}

/// Set-Cookie values carrying a fresh token pair to the browser.
pub fn session_cookies(pair: &TokenPair, secure: bool) -> [String; 2] {
    [
        cookie(ACCESS_COOKIE, &pair.access_token, pair.expires_in, secure),
        cookie(REFRESH_COOKIE, &pair.refresh_token, REFRESH_COOKIE_MAX_AGE_SECS, secure),
    ]
}

/// Set-Cookie values that expire both session cookies immediately.
pub fn clear_session_cookies(secure: bool) -> [String; 2] {
    [
        cookie(ACCESS_COOKIE, "", 0, secure),
        cookie(REFRESH_COOKIE, "", 0, secure),
    ]
}

fn cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut header = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        header.push_str("; Secure");
    }
    header
}
