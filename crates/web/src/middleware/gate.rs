//! The route access gate.
//!
//! Evaluated once per navigation request, in front of all page handlers:
//! resolve the session from cookies (refreshing transparently), load the
//! profile for the resolved identity, run the pure access policy, and turn
//! its decision into a pass-through or a redirect. Refreshed session
//! cookies are attached to the response either way, so a policy redirect
//! never costs the user their session.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use foundry_core::policy::{self, Decision};

use crate::session;
use crate::state::AppState;

/// File extensions served as static assets, never gated.
const STATIC_EXTENSIONS: &[&str] = &[".ico", ".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Paths the gate never evaluates: liveness, the API prefix, and static
/// assets.
fn is_excluded(path: &str) -> bool {
    path == "/healthz"
        || path.starts_with("/api/")
        || path.starts_with("/assets/")
        || STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Gate middleware applied to the whole route tree.
pub async fn route_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if is_excluded(&path) {
        return next.run(request).await;
    }

    let ctx = session::resolve(request.headers(), &state).await;

    // One profile round trip per navigation; staleness of zero. A missing or
    // unreadable profile degrades to None, which the policy treats as an
    // incomplete profile with unknown role.
    let profile = match &ctx.session {
        Some(authed) => match state.profiles.fetch(authed.user_id, &authed.access_token).await {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%path, %error, "profile fetch failed; treating profile as incomplete");
                None
            }
        },
        None => None,
    };

    let decision = policy::decide(&path, ctx.session.is_some(), profile.as_ref());

    let mut response = match decision {
        Decision::Proceed => next.run(request).await,
        Decision::RedirectTo(target) => {
            tracing::debug!(%path, %target, "gate redirect");
            Redirect::temporary(target).into_response()
        }
    };

    if let Some(pair) = &ctx.refreshed {
        for cookie in session::session_cookies(pair, state.config.cookie_secure) {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(error) => tracing::warn!(%error, "failed to encode session cookie"),
            }
        }
    }

    response
}
