//! Handlers for the `/auth` routes (login-code callback, logout).

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use foundry_core::policy::paths;

use crate::error::{AppError, AppResult};
use crate::session;
use crate::state::AppState;

/// Query parameters of the provider's redirect back to us after login.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Where to send the user once the session is established.
    pub next: Option<String>,
}

/// GET /auth/callback
///
/// Completes login: exchanges the one-time code for a session, sets both
/// session cookies, and forwards the user to `next`. Every failure path is
/// a redirect back to login — the browser never sees an error page here.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Response> {
    let Some(code) = query.code.as_deref() else {
        tracing::warn!("auth callback called without a code parameter");
        return Ok(Redirect::temporary("/login?error=auth").into_response());
    };

    // 1. Exchange the code for a token pair.
    let pair = match state.auth.exchange_code(code).await {
        Ok(pair) => pair,
        Err(error) => {
            tracing::warn!(%error, "login code exchange failed");
            return Ok(Redirect::temporary("/login?error=auth").into_response());
        }
    };

    // 2. Only same-origin relative targets; anything else falls back home.
    let next = query
        .next
        .as_deref()
        .filter(|target| is_safe_redirect(target))
        .unwrap_or(paths::HOME);

    // 3. Redirect with the session cookies attached.
    let mut response = Redirect::temporary(next).into_response();
    attach_cookies(
        &mut response,
        session::session_cookies(&pair, state.config.cookie_secure),
    )?;
    Ok(response)
}

/// POST /auth/logout
///
/// Revokes the session at the provider (best effort), expires both session
/// cookies, and sends the user back to login.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(access_token) = session::cookie_value(&headers, session::ACCESS_COOKIE) {
        if let Err(error) = state.auth.sign_out(&access_token).await {
            tracing::warn!(%error, "provider sign-out failed; clearing cookies anyway");
        }
    }

    let mut response = Redirect::temporary(paths::LOGIN).into_response();
    attach_cookies(
        &mut response,
        session::clear_session_cookies(state.config.cookie_secure),
    )?;
    Ok(response)
}

/// A redirect target is safe iff it is a relative path into this app.
/// A scheme-relative `//host` target would escape the origin.
fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

fn attach_cookies(response: &mut Response, cookies: [String; 2]) -> Result<(), AppError> {
    for cookie in cookies {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("session cookie encoding: {e}")))?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect_targets() {
        assert!(is_safe_redirect("/"));
        assert!(is_safe_redirect("/jobs"));
        assert!(is_safe_redirect("/settings/profile?incomplete=true"));
    }

    #[test]
    fn test_unsafe_redirect_targets() {
        assert!(!is_safe_redirect("https://evil.example/phish"));
        assert!(!is_safe_redirect("//evil.example/phish"));
        assert!(!is_safe_redirect("jobs"));
        assert!(!is_safe_redirect(""));
    }
}
