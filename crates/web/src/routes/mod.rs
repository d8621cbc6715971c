pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, pages};
use crate::middleware::gate::route_gate;
use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /healthz                 liveness probe (not gated)
///
/// /auth/callback           login-code exchange (public)
/// /auth/logout             sign-out (POST)
///
/// /                        home
/// /login, /signup          public entry pages
/// /jobs, /jobs/post        job board
/// /directory               member directory
/// /events                  community events
/// /settings/profile        profile completion form
/// /pending-approval        founder approval waiting room
/// /admin                   admin dashboard
/// /admin/approvals         founder application review
/// ```
///
/// Every route passes through the access gate; the gate itself skips its
/// exclusion set (`/healthz`, `/api/...`, static assets).
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        // Auth routes (code callback, logout).
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", post(auth::logout))
        // Public entry pages.
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup))
        // Member pages.
        .route("/jobs", get(pages::jobs))
        .route("/jobs/post", get(pages::post_job))
        .route("/directory", get(pages::directory))
        .route("/events", get(pages::events))
        .route("/settings/profile", get(pages::profile_settings))
        .route("/pending-approval", get(pages::pending_approval))
        // Admin area.
        .route("/admin", get(pages::admin_home))
        .route("/admin/approvals", get(pages::admin_approvals))
        // The access gate fronts everything registered above.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            route_gate,
        ))
        .with_state(state)
}
