//! Placeholder page handlers.
//!
//! The platform's UI is rendered client-side; these handlers return minimal
//! shells so the gate has a real route tree to protect and integration
//! tests can observe pass-through versus redirect.

use axum::response::Html;

fn shell(title: &'static str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title} · Foundry</title></head>\
         <body><main id=\"app\" data-page=\"{title}\"></main></body></html>"
    ))
}

pub async fn home() -> Html<String> {
    shell("Home")
}

pub async fn login() -> Html<String> {
    shell("Log in")
}

pub async fn signup() -> Html<String> {
    shell("Sign up")
}

pub async fn jobs() -> Html<String> {
    shell("Jobs")
}

pub async fn post_job() -> Html<String> {
    shell("Post a job")
}

pub async fn directory() -> Html<String> {
    shell("Directory")
}

pub async fn events() -> Html<String> {
    shell("Events")
}

pub async fn profile_settings() -> Html<String> {
    shell("Profile settings")
}

pub async fn pending_approval() -> Html<String> {
    shell("Pending approval")
}

pub async fn admin_home() -> Html<String> {
    shell("Admin")
}

pub async fn admin_approvals() -> Html<String> {
    shell("Founder approvals")
}
