//! HTTP clients for the hosted backend.
//!
//! The platform keeps its durable state in a backend-as-a-service that
//! exposes a token API for identity (login, refresh, code exchange) and a
//! row API for relational data. This crate wraps both with [`reqwest`]:
//! [`auth::AuthClient`] for the token endpoints and
//! [`profiles::ProfileStore`] for the single-row profile lookup the gate
//! performs on every navigation.

pub mod auth;
pub mod error;
pub mod profiles;

pub use error::StoreError;
