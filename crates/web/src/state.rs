use std::sync::Arc;

use foundry_store::auth::AuthClient;
use foundry_store::profiles::ProfileStore;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Constructed once in `main` (or a test harness) and cheaply cloneable.
/// The backend clients live here explicitly rather than behind a
/// module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (read by the gate and the auth handlers).
    pub config: Arc<AppConfig>,
    /// Identity provider token API client.
    pub auth: Arc<AuthClient>,
    /// Profile row store client.
    pub profiles: Arc<ProfileStore>,
}
