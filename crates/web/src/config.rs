/// Server configuration loaded from environment variables.
///
/// The backend endpoint, public API key, and token-verification secret are
/// required: without them the gate cannot protect anything, so startup
/// refuses to proceed instead of serving unprotected routes.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Hosted backend base URL, without trailing slash.
    pub backend_url: String,
    /// Public (anon) API key sent with every backend request.
    pub backend_anon_key: String,
    /// HMAC-SHA256 secret the identity provider signs access tokens with.
    pub jwt_secret: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mark session cookies `Secure` (default: `true`; disable for local dev).
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default   |
    /// |------------------------|----------|-----------|
    /// | `BACKEND_URL`          | **yes**  | --        |
    /// | `BACKEND_ANON_KEY`     | **yes**  | --        |
    /// | `AUTH_JWT_SECRET`      | **yes**  | --        |
    /// | `HOST`                 | no       | `0.0.0.0` |
    /// | `PORT`                 | no       | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`      |
    /// | `COOKIE_SECURE`        | no       | `true`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let backend_url =
            std::env::var("BACKEND_URL").expect("BACKEND_URL must be set in the environment");
        assert!(!backend_url.is_empty(), "BACKEND_URL must not be empty");
        let backend_url = backend_url.trim_end_matches('/').to_string();

        let backend_anon_key = std::env::var("BACKEND_ANON_KEY")
            .expect("BACKEND_ANON_KEY must be set in the environment");
        assert!(
            !backend_anon_key.is_empty(),
            "BACKEND_ANON_KEY must not be empty"
        );

        let jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_SECURE must be `true` or `false`");

        Self {
            host,
            port,
            backend_url,
            backend_anon_key,
            jwt_secret,
            request_timeout_secs,
            cookie_secure,
        }
    }
}
