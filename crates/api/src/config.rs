use folio_core::download::DEFAULT_DOWNLOAD_DELAY_MS;

use crate::auth::jwt::JwtConfig;
use crate::auth::oauth::DiscordConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except `JWT_SECRET` has a development default. A missing
/// `DATABASE_URL` is not an error: the server starts against an
/// unconfigured store and serves empty pages.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Store endpoint and credentials. `None` runs unconfigured.
    pub database_url: Option<String>,
    /// The one address with admin rights. Empty means nobody.
    pub admin_email: String,
    /// Argon2 PHC hash used to seed the admin account at startup.
    pub admin_password_hash: Option<String>,
    /// External contact link shown on the pricing and terms pages.
    pub contact_url: String,
    /// Pause between image fetches when building a download bundle.
    pub download_delay_ms: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Discord OAuth credentials, when all three are set.
    pub discord: Option<DiscordConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | unset (unconfigured store) |
    /// | `ADMIN_EMAIL`          | empty                      |
    /// | `ADMIN_PASSWORD_HASH`  | unset (no admin seeding)   |
    /// | `CONTACT_URL`          | empty                      |
    /// | `DOWNLOAD_DELAY_MS`    | `300`                      |
    ///
    /// See [`JwtConfig::from_env`] and [`DiscordConfig::from_env`] for the
    /// auth variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let admin_email = std::env::var("ADMIN_EMAIL")
            .map(|e| e.trim().to_string())
            .unwrap_or_default();

        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        let contact_url = std::env::var("CONTACT_URL").unwrap_or_default();

        let download_delay_ms: u64 = std::env::var("DOWNLOAD_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_DOWNLOAD_DELAY_MS.to_string())
            .parse()
            .expect("DOWNLOAD_DELAY_MS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            admin_email,
            admin_password_hash,
            contact_url,
            download_delay_ms,
            jwt: JwtConfig::from_env(),
            discord: DiscordConfig::from_env(),
        }
    }
}
