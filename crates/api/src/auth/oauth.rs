//! External sign-in providers.
//!
//! Only Discord is wired up. The provider is used for the reviews page:
//! a review submitted by a Discord account carries its username and avatar.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::auth::PROVIDER_DISCORD;
use folio_db::models::user::ExternalProfile;
use reqwest::Url;
use serde::Deserialize;

const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const PROFILE_URL: &str = "https://discord.com/api/users/@me";
const AVATAR_CDN: &str = "https://cdn.discordapp.com/avatars";

/// Basic profile only. No permission to post on the user's behalf.
const SCOPE: &str = "identify";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid provider url: {0}")]
    InvalidUrl(String),
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// An OAuth identity provider using the authorization-code flow.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Provider name recorded on the user row.
    fn name(&self) -> &'static str;

    /// Where to send the browser. `state` comes back on the callback.
    fn authorize_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Trade an authorization code for the caller's profile.
    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, OAuthError>;
}

// ---------------------------------------------------------------------------
// Discord
// ---------------------------------------------------------------------------

/// Discord application credentials.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

impl DiscordConfig {
    /// Load from `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET` and
    /// `DISCORD_REDIRECT_URL`. Returns `None` unless all three are set.
    pub fn from_env() -> Option<Self> {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            client_id: read("DISCORD_CLIENT_ID")?,
            client_secret: read("DISCORD_CLIENT_SECRET")?,
            redirect_url: read("DISCORD_REDIRECT_URL")?,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    global_name: Option<String>,
    avatar: Option<String>,
    email: Option<String>,
}

impl DiscordUser {
    fn into_profile(self) -> ExternalProfile {
        let avatar_url = self
            .avatar
            .as_deref()
            .map(|hash| format!("{AVATAR_CDN}/{}/{hash}.png", self.id));
        let display_name = self
            .global_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.username.clone());
        ExternalProfile {
            provider: PROVIDER_DISCORD.to_string(),
            subject: self.id,
            username: Some(self.username),
            display_name: Some(display_name),
            avatar_url,
            email: self.email,
        }
    }
}

/// Discord OAuth2 client.
pub struct DiscordProvider {
    config: DiscordConfig,
    client: reqwest::Client,
}

impl DiscordProvider {
    pub fn new(config: DiscordConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }
}

#[async_trait]
impl OAuthProvider for DiscordProvider {
    fn name(&self) -> &'static str {
        PROVIDER_DISCORD
    }

    fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("state", state),
            ],
        )
        .map_err(|e| OAuthError::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, OAuthError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OAuthError::HttpStatus(response.status().as_u16()));
        }
        let token: TokenResponse = response.json().await?;

        let response = self
            .client
            .get(PROFILE_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OAuthError::HttpStatus(response.status().as_u16()));
        }
        let user: DiscordUser = response.json().await?;

        tracing::debug!(discord_id = %user.id, "Discord profile fetched");
        Ok(user.into_profile())
    }
}
