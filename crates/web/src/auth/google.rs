//! Google OAuth 2.0 authorization-code flow.

use reqwest::Url;
use serde::Deserialize;
use storage::dto::auth::OAuthProfile;

use crate::config::GoogleConfig;
use crate::error::{AppError, ApiResult};

pub const PROVIDER: &str = "google";
pub const STATE_COOKIE: &str = "deporty_oauth_state";
pub const STATE_TTL_SECS: i64 = 10 * 60;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    given_name: Option<String>,
    family_name: Option<String>,
    name: Option<String>,
}

impl UserInfo {
    fn into_profile(self) -> ApiResult<OAuthProfile> {
        let email = self
            .email
            .ok_or_else(|| AppError::validation("Google account has no email"))?;

        let first_name = self
            .given_name
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok(OAuthProfile {
            subject: self.sub,
            email,
            email_verified: self.email_verified,
            first_name,
            last_name: self.family_name.unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn authorize_url(&self, state: &str) -> ApiResult<String> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| AppError::internal(format!("Invalid Google authorize URL: {e}")))?;

        Ok(url.into())
    }

    /// Exchanges an authorization code and fetches the user's profile.
    pub async fn exchange_code(&self, code: &str) -> ApiResult<OAuthProfile> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let info: UserInfo = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info.into_profile()
    }
}
