use anyhow::{Context, Result};

const DEFAULT_CITY_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_CITY_RATE_LIMIT_PER_MINUTE: u32 = 60;

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub app_env: String,
    pub public_origin: String,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub google: Option<GoogleConfig>,
    pub city_cache_ttl_secs: u64,
    pub city_rate_limit_per_minute: u32,
    /// Key rate limits on `X-Forwarded-For`; only safe behind a proxy that sets it.
    pub trust_forwarded_for: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = optional("PORT").unwrap_or_else(|| "3000".to_string());
        let public_origin = optional("PUBLIC_ORIGIN")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: port.parse().context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            jwt_secret: std::env::var("JWT_SECRET").context("Cannot load JWT_SECRET env variable")?,
            app_env: optional("APP_ENV").unwrap_or_else(|| "production".to_string()),
            public_origin: public_origin.trim_end_matches('/').to_string(),
            resend_api_key: optional("RESEND_API_KEY"),
            mail_from: optional("MAIL_FROM")
                .unwrap_or_else(|| "Deporty <no-reply@deporty.app>".to_string()),
            google: google_from_env(),
            city_cache_ttl_secs: match optional("CITY_CACHE_TTL_SECS") {
                Some(value) => value.parse().context("CITY_CACHE_TTL_SECS must be a number")?,
                None => DEFAULT_CITY_CACHE_TTL_SECS,
            },
            city_rate_limit_per_minute: match optional("CITY_RATE_LIMIT_PER_MINUTE") {
                Some(value) => value
                    .parse()
                    .context("CITY_RATE_LIMIT_PER_MINUTE must be a number")?,
                None => DEFAULT_CITY_RATE_LIMIT_PER_MINUTE,
            },
            trust_forwarded_for: optional("TRUST_FORWARDED_FOR")
                .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        })
    }

    /// Configuration for tests and tooling that never touches the environment.
    pub fn for_development(database_url: &str, jwt_secret: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: database_url.to_string(),
            jwt_secret: jwt_secret.to_string(),
            app_env: "development".to_string(),
            public_origin: "http://localhost:3000".to_string(),
            resend_api_key: None,
            mail_from: "Deporty <no-reply@deporty.app>".to_string(),
            google: None,
            city_cache_ttl_secs: DEFAULT_CITY_CACHE_TTL_SECS,
            city_rate_limit_per_minute: DEFAULT_CITY_RATE_LIMIT_PER_MINUTE,
            trust_forwarded_for: false,
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn google_from_env() -> Option<GoogleConfig> {
    let client_id = optional("GOOGLE_CLIENT_ID")?;
    let client_secret = optional("GOOGLE_CLIENT_SECRET")?;
    let redirect_url = optional("GOOGLE_REDIRECT_URL")?;

    Some(GoogleConfig {
        client_id,
        client_secret,
        redirect_url,
    })
}
