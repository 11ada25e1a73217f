use std::sync::Arc;
use std::time::{Duration, Instant};

use storage::Database;

use crate::auth::{google::GoogleClient, jwt::JwtKeys};
use crate::cache::{RateLimitConfig, RateLimiter, TtlCache};
use crate::config::Config;
use crate::mailer::Mailer;

/// Shared handles cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub jwt: JwtKeys,
    pub city_cache: Arc<TtlCache<String, Vec<String>>>,
    pub city_limiter: Arc<RateLimiter>,
    pub mailer: Mailer,
    pub google: Option<GoogleClient>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let jwt = JwtKeys::new(&config.jwt_secret);
        let city_cache = TtlCache::new(Duration::from_secs(config.city_cache_ttl_secs));
        let city_limiter =
            RateLimiter::new(RateLimitConfig::per_minute(config.city_rate_limit_per_minute));
        let mailer = Mailer::new(config.resend_api_key.clone(), config.mail_from.clone());
        let google = config.google.clone().map(GoogleClient::new);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            city_cache: Arc::new(city_cache),
            city_limiter: Arc::new(city_limiter),
            mailer,
            google,
            started_at: Instant::now(),
        }
    }

    /// Cookies carry `Secure` everywhere except development.
    pub fn secure_cookies(&self) -> bool {
        !self.config.is_development()
    }
}
