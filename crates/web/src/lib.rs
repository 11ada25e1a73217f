pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod mailer;
pub mod middleware;
pub mod openapi;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use error::AppError;
use openapi::ApiDoc;
use state::AppState;

/// CORS for the web client. Credentials are allowed, so the origin is
/// always explicit.
fn cors_layer(public_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    match HeaderValue::from_str(public_origin.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %public_origin, "Invalid PUBLIC_ORIGIN, cross-origin requests disabled");
            cors
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", features::auth::routes::routes(state.clone()))
        .nest("/locations", features::locations::routes::routes())
        .nest("/users", features::users::routes::routes(state.clone()))
        .nest("/calendar", features::calendar::routes::routes(state.clone()))
        .nest("/sports", features::sports::routes::routes())
        .nest("/health", features::health::routes::routes())
        .merge(features::organizations::routes::routes(state.clone()))
        .merge(features::tournaments::routes::routes(state.clone()));

    Router::new()
        .nest("/api", api)
        .merge(features::sitemap::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { AppError::not_found("Route") })
        .layer(cors_layer(&state.config.public_origin))
        .layer(from_fn(middleware::security::security_headers))
        .with_state(state)
}
