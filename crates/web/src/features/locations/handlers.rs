use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
};
use storage::{
    dto::location::{CitiesQuery, CitiesResponse, CountriesResponse},
    models::Country,
};

use super::services;
use crate::error::{AppError, ApiResult, ErrorResponse};
use crate::extract::AppQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/locations/countries",
    responses(
        (status = 200, description = "Countries ordered by name", body = CountriesResponse)
    ),
    tag = "locations"
)]
pub async fn list_countries(State(state): State<AppState>) -> ApiResult<Json<CountriesResponse>> {
    Ok(Json(services::list_countries(state.db.pool()).await?))
}

#[utoipa::path(
    get,
    path = "/api/locations/countries/{code}",
    params(
        ("code" = String, Path, description = "ISO 3166-1 alpha-2 country code")
    ),
    responses(
        (status = 200, description = "Country configuration", body = Country),
        (status = 404, description = "Country not found", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Country>> {
    Ok(Json(services::get_country(state.db.pool(), &code).await?))
}

#[utoipa::path(
    get,
    path = "/api/locations/cities",
    params(CitiesQuery),
    responses(
        (status = 200, description = "City names of the country", body = CitiesResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn list_cities(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<CitiesQuery>,
) -> ApiResult<Json<CitiesResponse>> {
    let country = query.country.as_deref().map(str::trim).unwrap_or_default();
    if country.is_empty() {
        return Ok(Json(CitiesResponse {
            country: String::new(),
            cities: Vec::new(),
        }));
    }

    let client = client_key(
        &headers,
        connect_info.map(|ConnectInfo(addr)| addr),
        state.config.trust_forwarded_for,
    );
    if !state.city_limiter.allow(&client).await {
        tracing::warn!(client = %client, "City lookup rate limited");
        return Err(AppError::rate_limit());
    }

    Ok(Json(services::list_cities(&state, country).await?))
}

/// First `X-Forwarded-For` hop when the proxy is trusted, else the peer address.
fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> String {
    headers
        .get("x-forwarded-for")
        .filter(|_| trust_forwarded)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
