use sqlx::PgPool;
use storage::{
    dto::location::{CitiesResponse, CountriesResponse},
    error::Result,
    models::Country,
    repository::LocationRepository,
    validation::validate_country_code,
};

use crate::state::AppState;

pub async fn list_countries(pool: &PgPool) -> Result<CountriesResponse> {
    let countries = LocationRepository::new(pool).list_countries().await?;
    Ok(CountriesResponse { countries })
}

pub async fn get_country(pool: &PgPool, code: &str) -> Result<Country> {
    LocationRepository::new(pool)
        .find_country(&code.trim().to_uppercase())
        .await
}

/// City names for `country`, served from the TTL cache when possible.
///
/// Anything that is not a two-letter code has no cities and is never cached.
pub async fn list_cities(state: &AppState, country: &str) -> Result<CitiesResponse> {
    let key = country.to_uppercase();
    if validate_country_code(&key).is_err() {
        return Ok(CitiesResponse {
            country: country.to_string(),
            cities: Vec::new(),
        });
    }

    if let Some(cities) = state.city_cache.get(&key).await {
        tracing::debug!(country = %key, "City cache hit");
        return Ok(CitiesResponse {
            country: country.to_string(),
            cities,
        });
    }

    let cities = LocationRepository::new(state.db.pool())
        .list_city_names(&key)
        .await?;
    state.city_cache.insert(key, cities.clone()).await;

    Ok(CitiesResponse {
        country: country.to_string(),
        cities,
    })
}
