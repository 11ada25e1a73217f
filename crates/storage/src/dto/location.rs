use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_country_code;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CountrySummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountriesResponse {
    pub countries: Vec<CountrySummary>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CitiesQuery {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitiesResponse {
    pub country: String,
    pub cities: Vec<String>,
}

/// Onboarding payload: the caller's country and city.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    /// Accepted for compatibility; must match the authenticated user.
    pub user_id: Option<Uuid>,

    #[serde(default)]
    #[validate(custom(function = "validate_country_code", message = "Pais invalido"))]
    pub country_code: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Ciudad invalida"))]
    pub city: String,
}
