use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Localization settings for a supported country.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    pub locale: String,
    pub language: String,
    pub timezone: String,
    pub currency: String,
    pub currency_symbol: String,
    pub phone_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: Uuid,
    pub country_code: String,
    pub name: String,
}
