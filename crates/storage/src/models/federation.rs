use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Federation {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub country_code: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: Uuid,
    pub federation_id: Uuid,
    pub name: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub code: Option<String>,
}
