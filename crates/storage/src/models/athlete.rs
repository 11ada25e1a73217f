use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: i32,
    pub gender: String,
    pub club_id: Uuid,
    pub federated: bool,
    pub created_at: NaiveDateTime,
}
