use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A calendar entry anchored on its reference year.
///
/// `start_day_of_week` and `end_day_of_week` use 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub name: String,
    pub sport_id: Uuid,
    pub sport_name: Option<String>,
    pub city_id: Uuid,
    pub city_name: Option<String>,
    pub country_code: Option<String>,
    pub color: String,
    pub reference_start: NaiveDate,
    pub reference_end: NaiveDate,
    pub start_day_of_week: i16,
    pub end_day_of_week: i16,
    pub is_recurring: bool,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}
