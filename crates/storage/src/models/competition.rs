use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A swimming event such as "100m Libre" for a given gender.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionEvent {
    pub id: Uuid,
    pub name: String,
    pub style: String,
    pub distance_m: i32,
    pub event_type: String,
    pub relay_swimmers: Option<i32>,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipType {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Championship {
    pub id: Uuid,
    pub federation_id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub location: String,
    pub is_qualifier: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub championship_id: Uuid,
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub venue: String,
    pub fees_individual_cop: Option<Decimal>,
    pub fees_foreign_usd: Option<Decimal>,
    pub allow_time_trials: bool,
    pub allow_claims: bool,
}

/// An athlete's registration for one event of a tournament.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub event_id: Uuid,
    pub tournament_id: Uuid,
    pub entry_time: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResult {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub time_value: String,
    pub place: i32,
    pub points: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub id: Uuid,
    pub year: i32,
    pub event_id: Uuid,
    pub category_id: Option<Uuid>,
    pub age_group_id: Option<Uuid>,
    pub gender: String,
    pub position: i32,
    pub athlete_id: Uuid,
    pub athlete_name: String,
    pub time_value: String,
}
