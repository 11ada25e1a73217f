use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::PaginationParams;
use crate::validation::validate_gender;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_championship_dates"))]
pub struct CreateChampionshipRequest {
    pub federation_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub type_id: Uuid,

    pub date_start: NaiveDate,

    pub date_end: NaiveDate,

    #[validate(length(min = 1, max = 255))]
    pub location: String,

    #[serde(default)]
    pub is_qualifier: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_tournament_dates"))]
pub struct CreateTournamentRequest {
    pub championship_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub date_start: NaiveDate,

    pub date_end: NaiveDate,

    #[validate(length(min = 1, max = 255))]
    pub venue: String,

    pub fees_individual_cop: Option<Decimal>,

    pub fees_foreign_usd: Option<Decimal>,

    #[serde(default)]
    pub allow_time_trials: bool,

    #[serde(default = "default_allow_claims")]
    pub allow_claims: bool,
}

fn default_allow_claims() -> bool {
    true
}

fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("invalid_dates");
        error.message = Some("dateEnd must not be before dateStart".into());
        return Err(error);
    }
    Ok(())
}

fn validate_championship_dates(request: &CreateChampionshipRequest) -> Result<(), ValidationError> {
    check_date_range(request.date_start, request.date_end)
}

fn validate_tournament_dates(request: &CreateTournamentRequest) -> Result<(), ValidationError> {
    check_date_range(request.date_start, request.date_end)
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub athlete_id: Uuid,

    pub event_id: Uuid,

    #[validate(length(max = 20))]
    pub entry_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResultRequest {
    #[validate(length(min = 1, max = 20))]
    pub time_value: String,

    #[validate(range(min = 1))]
    pub place: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub points: i32,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipListQuery {
    pub federation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct RankingQuery {
    pub year: Option<i32>,

    pub event_id: Option<Uuid>,

    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,

    pub page: Option<u32>,

    pub page_size: Option<u32>,
}

impl RankingQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }
}
