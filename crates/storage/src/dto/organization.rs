use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::PaginationParams;
use crate::validation::{validate_country_code, validate_gender};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFederationRequest {
    #[validate(length(min = 1, max = 50, message = "Code must be between 1 and 50 characters"))]
    pub code: String,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[serde(default = "default_country")]
    #[validate(custom(function = "validate_country_code"))]
    pub country_code: String,
}

fn default_country() -> String {
    "CO".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueRequest {
    pub federation_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 255))]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    pub league_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 50))]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAthleteRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(range(min = 1900, max = 2100, message = "Invalid birth year"))]
    pub birth_year: i32,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    pub club_id: Uuid,

    #[serde(default)]
    pub federated: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AthleteListQuery {
    pub club_id: Option<Uuid>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AthleteListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_athlete_request_rejects_unknown_gender() {
        let request = CreateAthleteRequest {
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            birth_year: 2010,
            gender: "X".to_string(),
            club_id: Uuid::new_v4(),
            federated: false,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("gender"));
    }

    #[test]
    fn test_federation_defaults_to_colombia() {
        let request: CreateFederationRequest =
            serde_json::from_str(r#"{"code":"FECNA","name":"Federación Colombiana de Natación"}"#)
                .unwrap();
        assert_eq!(request.country_code, "CO");
        assert!(request.validate().is_ok());
    }
}
