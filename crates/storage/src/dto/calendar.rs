use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::services::calendar::{AdjustedEvent, DayCell};
use crate::validation::validate_hex_color;

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventsQuery {
    #[validate(range(min = 1, max = 9999))]
    pub year: Option<i32>,
    pub country_code: Option<String>,
    pub city_id: Option<Uuid>,
    pub sport_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGridQuery {
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    pub month: u32,
    pub country_code: Option<String>,
    pub city_id: Option<Uuid>,
    pub sport_id: Option<Uuid>,
}

impl CalendarGridQuery {
    pub fn filters(&self) -> CalendarEventsQuery {
        CalendarEventsQuery {
            year: Some(self.year),
            country_code: self.country_code.clone(),
            city_id: self.city_id,
            sport_id: self.sport_id,
        }
    }
}

/// Admin payload for a new calendar event.
///
/// Dates are kept as text so both `YYYY-MM-DD` and `DD/MM/YYYY` are accepted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarEventRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "missing_fields"))]
    pub name: String,

    pub sport_id: Option<Uuid>,

    pub city_id: Option<Uuid>,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "missing_fields"))]
    pub reference_start: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "missing_fields"))]
    pub reference_end: String,

    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarEventsResponse {
    pub year: i32,
    pub events: Vec<AdjustedEvent>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarGridResponse {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
    pub events: Vec<AdjustedEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(year: i32) -> CalendarGridQuery {
        CalendarGridQuery {
            year,
            month: 1,
            country_code: None,
            city_id: None,
            sport_id: None,
        }
    }

    #[test]
    fn test_calendar_year_bounds() {
        assert!(grid(2025).validate().is_ok());
        assert!(grid(9999).validate().is_ok());
        assert!(grid(0).validate().is_err());
        assert!(grid(262_142).validate().is_err());

        let events = CalendarEventsQuery {
            year: Some(-5),
            ..Default::default()
        };
        assert!(events.validate().is_err());
        assert!(CalendarEventsQuery::default().validate().is_ok());
    }
}
