use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::calendar::{
        CalendarEventsQuery, CalendarEventsResponse, CalendarGridQuery, CalendarGridResponse,
        CreateCalendarEventRequest,
    },
    models::CalendarEvent,
    repository::{CalendarRepository, NewCalendarEvent},
    services::calendar::{
        AdjustedEvent, DEFAULT_EVENT_COLOR, adjust_event_to_year, calendar_grid,
        parse_reference_date,
    },
};
use uuid::Uuid;

use crate::error::{AppError, ApiResult};

async fn adjusted_events(
    pool: &PgPool,
    filter: &CalendarEventsQuery,
    year: i32,
) -> ApiResult<Vec<AdjustedEvent>> {
    let events = CalendarRepository::new(pool).list(filter).await?;

    let mut adjusted: Vec<AdjustedEvent> = events
        .iter()
        .map(|event| adjust_event_to_year(event, year))
        .collect();
    adjusted.sort_by_key(|event| event.adjusted_start);

    Ok(adjusted)
}

pub async fn list_events(
    pool: &PgPool,
    mut filter: CalendarEventsQuery,
    year: i32,
) -> ApiResult<CalendarEventsResponse> {
    filter.year = Some(year);
    let events = adjusted_events(pool, &filter, year).await?;

    Ok(CalendarEventsResponse { year, events })
}

pub async fn month_grid(pool: &PgPool, query: &CalendarGridQuery) -> ApiResult<CalendarGridResponse> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::validation("month must be between 1 and 12"));
    }

    let events = adjusted_events(pool, &query.filters(), query.year).await?;
    let weeks = calendar_grid(query.year, query.month, &events)
        .ok_or_else(|| AppError::validation("Invalid year or month"))?;

    Ok(CalendarGridResponse {
        year: query.year,
        month: query.month,
        weeks,
        events,
    })
}

/// Parsed and checked dates of a new event.
pub fn reference_range(start: &str, end: &str) -> ApiResult<(NaiveDate, NaiveDate)> {
    let (Some(start), Some(end)) = (parse_reference_date(start), parse_reference_date(end)) else {
        return Err(AppError::validation("invalid_dates"));
    };

    if end < start {
        return Err(AppError::validation("invalid_dates"));
    }

    Ok((start, end))
}

pub async fn create_event(
    pool: &PgPool,
    request: &CreateCalendarEventRequest,
    created_by: Uuid,
) -> ApiResult<CalendarEvent> {
    let (Some(sport_id), Some(city_id)) = (request.sport_id, request.city_id) else {
        return Err(AppError::validation("missing_fields"));
    };

    let (reference_start, reference_end) =
        reference_range(&request.reference_start, &request.reference_end)?;

    let event = CalendarRepository::new(pool)
        .create(&NewCalendarEvent {
            name: request.name.trim(),
            sport_id,
            city_id,
            color: request.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR),
            reference_start,
            reference_end,
            is_recurring: request.is_recurring,
            created_by,
        })
        .await?;

    tracing::info!(event_id = %event.id, created_by = %created_by, "Calendar event created");
    Ok(event)
}

pub async fn delete_event(pool: &PgPool, id: Uuid, owner: Uuid) -> ApiResult<()> {
    let repository = CalendarRepository::new(pool);

    // 404 for unknown ids, 403 for events created by someone else.
    repository.find_by_id(id).await?;
    if !repository.soft_delete_owned(id, owner).await? {
        return Err(AppError::forbidden("forbidden"));
    }

    tracing::info!(event_id = %id, "Calendar event deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_range_accepts_both_formats() {
        let (start, end) = reference_range("16/01/2025", "2025-01-19").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
    }

    #[test]
    fn test_reference_range_rejects_inverted_dates() {
        let error = reference_range("2025-01-19", "2025-01-16").unwrap_err();
        assert_eq!(error.to_string(), "invalid_dates");
    }

    #[test]
    fn test_reference_range_rejects_garbage() {
        assert!(reference_range("soon", "2025-01-16").is_err());
    }
}
