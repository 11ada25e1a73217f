use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use storage::{
    dto::{
        auth::SessionUser,
        calendar::{
            CalendarEventsQuery, CalendarEventsResponse, CalendarGridQuery, CalendarGridResponse,
            CreateCalendarEventRequest,
        },
    },
    models::CalendarEvent,
};
use uuid::Uuid;
use validator::Validate;

use super::services;
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/calendar/events",
    params(CalendarEventsQuery),
    responses(
        (status = 200, description = "Events moved into the requested year", body = CalendarEventsResponse),
        (status = 400, description = "Year outside 1..=9999", body = ErrorResponse)
    ),
    tag = "calendar"
)]
pub async fn list_events(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CalendarEventsQuery>,
) -> ApiResult<Json<CalendarEventsResponse>> {
    query.validate()?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    Ok(Json(
        services::list_events(state.db.pool(), query, year).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/calendar/grid",
    params(CalendarGridQuery),
    responses(
        (status = 200, description = "Monday-first weeks of the month", body = CalendarGridResponse),
        (status = 400, description = "Month outside 1..=12 or year outside 1..=9999", body = ErrorResponse)
    ),
    tag = "calendar"
)]
pub async fn month_grid(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CalendarGridQuery>,
) -> ApiResult<Json<CalendarGridResponse>> {
    query.validate()?;
    Ok(Json(services::month_grid(state.db.pool(), &query).await?))
}

#[utoipa::path(
    post,
    path = "/api/calendar/events",
    request_body = CreateCalendarEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created", body = CalendarEvent),
        (status = 400, description = "missing_fields or invalid_dates", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "calendar"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    AppJson(req): AppJson<CreateCalendarEventRequest>,
) -> ApiResult<(StatusCode, Json<CalendarEvent>)> {
    req.validate()?;

    let event = services::create_event(state.db.pool(), &req, user.id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/calendar/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Calendar event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 403, description = "Not the creator of the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "calendar"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete_event(state.db.pool(), id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
