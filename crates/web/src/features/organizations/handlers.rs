use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use storage::{
    dto::{
        common::PaginatedResponse,
        organization::{
            AthleteListQuery, CreateAthleteRequest, CreateClubRequest, CreateFederationRequest,
            CreateLeagueRequest,
        },
    },
    models::{Athlete, Club, Federation, League},
    repository::{AthleteRepository, OrganizationRepository},
};
use uuid::Uuid;
use validator::Validate;

use super::services;
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/federations",
    responses(
        (status = 200, description = "All federations", body = Vec<Federation>)
    ),
    tag = "organizations"
)]
pub async fn list_federations(State(state): State<AppState>) -> ApiResult<Json<Vec<Federation>>> {
    let federations = OrganizationRepository::new(state.db.pool())
        .list_federations()
        .await?;
    Ok(Json(federations))
}

#[utoipa::path(
    get,
    path = "/api/federations/{id}",
    params(
        ("id" = Uuid, Path, description = "Federation id")
    ),
    responses(
        (status = 200, description = "Federation", body = Federation),
        (status = 404, description = "Federation not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn get_federation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Federation>> {
    let federation = OrganizationRepository::new(state.db.pool())
        .find_federation(id)
        .await?;
    Ok(Json(federation))
}

#[utoipa::path(
    post,
    path = "/api/federations",
    request_body = CreateFederationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Federation created", body = Federation),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Code already used", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_federation(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateFederationRequest>,
) -> ApiResult<(StatusCode, Json<Federation>)> {
    req.validate()?;

    let federation = services::create_federation(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(federation)))
}

#[utoipa::path(
    get,
    path = "/api/federations/{id}/leagues",
    params(
        ("id" = Uuid, Path, description = "Federation id")
    ),
    responses(
        (status = 200, description = "Leagues of the federation", body = Vec<League>),
        (status = 404, description = "Federation not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn list_leagues(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<League>>> {
    Ok(Json(services::list_leagues(state.db.pool(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/leagues",
    request_body = CreateLeagueRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "League created", body = League),
        (status = 400, description = "Validation error or unknown federation", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_league(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateLeagueRequest>,
) -> ApiResult<(StatusCode, Json<League>)> {
    req.validate()?;

    let league = services::create_league(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(league)))
}

#[utoipa::path(
    get,
    path = "/api/leagues/{id}/clubs",
    params(
        ("id" = Uuid, Path, description = "League id")
    ),
    responses(
        (status = 200, description = "Clubs of the league", body = Vec<Club>)
    ),
    tag = "organizations"
)]
pub async fn list_clubs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Club>>> {
    let clubs = OrganizationRepository::new(state.db.pool())
        .list_clubs(id)
        .await?;
    Ok(Json(clubs))
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Club created", body = Club),
        (status = 400, description = "Validation error or unknown league", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_club(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateClubRequest>,
) -> ApiResult<(StatusCode, Json<Club>)> {
    req.validate()?;

    let club = services::create_club(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

#[utoipa::path(
    get,
    path = "/api/athletes",
    params(AthleteListQuery),
    responses(
        (status = 200, description = "One page of athletes", body = PaginatedResponse<Athlete>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AthleteListQuery>,
) -> ApiResult<Json<PaginatedResponse<Athlete>>> {
    Ok(Json(services::list_athletes(state.db.pool(), &query).await?))
}

#[utoipa::path(
    get,
    path = "/api/athletes/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete", body = Athlete),
        (status = 404, description = "Athlete not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Athlete>> {
    let athlete = AthleteRepository::new(state.db.pool()).find_by_id(id).await?;
    Ok(Json(athlete))
}

#[utoipa::path(
    post,
    path = "/api/athletes",
    request_body = CreateAthleteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Athlete created", body = Athlete),
        (status = 400, description = "Validation error or unknown club", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_athlete(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateAthleteRequest>,
) -> ApiResult<(StatusCode, Json<Athlete>)> {
    req.validate()?;

    let athlete = services::create_athlete(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(athlete)))
}
