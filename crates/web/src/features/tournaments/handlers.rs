use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use storage::{
    dto::{
        auth::SessionUser,
        common::PaginatedResponse,
        tournament::{
            ChampionshipListQuery, CreateChampionshipRequest, CreateEntryRequest,
            CreateTournamentRequest, RankingQuery, RecordResultRequest,
        },
    },
    models::{
        Championship, ChampionshipType, CompetitionEvent, Entry, EntryResult, Ranking, Tournament,
    },
    repository::TournamentRepository,
};
use uuid::Uuid;
use validator::Validate;

use super::services;
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/championship-types",
    responses(
        (status = 200, description = "Championship types", body = Vec<ChampionshipType>)
    ),
    tag = "tournaments"
)]
pub async fn list_championship_types(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ChampionshipType>>> {
    let types = TournamentRepository::new(state.db.pool())
        .list_championship_types()
        .await?;
    Ok(Json(types))
}

#[utoipa::path(
    get,
    path = "/api/competition-events",
    responses(
        (status = 200, description = "Events athletes can be entered in", body = Vec<CompetitionEvent>)
    ),
    tag = "tournaments"
)]
pub async fn list_competition_events(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CompetitionEvent>>> {
    let events = TournamentRepository::new(state.db.pool())
        .list_competition_events()
        .await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/championships",
    params(ChampionshipListQuery),
    responses(
        (status = 200, description = "Championships, newest first", body = Vec<Championship>)
    ),
    tag = "tournaments"
)]
pub async fn list_championships(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ChampionshipListQuery>,
) -> ApiResult<Json<Vec<Championship>>> {
    let championships = TournamentRepository::new(state.db.pool())
        .list_championships(query.federation_id)
        .await?;
    Ok(Json(championships))
}

#[utoipa::path(
    get,
    path = "/api/championships/{id}",
    params(
        ("id" = Uuid, Path, description = "Championship id")
    ),
    responses(
        (status = 200, description = "Championship", body = Championship),
        (status = 404, description = "Championship not found", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn get_championship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Championship>> {
    let championship = TournamentRepository::new(state.db.pool())
        .find_championship(id)
        .await?;
    Ok(Json(championship))
}

#[utoipa::path(
    post,
    path = "/api/championships",
    request_body = CreateChampionshipRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Championship created", body = Championship),
        (status = 400, description = "Validation error or dateEnd before dateStart", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Championship already exists", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn create_championship(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateChampionshipRequest>,
) -> ApiResult<(StatusCode, Json<Championship>)> {
    req.validate()?;

    let championship = services::create_championship(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(championship)))
}

#[utoipa::path(
    get,
    path = "/api/championships/{id}/tournaments",
    params(
        ("id" = Uuid, Path, description = "Championship id")
    ),
    responses(
        (status = 200, description = "Tournaments of the championship", body = Vec<Tournament>),
        (status = 404, description = "Championship not found", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn list_tournaments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Tournament>>> {
    Ok(Json(services::list_tournaments(state.db.pool(), id).await?))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/{id}",
    params(
        ("id" = Uuid, Path, description = "Tournament id")
    ),
    responses(
        (status = 200, description = "Tournament", body = Tournament),
        (status = 404, description = "Tournament not found", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Tournament>> {
    let tournament = TournamentRepository::new(state.db.pool())
        .find_tournament(id)
        .await?;
    Ok(Json(tournament))
}

#[utoipa::path(
    post,
    path = "/api/tournaments",
    request_body = CreateTournamentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Tournament created", body = Tournament),
        (status = 400, description = "Validation error or dateEnd before dateStart", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Tournament already exists", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn create_tournament(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTournamentRequest>,
) -> ApiResult<(StatusCode, Json<Tournament>)> {
    req.validate()?;

    let tournament = services::create_tournament(state.db.pool(), &req).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Tournament id")
    ),
    responses(
        (status = 200, description = "Entries of the tournament", body = Vec<Entry>),
        (status = 404, description = "Tournament not found", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Entry>>> {
    Ok(Json(services::list_entries(state.db.pool(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Tournament id")
    ),
    request_body = CreateEntryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Entry registered", body = Entry),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
        (status = 409, description = "Athlete already registered for the event", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    req.validate()?;

    let entry = services::register_entry(state.db.pool(), id, &req, user.id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    post,
    path = "/api/entries/{id}/result",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    request_body = RecordResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Result recorded", body = EntryResult),
        (status = 400, description = "Validation error or unknown entry", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Entry already has a result", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<RecordResultRequest>,
) -> ApiResult<(StatusCode, Json<EntryResult>)> {
    req.validate()?;

    let result = services::record_result(state.db.pool(), id, &req).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(RankingQuery),
    responses(
        (status = 200, description = "Ranking positions, best first", body = PaginatedResponse<Ranking>),
        (status = 400, description = "Invalid filter or pagination", body = ErrorResponse)
    ),
    tag = "tournaments"
)]
pub async fn list_rankings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RankingQuery>,
) -> ApiResult<Json<PaginatedResponse<Ranking>>> {
    query.validate()?;

    Ok(Json(services::list_rankings(state.db.pool(), &query).await?))
}
