use sqlx::PgPool;
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

use crate::error::{AppError, ApiResult};

pub async fn create_federation(
    pool: &PgPool,
    request: &CreateFederationRequest,
) -> ApiResult<Federation> {
    let federation = OrganizationRepository::new(pool)
        .create_federation(request)
        .await?;
    tracing::info!(federation_id = %federation.id, code = %federation.code, "Federation created");
    Ok(federation)
}

/// Leagues of a federation; an unknown federation is a 404 rather than an empty list.
pub async fn list_leagues(pool: &PgPool, federation_id: Uuid) -> ApiResult<Vec<League>> {
    let repository = OrganizationRepository::new(pool);
    repository.find_federation(federation_id).await?;
    Ok(repository.list_leagues(federation_id).await?)
}

pub async fn create_league(pool: &PgPool, request: &CreateLeagueRequest) -> ApiResult<League> {
    let league = OrganizationRepository::new(pool).create_league(request).await?;
    tracing::info!(league_id = %league.id, federation_id = %league.federation_id, "League created");
    Ok(league)
}

pub async fn create_club(pool: &PgPool, request: &CreateClubRequest) -> ApiResult<Club> {
    let club = OrganizationRepository::new(pool).create_club(request).await?;
    tracing::info!(club_id = %club.id, league_id = %club.league_id, "Club created");
    Ok(club)
}

pub async fn list_athletes(
    pool: &PgPool,
    query: &AthleteListQuery,
) -> ApiResult<PaginatedResponse<Athlete>> {
    let pagination = query.pagination();
    pagination.validate().map_err(AppError::validation)?;

    let (athletes, total) = AthleteRepository::new(pool)
        .list(query.club_id, &pagination)
        .await?;

    Ok(PaginatedResponse::new(athletes, &pagination, total))
}

pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> ApiResult<Athlete> {
    let athlete = AthleteRepository::new(pool).create(request).await?;
    tracing::info!(athlete_id = %athlete.id, club_id = %athlete.club_id, "Athlete created");
    Ok(athlete)
}
