use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginatedResponse,
        tournament::{
            CreateChampionshipRequest, CreateEntryRequest, CreateTournamentRequest, RankingQuery,
            RecordResultRequest,
        },
    },
    models::{Championship, Entry, EntryResult, Ranking, Tournament},
    repository::{RankingRepository, TournamentRepository},
};
use uuid::Uuid;

use crate::error::{AppError, ApiResult};

pub async fn create_championship(
    pool: &PgPool,
    request: &CreateChampionshipRequest,
) -> ApiResult<Championship> {
    let championship = TournamentRepository::new(pool)
        .create_championship(request)
        .await?;
    tracing::info!(
        championship_id = %championship.id,
        federation_id = %championship.federation_id,
        "Championship created"
    );
    Ok(championship)
}

pub async fn list_tournaments(pool: &PgPool, championship_id: Uuid) -> ApiResult<Vec<Tournament>> {
    let repository = TournamentRepository::new(pool);
    repository.find_championship(championship_id).await?;
    Ok(repository.list_tournaments(championship_id).await?)
}

pub async fn create_tournament(
    pool: &PgPool,
    request: &CreateTournamentRequest,
) -> ApiResult<Tournament> {
    let tournament = TournamentRepository::new(pool)
        .create_tournament(request)
        .await?;
    tracing::info!(
        tournament_id = %tournament.id,
        championship_id = %tournament.championship_id,
        "Tournament created"
    );
    Ok(tournament)
}

pub async fn list_entries(pool: &PgPool, tournament_id: Uuid) -> ApiResult<Vec<Entry>> {
    let repository = TournamentRepository::new(pool);
    repository.find_tournament(tournament_id).await?;
    Ok(repository.list_entries(tournament_id).await?)
}

pub async fn register_entry(
    pool: &PgPool,
    tournament_id: Uuid,
    request: &CreateEntryRequest,
    registered_by: Uuid,
) -> ApiResult<Entry> {
    let repository = TournamentRepository::new(pool);
    repository.find_tournament(tournament_id).await?;

    let entry = repository.create_entry(tournament_id, request).await?;
    tracing::info!(
        entry_id = %entry.id,
        tournament_id = %tournament_id,
        athlete_id = %entry.athlete_id,
        registered_by = %registered_by,
        "Entry registered"
    );
    Ok(entry)
}

pub async fn record_result(
    pool: &PgPool,
    entry_id: Uuid,
    request: &RecordResultRequest,
) -> ApiResult<EntryResult> {
    let result = TournamentRepository::new(pool)
        .record_result(entry_id, request)
        .await?;
    tracing::info!(entry_id = %entry_id, place = result.place, "Result recorded");
    Ok(result)
}

pub async fn list_rankings(
    pool: &PgPool,
    query: &RankingQuery,
) -> ApiResult<PaginatedResponse<Ranking>> {
    let pagination = query.pagination();
    pagination.validate().map_err(AppError::validation)?;

    let (rankings, total) = RankingRepository::new(pool).list(query).await?;

    Ok(PaginatedResponse::new(rankings, &pagination, total))
}
