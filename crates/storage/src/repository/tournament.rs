use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::tournament::{
    CreateChampionshipRequest, CreateEntryRequest, CreateTournamentRequest, RecordResultRequest,
};
use crate::error::{Result, StorageError, classify_write};
use crate::models::{
    Championship, ChampionshipType, CompetitionEvent, Entry, EntryResult, Tournament,
};

const CHAMPIONSHIP_COLUMNS: &str =
    "id, federation_id, name, type_id, date_start, date_end, location, is_qualifier";

const TOURNAMENT_COLUMNS: &str = "id, championship_id, name, date_start, date_end, venue, \
     fees_individual_cop, fees_foreign_usd, allow_time_trials, allow_claims";

const ENTRY_COLUMNS: &str =
    "id, athlete_id, event_id, tournament_id, entry_time, status, created_at";

pub struct TournamentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TournamentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_championship_types(&self) -> Result<Vec<ChampionshipType>> {
        let types = sqlx::query_as::<_, ChampionshipType>(
            "SELECT id, code, name FROM championship_types ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(types)
    }

    /// Swimming events (distance, style, gender) that entries refer to.
    pub async fn list_competition_events(&self) -> Result<Vec<CompetitionEvent>> {
        let events = sqlx::query_as::<_, CompetitionEvent>(
            r#"
            SELECT id, name, style, distance_m, event_type, relay_swimmers, gender
            FROM events
            ORDER BY event_type, distance_m, style, gender
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Championships, newest first, optionally for a single federation.
    pub async fn list_championships(&self, federation_id: Option<Uuid>) -> Result<Vec<Championship>> {
        let championships = sqlx::query_as::<_, Championship>(&format!(
            r#"
            SELECT {CHAMPIONSHIP_COLUMNS}
            FROM championships
            WHERE $1::uuid IS NULL OR federation_id = $1
            ORDER BY date_start DESC, name
            "#
        ))
        .bind(federation_id)
        .fetch_all(self.pool)
        .await?;

        Ok(championships)
    }

    pub async fn find_championship(&self, id: Uuid) -> Result<Championship> {
        sqlx::query_as::<_, Championship>(&format!(
            "SELECT {CHAMPIONSHIP_COLUMNS} FROM championships WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create_championship(
        &self,
        request: &CreateChampionshipRequest,
    ) -> Result<Championship> {
        sqlx::query_as::<_, Championship>(&format!(
            r#"
            INSERT INTO championships (federation_id, name, type_id, date_start, date_end, location, is_qualifier)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CHAMPIONSHIP_COLUMNS}
            "#
        ))
        .bind(request.federation_id)
        .bind(&request.name)
        .bind(request.type_id)
        .bind(request.date_start)
        .bind(request.date_end)
        .bind(&request.location)
        .bind(request.is_qualifier)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                &format!("Championship '{}' already exists on that date", request.name),
                "Unknown federation or championship type",
            )
        })
    }

    pub async fn list_tournaments(&self, championship_id: Uuid) -> Result<Vec<Tournament>> {
        let tournaments = sqlx::query_as::<_, Tournament>(&format!(
            r#"
            SELECT {TOURNAMENT_COLUMNS}
            FROM tournaments
            WHERE championship_id = $1
            ORDER BY date_start, name
            "#
        ))
        .bind(championship_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tournaments)
    }

    pub async fn find_tournament(&self, id: Uuid) -> Result<Tournament> {
        sqlx::query_as::<_, Tournament>(&format!(
            "SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create_tournament(&self, request: &CreateTournamentRequest) -> Result<Tournament> {
        sqlx::query_as::<_, Tournament>(&format!(
            r#"
            INSERT INTO tournaments (
                championship_id, name, date_start, date_end, venue,
                fees_individual_cop, fees_foreign_usd, allow_time_trials, allow_claims
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TOURNAMENT_COLUMNS}
            "#
        ))
        .bind(request.championship_id)
        .bind(&request.name)
        .bind(request.date_start)
        .bind(request.date_end)
        .bind(&request.venue)
        .bind(request.fees_individual_cop)
        .bind(request.fees_foreign_usd)
        .bind(request.allow_time_trials)
        .bind(request.allow_claims)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                &format!("Tournament '{}' already exists on that date", request.name),
                &format!("Championship {} does not exist", request.championship_id),
            )
        })
    }

    pub async fn list_entries(&self, tournament_id: Uuid) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE tournament_id = $1 ORDER BY created_at"
        ))
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn create_entry(
        &self,
        tournament_id: Uuid,
        request: &CreateEntryRequest,
    ) -> Result<Entry> {
        sqlx::query_as::<_, Entry>(&format!(
            r#"
            INSERT INTO entries (athlete_id, event_id, tournament_id, entry_time)
            VALUES ($1, $2, $3, $4)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(request.athlete_id)
        .bind(request.event_id)
        .bind(tournament_id)
        .bind(request.entry_time.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                "Athlete is already registered for this event",
                "Unknown athlete, event or tournament",
            )
        })
    }

    /// Stores the single result of an entry and marks the entry as swum.
    pub async fn record_result(
        &self,
        entry_id: Uuid,
        request: &RecordResultRequest,
    ) -> Result<EntryResult> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query_as::<_, EntryResult>(
            r#"
            INSERT INTO results (entry_id, time_value, place, points)
            VALUES ($1, $2, $3, $4)
            RETURNING id, entry_id, time_value, place, points, created_at
            "#,
        )
        .bind(entry_id)
        .bind(&request.time_value)
        .bind(request.place)
        .bind(request.points)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            classify_write(
                e,
                "This entry already has a result",
                &format!("Entry {entry_id} does not exist"),
            )
        })?;

        sqlx::query("UPDATE entries SET status = 'completed' WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result)
    }
}
