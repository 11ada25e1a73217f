use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::organization::{CreateClubRequest, CreateFederationRequest, CreateLeagueRequest};
use crate::error::{Result, StorageError, classify_write};
use crate::models::{Club, Federation, League};

pub struct OrganizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_federations(&self) -> Result<Vec<Federation>> {
        let federations = sqlx::query_as::<_, Federation>(
            "SELECT id, code, name, country_code, created_at FROM federations ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(federations)
    }

    pub async fn find_federation(&self, id: Uuid) -> Result<Federation> {
        sqlx::query_as::<_, Federation>(
            "SELECT id, code, name, country_code, created_at FROM federations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create_federation(&self, request: &CreateFederationRequest) -> Result<Federation> {
        sqlx::query_as::<_, Federation>(
            r#"
            INSERT INTO federations (code, name, country_code)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, country_code, created_at
            "#,
        )
        .bind(&request.code)
        .bind(&request.name)
        .bind(&request.country_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                &format!("Federation with code '{}' already exists", request.code),
                "Invalid federation reference",
            )
        })
    }

    pub async fn list_leagues(&self, federation_id: Uuid) -> Result<Vec<League>> {
        let leagues = sqlx::query_as::<_, League>(
            "SELECT id, federation_id, name, region FROM leagues WHERE federation_id = $1 ORDER BY name",
        )
        .bind(federation_id)
        .fetch_all(self.pool)
        .await?;

        Ok(leagues)
    }

    pub async fn create_league(&self, request: &CreateLeagueRequest) -> Result<League> {
        sqlx::query_as::<_, League>(
            r#"
            INSERT INTO leagues (federation_id, name, region)
            VALUES ($1, $2, $3)
            RETURNING id, federation_id, name, region
            "#,
        )
        .bind(request.federation_id)
        .bind(&request.name)
        .bind(request.region.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                &format!("League '{}' already exists in this federation", request.name),
                &format!("Federation {} does not exist", request.federation_id),
            )
        })
    }

    pub async fn list_clubs(&self, league_id: Uuid) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            "SELECT id, league_id, name, code FROM clubs WHERE league_id = $1 ORDER BY name",
        )
        .bind(league_id)
        .fetch_all(self.pool)
        .await?;

        Ok(clubs)
    }

    pub async fn create_club(&self, request: &CreateClubRequest) -> Result<Club> {
        sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (league_id, name, code)
            VALUES ($1, $2, $3)
            RETURNING id, league_id, name, code
            "#,
        )
        .bind(request.league_id)
        .bind(&request.name)
        .bind(request.code.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                &format!("Club '{}' already exists in this league", request.name),
                &format!("League {} does not exist", request.league_id),
            )
        })
    }
}
