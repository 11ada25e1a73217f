use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::organization::CreateAthleteRequest;
use crate::error::{Result, StorageError, classify_write};
use crate::models::Athlete;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of athletes, optionally restricted to a club, plus the total count.
    pub async fn list(
        &self,
        club_id: Option<Uuid>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Athlete>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM athletes WHERE 1=1");
        if let Some(club_id) = club_id {
            count.push(" AND club_id = ");
            count.push_bind(club_id);
        }
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT id, first_name, last_name, birth_year, gender, club_id, federated, created_at
            FROM athletes
            WHERE 1=1
            "#,
        );
        if let Some(club_id) = club_id {
            query.push(" AND club_id = ");
            query.push_bind(club_id);
        }
        query.push(" ORDER BY last_name, first_name LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let athletes = query
            .build_query_as::<Athlete>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, first_name, last_name, birth_year, gender, club_id, federated, created_at
            FROM athletes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, request: &CreateAthleteRequest) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(
            r#"
            INSERT INTO athletes (first_name, last_name, birth_year, gender, club_id, federated)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, birth_year, gender, club_id, federated, created_at
            "#,
        )
        .bind(request.first_name.trim())
        .bind(request.last_name.trim())
        .bind(request.birth_year)
        .bind(&request.gender)
        .bind(request.club_id)
        .bind(request.federated)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            classify_write(
                e,
                "Athlete already exists",
                &format!("Club {} does not exist", request.club_id),
            )
        })
    }
}
