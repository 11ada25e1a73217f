use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, classify_write};
use crate::models::Sport;

pub struct SportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SportRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Sports that have not been soft-deleted.
    pub async fn list(&self) -> Result<Vec<Sport>> {
        let sports = sqlx::query_as::<_, Sport>(
            "SELECT id, name FROM sports WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn list_user_sport_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT sport_id FROM user_sports WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Replaces the user's sport selection in a single transaction.
    pub async fn replace_user_sports(&self, user_id: Uuid, sport_ids: &[Uuid]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_sports WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if !sport_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO user_sports (user_id, sport_id)
                SELECT $1, sport_id FROM UNNEST($2::uuid[]) AS t(sport_id)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(sport_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_write(e, "Deporte duplicado", "Deporte inválido"))?;
        }

        tx.commit().await?;

        Ok(())
    }
}
