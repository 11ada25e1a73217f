use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::RefreshToken;

const TOKEN_COLUMNS: &str =
    "id, user_id, token_hash, created_at, last_used_at, expires_at, revoked_at";

pub struct RefreshTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RefreshTokenRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Uuid,
        token_hash: &str,
        now: NaiveDateTime,
        expires_at: NaiveDateTime,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, created_at, last_used_at, expires_at)
            VALUES ($1, $2, $3, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(now)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Returns the row for `token_hash` when it is neither revoked nor expired.
    pub async fn find_active_by_hash(
        &self,
        token_hash: &str,
        now: NaiveDateTime,
    ) -> Result<Option<RefreshToken>> {
        let token = sqlx::query_as::<_, RefreshToken>(&format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM refresh_tokens
            WHERE token_hash = $1
              AND revoked_at IS NULL
              AND expires_at > $2
            "#
        ))
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(token)
    }

    /// Revokes `old_id` and stores `new_hash` atomically.
    ///
    /// Returns `false` when the old row was revoked concurrently, in which
    /// case nothing is written.
    pub async fn rotate(
        &self,
        old_id: Uuid,
        user_id: Uuid,
        new_hash: &str,
        now: NaiveDateTime,
        expires_at: NaiveDateTime,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2, last_used_at = $2
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(old_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if revoked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, created_at, last_used_at, expires_at)
            VALUES ($1, $2, $3, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(new_hash)
        .bind(now)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    pub async fn revoke_by_hash(&self, token_hash: &str, now: NaiveDateTime) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
