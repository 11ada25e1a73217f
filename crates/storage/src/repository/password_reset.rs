use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PasswordResetToken;

pub struct PasswordResetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PasswordResetRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Drops any previous token of the user and stores the new one.
    pub async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Claims `token` and applies the reset in one transaction: new hash,
    /// no reset tokens left and every refresh token of the user revoked.
    ///
    /// Returns `None` when the token is unknown, expired or already claimed;
    /// nothing is written in that case.
    pub async fn consume(
        &self,
        token: &str,
        password_hash: &str,
        now: NaiveDateTime,
    ) -> Result<Option<PasswordResetToken>> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query_as::<_, PasswordResetToken>(
            r#"
            DELETE FROM password_reset_tokens
            WHERE token = $1 AND expires_at > $2
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(claimed) = claimed else {
            tx.rollback().await?;
            return Ok(None);
        };
        let user_id = claimed.user_id;

        sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = $2 WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(claimed))
    }
}
