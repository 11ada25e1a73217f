use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth::OAuthProfile;
use crate::dto::user::UpdateProfileRequest;
use crate::error::{Result, StorageError, classify_write};
use crate::models::{ROLE_USER, User};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, country_code, \
     city, nickname, birth_date, avatar_url, profile_completed, created_at, updated_at";

/// Fields required to insert a new account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// `email` is expected to be normalized already.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, new_user: &NewUser<'_>) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| classify_write(e, "El correo ya está registrado", "Referencia inválida"))
    }

    pub async fn update_location(&self, id: Uuid, country_code: &str, city: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET country_code = $2, city = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(country_code)
        .bind(city)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| classify_write(e, "Ubicación duplicada", "Pais invalido"))?
        .ok_or(StorageError::NotFound)
    }

    /// Saves the profile form and marks the profile as completed.
    pub async fn update_profile(&self, id: Uuid, profile: &UpdateProfileRequest) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                nickname = $4,
                birth_date = $5,
                avatar_url = $6,
                profile_completed = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(profile.first_name.trim())
        .bind(profile.last_name.trim())
        .bind(profile.normalized_nickname())
        .bind(profile.birth_date)
        .bind(profile.avatar_url.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Creates or refreshes the admin account used to manage the platform.
    pub async fn upsert_admin(&self, new_user: &NewUser<'_>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role, profile_completed)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            ON CONFLICT (email) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                updated_at = NOW()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Resolves an OAuth login to a local account.
    ///
    /// Looks up the `(provider, subject)` identity first, then links an
    /// existing account with the same verified email, and finally creates a
    /// new account carrying `unusable_password_hash`.
    pub async fn find_or_link_oauth(
        &self,
        provider: &str,
        profile: &OAuthProfile,
        email: &str,
        unusable_password_hash: &str,
    ) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let linked = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {columns}
            FROM users u
            INNER JOIN oauth_identities oi ON oi.user_id = u.id
            WHERE oi.provider = $1 AND oi.subject = $2
            "#,
            columns = prefixed_user_columns("u")
        ))
        .bind(provider)
        .bind(&profile.subject)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(user) = linked {
            tx.commit().await?;
            return Ok(user);
        }

        let existing = if profile.email_verified {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?
        } else {
            None
        };

        let user = match existing {
            Some(user) => user,
            None => sqlx::query_as::<_, User>(&format!(
                r#"
                INSERT INTO users (first_name, last_name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {USER_COLUMNS}
                "#
            ))
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(email)
            .bind(unusable_password_hash)
            .bind(ROLE_USER)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                classify_write(e, "El correo ya está registrado", "Referencia inválida")
            })?,
        };

        sqlx::query(
            r#"
            INSERT INTO oauth_identities (provider, subject, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (provider, subject) DO NOTHING
            "#,
        )
        .bind(provider)
        .bind(&profile.subject)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }
}

fn prefixed_user_columns(alias: &str) -> String {
    USER_COLUMNS
        .split(',')
        .map(|column| format!("{alias}.{}", column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_columns_cover_every_field() {
        let columns = prefixed_user_columns("u");
        assert!(columns.starts_with("u.id, u.first_name"));
        assert!(columns.ends_with("u.updated_at"));
        assert_eq!(columns.matches("u.").count(), USER_COLUMNS.split(',').count());
    }
}
