use sqlx::PgPool;
use storage::{
    models::{ROLE_ADMIN, User},
    repository::{NewUser, UserRepository},
    services::password::{ADMIN_COST, hash_password_with_cost},
    validation::{
        PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, is_valid_email, normalize_email, validate_password,
    },
};

use crate::error::{Result, SeedError};

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub enum AdminOutcome {
    Created(User),
    Updated(User),
    AlreadyExists,
}

impl AdminSeed {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(&normalize_email(&self.email)) {
            return Err(SeedError::ValidationError(format!(
                "ADMIN_EMAIL '{}' is not a valid email",
                self.email
            )));
        }

        if validate_password(&self.password).is_err() {
            return Err(SeedError::ValidationError(format!(
                "ADMIN_PASSWORD must have at least {PASSWORD_MIN_LENGTH} characters and at most {PASSWORD_MAX_LENGTH} bytes"
            )));
        }

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(SeedError::ValidationError(
                "Admin first and last name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Creates the administrator. An existing account is left alone unless
/// `reset` is set, in which case its password and role are overwritten.
pub async fn seed_admin(pool: &PgPool, seed: &AdminSeed, reset: bool) -> Result<AdminOutcome> {
    seed.validate()?;

    let email = normalize_email(&seed.email);
    let repository = UserRepository::new(pool);

    let existing = repository.find_by_email(&email).await?;
    if existing.is_some() && !reset {
        tracing::info!(email = %email, "Admin user already exists");
        return Ok(AdminOutcome::AlreadyExists);
    }

    let password_hash = hash_password_with_cost(&seed.password, ADMIN_COST).await?;
    let user = repository
        .upsert_admin(&NewUser {
            first_name: seed.first_name.trim(),
            last_name: seed.last_name.trim(),
            email: &email,
            password_hash: &password_hash,
            role: ROLE_ADMIN,
        })
        .await?;

    if existing.is_some() {
        tracing::info!(user_id = %user.id, "Admin user updated");
        Ok(AdminOutcome::Updated(user))
    } else {
        tracing::info!(user_id = %user.id, "Admin user created");
        Ok(AdminOutcome::Created(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(password: &str) -> AdminSeed {
        AdminSeed {
            email: " Admin@Deporty.app ".to_string(),
            password: password.to_string(),
            first_name: "Admin".to_string(),
            last_name: "Deporty".to_string(),
        }
    }

    #[test]
    fn test_admin_password_bounds() {
        assert!(seed("short").validate().is_err());
        assert!(seed("a-long-enough-password").validate().is_ok());
        assert!(seed(&"x".repeat(72)).validate().is_ok());
        assert!(seed(&"x".repeat(73)).validate().is_err());
        assert!(seed("ññññ").validate().is_err());
    }

    #[test]
    fn test_admin_email_must_be_valid() {
        let mut admin = seed("a-long-enough-password");
        admin.email = "admin".to_string();
        assert!(matches!(admin.validate(), Err(SeedError::ValidationError(_))));
    }

    #[test]
    fn test_admin_names_required() {
        let mut admin = seed("a-long-enough-password");
        admin.last_name = "  ".to_string();
        assert!(admin.validate().is_err());
    }
}
