use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;
use storage::{
    dto::auth::{ForgotPasswordRequest, LoginRequest, OAuthProfile, RegisterRequest, ResetPasswordRequest},
    error::StorageError,
    models::{ROLE_USER, User},
    repository::{NewUser, PasswordResetRepository, UserRepository},
    services::password::{self, UNUSABLE_PASSWORD},
    validation::normalize_email,
};

use crate::error::{AppError, ApiResult};
use crate::state::AppState;

pub const RESET_TOKEN_TTL_SECS: i64 = 60 * 60;
const RESET_TOKEN_BYTES: usize = 32;
const EMAIL_TAKEN: &str = "El correo electrónico ya está registrado";

pub async fn register(pool: &PgPool, request: &RegisterRequest) -> ApiResult<User> {
    let email = normalize_email(&request.email);
    let users = UserRepository::new(pool);

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict(EMAIL_TAKEN));
    }

    let password_hash = password::hash_password(&request.password).await?;

    let user = users
        .create(&NewUser {
            first_name: request.first_name.trim(),
            last_name: request.last_name.trim(),
            email: &email,
            password_hash: &password_hash,
            role: ROLE_USER,
        })
        .await
        .map_err(|e| match e {
            StorageError::ConstraintViolation(_) => AppError::conflict(EMAIL_TAKEN),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

pub async fn authenticate(pool: &PgPool, request: &LoginRequest) -> ApiResult<User> {
    let email = normalize_email(&request.email);
    let user = UserRepository::new(pool).find_by_email(&email).await?;

    check_credentials(user, &request.password).await
}

/// Unknown emails and wrong passwords fail identically.
pub async fn check_credentials(user: Option<User>, password: &str) -> ApiResult<User> {
    let Some(user) = user else {
        return Err(AppError::invalid_credentials());
    };

    if !password::verify_password(password, &user.password_hash).await? {
        return Err(AppError::invalid_credentials());
    }

    Ok(user)
}

pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Stores a fresh reset token and mails the link when the account exists.
pub async fn forgot_password(state: &AppState, request: &ForgotPasswordRequest) -> ApiResult<()> {
    let email = normalize_email(&request.email);
    let Some(user) = UserRepository::new(state.db.pool()).find_by_email(&email).await? else {
        tracing::info!("Password reset requested for unknown email");
        return Ok(());
    };

    let token = generate_reset_token();
    let expires_at = Utc::now().naive_utc() + Duration::seconds(RESET_TOKEN_TTL_SECS);

    PasswordResetRepository::new(state.db.pool())
        .replace_for_user(user.id, &token, expires_at)
        .await?;

    let reset_url = format!("{}/reset-password/{}", state.config.public_origin, token);
    state
        .mailer
        .send_password_reset(&email, &user.first_name, &reset_url)
        .await;

    Ok(())
}

pub async fn reset_password(pool: &PgPool, request: &ResetPasswordRequest) -> ApiResult<()> {
    let password_hash = password::hash_password(&request.new_password).await?;

    let Some(reset) = PasswordResetRepository::new(pool)
        .consume(&request.token, &password_hash, Utc::now().naive_utc())
        .await?
    else {
        return Err(AppError::validation("Token inválido o expirado"));
    };

    tracing::info!(user_id = %reset.user_id, "Password reset completed");
    Ok(())
}

pub async fn oauth_user(pool: &PgPool, provider: &str, profile: &OAuthProfile) -> ApiResult<User> {
    let email = normalize_email(&profile.email);
    let user = UserRepository::new(pool)
        .find_or_link_oauth(provider, profile, &email, UNUSABLE_PASSWORD)
        .await
        .map_err(|e| match e {
            StorageError::ConstraintViolation(_) => {
                AppError::conflict("Ya existe una cuenta con este correo")
            }
            other => other.into(),
        })?;

    Ok(user)
}
