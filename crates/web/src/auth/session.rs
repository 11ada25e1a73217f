//! Cookie-based sessions: issuing, rotating and revoking refresh tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use storage::{
    dto::auth::SessionUser,
    error::StorageError,
    models::{RefreshToken, User},
    repository::{RefreshTokenRepository, UserRepository},
};
use uuid::Uuid;

use super::jwt::{
    ACCESS_COOKIE, ACCESS_TOKEN_TTL_SECS, REFRESH_COOKIE, REFRESH_IDLE_TTL_SECS,
    REFRESH_TOKEN_TTL_SECS,
};
use crate::error::{AppError, ApiResult};
use crate::state::AppState;

/// Why a stored refresh token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRejection {
    Unknown,
    Revoked,
    Expired,
    UserMismatch,
    Idle,
}

/// Lowercase hex SHA-256 of a token, as stored in `refresh_tokens`.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn auth_cookie(name: &'static str, value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

pub fn access_cookie(token: String, secure: bool) -> Cookie<'static> {
    auth_cookie(ACCESS_COOKIE, token, ACCESS_TOKEN_TTL_SECS, secure)
}

pub fn refresh_cookie(token: String, secure: bool) -> Cookie<'static> {
    auth_cookie(REFRESH_COOKIE, token, REFRESH_TOKEN_TTL_SECS, secure)
}

/// Overwrites both auth cookies with empty, already-expired values.
pub fn clear_auth_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(auth_cookie(ACCESS_COOKIE, String::new(), 0, secure))
        .add(auth_cookie(REFRESH_COOKIE, String::new(), 0, secure))
}

/// Decides whether a stored refresh row may be rotated.
///
/// `idle_cutoff` is the oldest acceptable `last_used_at`.
pub fn check_refresh_row(
    row: Option<&RefreshToken>,
    claimed_user: Uuid,
    now: NaiveDateTime,
    idle_cutoff: NaiveDateTime,
) -> Result<&RefreshToken, RotationRejection> {
    let row = row.ok_or(RotationRejection::Unknown)?;

    if row.revoked_at.is_some() {
        return Err(RotationRejection::Revoked);
    }
    if row.expires_at <= now {
        return Err(RotationRejection::Expired);
    }
    if row.user_id != claimed_user {
        return Err(RotationRejection::UserMismatch);
    }
    if row.last_used_at < idle_cutoff {
        return Err(RotationRejection::Idle);
    }

    Ok(row)
}

/// Signs both tokens for `user`, stores the refresh hash and sets the cookies.
pub async fn issue_session(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> ApiResult<(CookieJar, SessionUser)> {
    let session_user = SessionUser::from(user);
    let access = state.jwt.sign_access(&session_user).map_err(token_error)?;
    let refresh = state.jwt.sign_refresh(user.id).map_err(token_error)?;

    let now = Utc::now().naive_utc();
    RefreshTokenRepository::new(state.db.pool())
        .insert(
            user.id,
            &hash_token(&refresh),
            now,
            now + Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        )
        .await?;

    let secure = state.secure_cookies();
    let jar = jar
        .add(access_cookie(access, secure))
        .add(refresh_cookie(refresh, secure));

    Ok((jar, session_user))
}

/// Exchanges a refresh token for a new token pair.
///
/// Every rejection clears both cookies and yields `None`.
pub async fn rotate_refresh_token(
    state: &AppState,
    jar: CookieJar,
    token: &str,
) -> ApiResult<(CookieJar, Option<SessionUser>)> {
    let secure = state.secure_cookies();

    let claims = match state.jwt.verify_refresh(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Refresh token verification failed: {e}");
            return Ok((clear_auth_cookies(jar, secure), None));
        }
    };

    let now = Utc::now().naive_utc();
    let tokens = RefreshTokenRepository::new(state.db.pool());
    let stored = tokens.find_active_by_hash(&hash_token(token), now).await?;

    let idle_cutoff = now - Duration::seconds(REFRESH_IDLE_TTL_SECS);
    let old = match check_refresh_row(stored.as_ref(), claims.user_id, now, idle_cutoff) {
        Ok(row) => row,
        Err(reason) => {
            tracing::warn!(user_id = %claims.user_id, ?reason, "Refresh token rejected");
            return Ok((clear_auth_cookies(jar, secure), None));
        }
    };

    let user = match UserRepository::new(state.db.pool())
        .find_by_id(claims.user_id)
        .await
    {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            tracing::warn!(user_id = %claims.user_id, "Refresh token for missing user");
            return Ok((clear_auth_cookies(jar, secure), None));
        }
        Err(e) => return Err(e.into()),
    };

    let session_user = SessionUser::from(&user);
    let new_refresh = state.jwt.sign_refresh(user.id).map_err(token_error)?;
    let new_access = state.jwt.sign_access(&session_user).map_err(token_error)?;

    let rotated = tokens
        .rotate(
            old.id,
            user.id,
            &hash_token(&new_refresh),
            now,
            now + Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        )
        .await?;

    if !rotated {
        tracing::warn!(user_id = %user.id, "Refresh token was revoked concurrently");
        return Ok((clear_auth_cookies(jar, secure), None));
    }

    let jar = jar
        .add(access_cookie(new_access, secure))
        .add(refresh_cookie(new_refresh, secure));

    Ok((jar, Some(session_user)))
}

pub async fn revoke_refresh_token(state: &AppState, token: &str) -> ApiResult<()> {
    let revoked = RefreshTokenRepository::new(state.db.pool())
        .revoke_by_hash(&hash_token(token), Utc::now().naive_utc())
        .await?;
    tracing::debug!(revoked, "Refresh token revoked");
    Ok(())
}

fn token_error(error: super::jwt::JwtError) -> AppError {
    AppError::internal(format!("Failed to sign token: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: Uuid, now: NaiveDateTime) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_token("token"),
            created_at: now - Duration::days(1),
            last_used_at: now - Duration::days(1),
            expires_at: now + Duration::days(29),
            revoked_at: None,
        }
    }

    fn idle_cutoff(now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::seconds(REFRESH_IDLE_TTL_SECS)
    }

    #[test]
    fn test_hash_token_is_lowercase_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_active_row_is_accepted() {
        let now = Utc::now().naive_utc();
        let user = Uuid::new_v4();
        let stored = row(user, now);

        let accepted = check_refresh_row(Some(&stored), user, now, idle_cutoff(now)).unwrap();
        assert_eq!(accepted.id, stored.id);
    }

    #[test]
    fn test_missing_row_is_rejected() {
        let now = Utc::now().naive_utc();
        assert_eq!(
            check_refresh_row(None, Uuid::new_v4(), now, idle_cutoff(now)).unwrap_err(),
            RotationRejection::Unknown
        );
    }

    #[test]
    fn test_mismatched_user_is_rejected() {
        let now = Utc::now().naive_utc();
        let stored = row(Uuid::new_v4(), now);
        assert_eq!(
            check_refresh_row(Some(&stored), Uuid::new_v4(), now, idle_cutoff(now)).unwrap_err(),
            RotationRejection::UserMismatch
        );
    }

    #[test]
    fn test_idle_row_is_rejected() {
        let now = Utc::now().naive_utc();
        let user = Uuid::new_v4();
        let mut stored = row(user, now);
        stored.last_used_at = now - Duration::days(31);

        assert_eq!(
            check_refresh_row(Some(&stored), user, now, idle_cutoff(now)).unwrap_err(),
            RotationRejection::Idle
        );
    }

    #[test]
    fn test_revoked_and_expired_rows_are_rejected() {
        let now = Utc::now().naive_utc();
        let user = Uuid::new_v4();

        let mut revoked = row(user, now);
        revoked.revoked_at = Some(now);
        assert_eq!(
            check_refresh_row(Some(&revoked), user, now, idle_cutoff(now)).unwrap_err(),
            RotationRejection::Revoked
        );

        let mut expired = row(user, now);
        expired.expires_at = now - Duration::seconds(1);
        assert_eq!(
            check_refresh_row(Some(&expired), user, now, idle_cutoff(now)).unwrap_err(),
            RotationRejection::Expired
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = refresh_cookie("value".to_string(), true);
        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(REFRESH_TOKEN_TTL_SECS))
        );

        let dev = access_cookie("value".to_string(), false);
        assert_eq!(dev.secure(), Some(false));
        assert_eq!(dev.max_age(), Some(time::Duration::minutes(15)));
    }

    #[test]
    fn test_clear_sets_both_cookies_empty() {
        let jar = clear_auth_cookies(CookieJar::new(), false);

        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        }
    }
}
