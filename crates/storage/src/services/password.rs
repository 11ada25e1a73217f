//! bcrypt hashing, run on the blocking pool.

use thiserror::Error;

/// Cost used for regular sign-ups.
pub const DEFAULT_COST: u32 = 10;
/// Cost used when seeding the administrator account.
pub const ADMIN_COST: u32 = 12;

/// Stored for accounts created through an OAuth provider; never a valid hash.
pub const UNUSABLE_PASSWORD: &str = "!oauth";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST).await
}

pub async fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Returns `false` for a mismatch and for hashes that are not bcrypt at all.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    if hash == UNUSABLE_PASSWORD {
        return Ok(false);
    }

    let password = password.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await?
        .unwrap_or(false);

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password_with_cost("password123", 4).await.unwrap();
        assert!(verify_password("password123", &hash).await.unwrap());
        assert!(!verify_password("password124", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_unusable_and_garbage_hashes_never_match() {
        assert!(!verify_password("anything", UNUSABLE_PASSWORD).await.unwrap());
        assert!(!verify_password("anything", "not-a-hash").await.unwrap());
    }
}
