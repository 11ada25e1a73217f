use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Rewrites unique and foreign-key violations into their domain variants.
    pub fn classify(self, conflict: &str, reference: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(conflict.to_string())
        } else if self.is_foreign_key_violation() {
            StorageError::InvalidReference(reference.to_string())
        } else {
            self
        }
    }
}

/// Maps a raw sqlx error through [`StorageError::classify`].
pub fn classify_write(
    error: sqlx::Error,
    conflict: &str,
    reference: &str,
) -> StorageError {
    StorageError::from(error).classify(conflict, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_leaves_other_errors_untouched() {
        let err = StorageError::NotFound.classify("dup", "fk");
        assert!(matches!(err, StorageError::NotFound));

        let err = StorageError::Database(sqlx::Error::RowNotFound).classify("dup", "fk");
        assert!(matches!(err, StorageError::Database(sqlx::Error::RowNotFound)));
    }
}
