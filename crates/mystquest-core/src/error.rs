//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity (quest, round, session, player, token) is absent.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier or token that failed to resolve.
        id: String,
    },

    /// A uniqueness rule was violated (e.g. duplicate invitation).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An operation's state precondition is unmet (e.g. illegal transition).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Optimistic concurrency conflict on a versioned record.
    #[error(
        "concurrency conflict on {entity} {id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The kind of record that had the conflict.
        entity: &'static str,
        /// The record identifier.
        id: Uuid,
        /// The version the writer read.
        expected: i64,
        /// The version found at write time.
        actual: i64,
    },

    /// A validation error on caller-supplied input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a [`DomainError::NotFound`] keyed by a UUID.
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for a [`DomainError::NotFound`] keyed by an opaque token.
    #[must_use]
    pub fn token_not_found(token: &str) -> Self {
        Self::NotFound {
            entity: "invitation token",
            id: token.to_owned(),
        }
    }

    /// Whether this error is an optimistic write collision.
    #[must_use]
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_formats_entity_and_id() {
        let id = Uuid::new_v4();
        let err = DomainError::not_found("game session", id);
        assert_eq!(err.to_string(), format!("game session not found: {id}"));
    }

    #[test]
    fn test_concurrency_conflict_predicate() {
        let err = DomainError::ConcurrencyConflict {
            entity: "game session",
            id: Uuid::new_v4(),
            expected: 3,
            actual: 4,
        };
        assert!(err.is_concurrency_conflict());
        assert!(!DomainError::Conflict("duplicate".into()).is_concurrency_conflict());
    }
}
