//! MystQuest — `PostgreSQL` persistence.
//!
//! `PgPool`-backed implementations of the catalog and session repository
//! traits, plus the schema they expect. All queries are bound at runtime;
//! optimistic concurrency is enforced with a `version` column guard.

pub mod pg_catalog_repository;
pub mod pg_session_repository;
pub mod schema;

pub use pg_catalog_repository::PgCatalogRepository;
pub use pg_session_repository::PgSessionRepository;

use mystquest_core::error::DomainError;

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Conflict(db.message().to_owned())
        }
        _ => DomainError::Infrastructure(err.to_string()),
    }
}
