//! Shared application state.

use std::sync::Arc;

use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::clock::Clock;
use mystquest_core::notifier::Notifier;
use mystquest_core::token::TokenIssuer;
use mystquest_session::repository::SessionRepository;

/// Application state shared across all request handlers.
///
/// Everything is behind a trait object so integration tests can swap the
/// Postgres repositories for in-memory ones and the clock/token issuer for
/// deterministic fakes.
#[derive(Clone)]
pub struct AppState {
    /// Authored reference data (quests, rounds, characters, content).
    pub catalog: Arc<dyn CatalogRepository>,
    /// Runtime records (game sessions and player sessions).
    pub sessions: Arc<dyn SessionRepository>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Invitation token source.
    pub tokens: Arc<dyn TokenIssuer>,
    /// Outbound event channel.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenIssuer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            clock,
            tokens,
            notifier,
        }
    }
}
