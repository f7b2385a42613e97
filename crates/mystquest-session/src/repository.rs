//! Session repository abstraction.
//!
//! Versioned read-modify-write storage for game sessions and their player
//! sessions. Updates are conditional on the version the caller read:
//! implementations persist `version + 1` when the stored version still
//! matches and return [`DomainError::ConcurrencyConflict`] otherwise.

use async_trait::async_trait;
use mystquest_core::error::DomainError;
use uuid::Uuid;

use crate::domain::player::PlayerSession;
use crate::domain::session::GameSession;

/// Repository trait for game sessions and player sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new game session at version 0.
    async fn insert_session(&self, session: &GameSession) -> Result<(), DomainError>;

    /// Load a game session by id.
    async fn session_by_id(&self, id: Uuid) -> Result<Option<GameSession>, DomainError>;

    /// List all game sessions, newest first.
    async fn list_sessions(&self) -> Result<Vec<GameSession>, DomainError>;

    /// Conditionally update a game session, guarded by `session.version`.
    ///
    /// # Errors
    ///
    /// `ConcurrencyConflict` when the stored version differs, `NotFound`
    /// when the record is gone.
    async fn update_session(&self, session: &GameSession) -> Result<(), DomainError>;

    /// Delete a game session, cascading its player sessions.
    ///
    /// # Errors
    ///
    /// `NotFound` when the record does not exist.
    async fn delete_session(&self, id: Uuid) -> Result<(), DomainError>;

    /// Persist a new player session at version 0.
    ///
    /// # Errors
    ///
    /// `Conflict` on a duplicate invitation token or a duplicate
    /// (game session, email) pair.
    async fn insert_player(&self, player: &PlayerSession) -> Result<(), DomainError>;

    /// Load a player session by id.
    async fn player_by_id(&self, id: Uuid) -> Result<Option<PlayerSession>, DomainError>;

    /// Look up the player session holding an invitation token.
    async fn player_by_token(&self, token: &str) -> Result<Option<PlayerSession>, DomainError>;

    /// Look up a player session by (game session, email).
    async fn player_by_session_and_email(
        &self,
        game_session_id: Uuid,
        email: &str,
    ) -> Result<Option<PlayerSession>, DomainError>;

    /// All player sessions of a game session, in invitation order.
    async fn players_by_session(
        &self,
        game_session_id: Uuid,
    ) -> Result<Vec<PlayerSession>, DomainError>;

    /// Conditionally update a player session, guarded by `player.version`.
    ///
    /// # Errors
    ///
    /// `ConcurrencyConflict` when the stored version differs, `NotFound`
    /// when the record is gone.
    async fn update_player(&self, player: &PlayerSession) -> Result<(), DomainError>;
}
