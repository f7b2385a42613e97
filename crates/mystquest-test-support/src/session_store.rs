//! In-memory `SessionRepository` for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mystquest_core::error::DomainError;
use mystquest_session::domain::player::PlayerSession;
use mystquest_session::domain::session::GameSession;
use mystquest_session::repository::SessionRepository;
use uuid::Uuid;

/// An in-memory session store honoring the optimistic version guard.
///
/// `fail_next_session_updates`/`fail_next_player_updates` inject artificial
/// `ConcurrencyConflict` results without applying the write, for exercising
/// the handlers' re-read-and-retry path.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Vec<GameSession>>,
    players: Mutex<Vec<PlayerSession>>,
    session_conflicts: Mutex<usize>,
    player_conflicts: Mutex<usize>,
    raced_player: Mutex<Option<PlayerSession>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` session updates fail with a concurrency
    /// conflict.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fail_next_session_updates(&self, count: usize) {
        *self.session_conflicts.lock().unwrap() = count;
    }

    /// Make the next `count` player updates fail with a concurrency
    /// conflict.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fail_next_player_updates(&self, count: usize) {
        *self.player_conflicts.lock().unwrap() = count;
    }

    /// Insert `rival` immediately before the next `insert_player` call, as
    /// if another writer won the race between a caller's uniqueness check
    /// and its insert.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn race_next_player_insert(&self, rival: PlayerSession) {
        *self.raced_player.lock().unwrap() = Some(rival);
    }

    fn take_injected_conflict(counter: &Mutex<usize>) -> bool {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn insert_session(&self, session: &GameSession) -> Result<(), DomainError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn session_by_id(&self, id: Uuid) -> Result<Option<GameSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_sessions(&self) -> Result<Vec<GameSession>, DomainError> {
        let mut sessions = self.sessions.lock().unwrap().clone();
        sessions.sort_by_key(|s| std::cmp::Reverse(s.created_at));
        Ok(sessions)
    }

    async fn update_session(&self, session: &GameSession) -> Result<(), DomainError> {
        if Self::take_injected_conflict(&self.session_conflicts) {
            return Err(DomainError::ConcurrencyConflict {
                entity: "game session",
                id: session.id,
                expected: session.version,
                actual: session.version + 1,
            });
        }
        let mut sessions = self.sessions.lock().unwrap();
        let Some(stored) = sessions.iter_mut().find(|s| s.id == session.id) else {
            return Err(DomainError::not_found("game session", session.id));
        };
        if stored.version != session.version {
            return Err(DomainError::ConcurrencyConflict {
                entity: "game session",
                id: session.id,
                expected: session.version,
                actual: stored.version,
            });
        }
        *stored = session.clone();
        stored.version = session.version + 1;
        Ok(())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(DomainError::not_found("game session", id));
        }
        // Cascade, mirroring the schema's ON DELETE CASCADE.
        self.players
            .lock()
            .unwrap()
            .retain(|p| p.game_session_id != id);
        Ok(())
    }

    async fn insert_player(&self, player: &PlayerSession) -> Result<(), DomainError> {
        let mut players = self.players.lock().unwrap();
        if let Some(rival) = self.raced_player.lock().unwrap().take() {
            players.push(rival);
        }
        if players
            .iter()
            .any(|p| p.invitation_token == player.invitation_token)
        {
            return Err(DomainError::Conflict(format!(
                "invitation token {} already exists",
                player.invitation_token
            )));
        }
        if players
            .iter()
            .any(|p| p.game_session_id == player.game_session_id && p.email == player.email)
        {
            return Err(DomainError::Conflict(format!(
                "player {} already invited to game session {}",
                player.email, player.game_session_id
            )));
        }
        players.push(player.clone());
        Ok(())
    }

    async fn player_by_id(&self, id: Uuid) -> Result<Option<PlayerSession>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn player_by_token(&self, token: &str) -> Result<Option<PlayerSession>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.invitation_token == token)
            .cloned())
    }

    async fn player_by_session_and_email(
        &self,
        game_session_id: Uuid,
        email: &str,
    ) -> Result<Option<PlayerSession>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.game_session_id == game_session_id && p.email == email)
            .cloned())
    }

    async fn players_by_session(
        &self,
        game_session_id: Uuid,
    ) -> Result<Vec<PlayerSession>, DomainError> {
        Ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.game_session_id == game_session_id)
            .cloned()
            .collect())
    }

    async fn update_player(&self, player: &PlayerSession) -> Result<(), DomainError> {
        if Self::take_injected_conflict(&self.player_conflicts) {
            return Err(DomainError::ConcurrencyConflict {
                entity: "player session",
                id: player.id,
                expected: player.version,
                actual: player.version + 1,
            });
        }
        let mut players = self.players.lock().unwrap();
        let Some(stored) = players.iter_mut().find(|p| p.id == player.id) else {
            return Err(DomainError::not_found("player session", player.id));
        };
        if stored.version != player.version {
            return Err(DomainError::ConcurrencyConflict {
                entity: "player session",
                id: player.id,
                expected: player.version,
                actual: stored.version,
            });
        }
        *stored = player.clone();
        stored.version = player.version + 1;
        Ok(())
    }
}
