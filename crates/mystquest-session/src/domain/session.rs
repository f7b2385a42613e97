//! The game session record and its status state machine.

use chrono::{DateTime, Utc};
use mystquest_catalog::domain::models::Round;
use mystquest_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a game session.
///
/// `Created → InProgress → {Paused ↔ InProgress} → Completed`, with
/// `Completed` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSessionStatus {
    /// Session exists, play has not started.
    Created,
    /// Rounds are being played.
    InProgress,
    /// Play is suspended and may resume.
    Paused,
    /// Play has ended. Terminal.
    Completed,
}

impl GameSessionStatus {
    /// Stable string form used for persistence and notifications.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::InProgress => "InProgress",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }

    /// Parses the persisted string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(Self::Created),
            "InProgress" => Some(Self::InProgress),
            "Paused" => Some(Self::Paused),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The explicit transition table. A session may only pause while in
    /// progress, may complete from any non-terminal status, and nothing
    /// leaves `Completed`. Self-transitions are disallowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Created | Self::Paused, Self::InProgress)
                | (Self::InProgress, Self::Paused)
                | (Self::Created | Self::InProgress | Self::Paused, Self::Completed)
        )
    }
}

/// One live play-through of a quest.
///
/// `current_round` mirrors the `number` of the round referenced by
/// `current_round_id`; every mutation keeps the pair in sync. `version`
/// backs the optimistic concurrency check on writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Session identifier.
    pub id: Uuid,
    /// The quest being played.
    pub quest_id: Uuid,
    /// Lifecycle status.
    pub status: GameSessionStatus,
    /// The round currently in play.
    pub current_round_id: Uuid,
    /// The `number` of the current round.
    pub current_round: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Stamped on first transition into `InProgress`.
    pub started_at: Option<DateTime<Utc>>,
    /// Stamped on first transition into `Completed`.
    pub ended_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version of the record as read.
    pub version: i64,
}

impl GameSession {
    /// Creates a session positioned at the quest's first round.
    #[must_use]
    pub fn create(quest_id: Uuid, first_round: &Round, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            quest_id,
            status: GameSessionStatus::Created,
            current_round_id: first_round.id,
            current_round: first_round.number,
            created_at: now,
            updated_at: now,
            started_at: None,
            ended_at: None,
            version: 0,
        }
    }

    /// Applies an operator status change, validating it against the
    /// transition table and stamping `started_at`/`ended_at` on the first
    /// entry into the respective status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` for a disallowed transition.
    pub fn transition_to(
        &mut self,
        next: GameSessionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidState(format!(
                "cannot transition game session {} from {} to {}",
                self.id,
                self.status.as_str(),
                next.as_str()
            )));
        }
        self.status = next;
        self.stamp_milestones(now);
        self.updated_at = now;
        Ok(())
    }

    /// Moves the session to `round` and puts it in progress. Used by the
    /// advance-round operation, which may resume a paused session.
    pub fn advance_to(&mut self, round: &Round, now: DateTime<Utc>) {
        self.current_round_id = round.id;
        self.current_round = round.number;
        self.status = GameSessionStatus::InProgress;
        self.stamp_milestones(now);
        self.updated_at = now;
    }

    /// Completes the session (no further rounds). The current round fields
    /// are left pointing at the final round.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = GameSessionStatus::Completed;
        self.stamp_milestones(now);
        self.updated_at = now;
    }

    fn stamp_milestones(&mut self, now: DateTime<Utc>) {
        if self.status == GameSessionStatus::InProgress && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if self.status == GameSessionStatus::Completed && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}
