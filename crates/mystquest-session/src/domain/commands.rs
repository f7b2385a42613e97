//! Commands for the Session & Progress context.

use mystquest_core::command::Command;
use uuid::Uuid;

use super::session::GameSessionStatus;

/// Command to create a game session for a quest.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest to play.
    pub quest_id: Uuid,
}

impl Command for CreateSession {
    fn command_type(&self) -> &'static str {
        "session.create_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change a session's lifecycle status.
#[derive(Debug, Clone)]
pub struct SetSessionStatus {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to mutate.
    pub session_id: Uuid,
    /// The requested status.
    pub status: GameSessionStatus,
}

impl Command for SetSessionStatus {
    fn command_type(&self) -> &'static str {
        "session.set_status"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to advance a session to its next round.
#[derive(Debug, Clone)]
pub struct AdvanceRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to advance.
    pub session_id: Uuid,
}

impl Command for AdvanceRound {
    fn command_type(&self) -> &'static str {
        "session.advance_round"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to invite a player into a session by email.
#[derive(Debug, Clone)]
pub struct InvitePlayer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to invite into.
    pub session_id: Uuid,
    /// The invited address.
    pub email: String,
}

impl Command for InvitePlayer {
    fn command_type(&self) -> &'static str {
        "session.invite_player"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command from a player claiming an invitation token.
#[derive(Debug, Clone)]
pub struct JoinGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The invitation token being claimed.
    pub token: String,
    /// The display name the player chose.
    pub player_name: String,
}

impl Command for JoinGame {
    fn command_type(&self) -> &'static str {
        "session.join_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to bind a character to a player session.
#[derive(Debug, Clone)]
pub struct AssignCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session the player belongs to.
    pub session_id: Uuid,
    /// The player session to bind.
    pub player_session_id: Uuid,
    /// The character to bind.
    pub character_id: Uuid,
}

impl Command for AssignCharacter {
    fn command_type(&self) -> &'static str {
        "session.assign_character"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
