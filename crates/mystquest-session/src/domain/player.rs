//! The player session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One invited participant's state within a game session.
///
/// Created at invitation time with no character and no name; mutated when
/// the player claims the token (join) and when the operator binds a
/// character; never mutated by any other party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSession {
    /// Player session identifier.
    pub id: Uuid,
    /// Owning game session (cascade-deleted with it).
    pub game_session_id: Uuid,
    /// The character this player is bound to, if any.
    pub character_id: Option<Uuid>,
    /// Display name, empty until the player joins.
    pub player_name: String,
    /// Single-use opaque admission token, unique across the system.
    pub invitation_token: String,
    /// The invited address.
    pub email: String,
    /// Last time the player acted.
    pub last_active_at: DateTime<Utc>,
    /// Whether the player currently counts as connected.
    pub is_connected: bool,
    /// Optimistic concurrency version of the record as read.
    pub version: i64,
}

impl PlayerSession {
    /// Creates the record for a freshly invited player.
    #[must_use]
    pub fn invite(
        game_session_id: Uuid,
        email: String,
        invitation_token: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_session_id,
            character_id: None,
            player_name: String::new(),
            invitation_token,
            email,
            last_active_at: now,
            is_connected: false,
            version: 0,
        }
    }

    /// Claims the invitation: sets the display name and marks the player
    /// connected. Joining again with a new name renames the player.
    pub fn join(&mut self, player_name: &str, now: DateTime<Utc>) {
        self.player_name = player_name.to_owned();
        self.is_connected = true;
        self.last_active_at = now;
    }
}
