//! Outbound events for the Session & Progress context.
//!
//! Each variant describes one client-visible change; successful command
//! handlers convert them into [`Notification`]s routed by game session id.

use mystquest_core::notifier::Notification;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::GameSessionStatus;

/// Event type identifier for [`GameEvent::PlayerConnectionChanged`].
pub const PLAYER_CONNECTION_CHANGED_EVENT_TYPE: &str = "session.player_connection_changed";

/// Event type identifier for [`GameEvent::RoundAdvanced`].
pub const ROUND_ADVANCED_EVENT_TYPE: &str = "session.round_advanced";

/// Event type identifier for [`GameEvent::ContentRevealed`].
pub const CONTENT_REVEALED_EVENT_TYPE: &str = "session.content_revealed";

/// Event type identifier for [`GameEvent::GameStatusChanged`].
pub const GAME_STATUS_CHANGED_EVENT_TYPE: &str = "session.game_status_changed";

/// Client-facing event payloads emitted after successful state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player joined or dropped.
    PlayerConnectionChanged {
        /// The player's display name.
        player_name: String,
        /// The new connection state.
        is_connected: bool,
    },
    /// The session moved to a new round.
    RoundAdvanced {
        /// The new round's number.
        round_number: i32,
        /// The new round's title.
        round_title: String,
    },
    /// A content item became visible.
    ContentRevealed {
        /// The revealed item's title.
        content_title: String,
    },
    /// The session's lifecycle status changed.
    GameStatusChanged {
        /// The new status.
        status: GameSessionStatus,
    },
}

impl GameEvent {
    /// Returns the event type name (used for client-side routing).
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PlayerConnectionChanged { .. } => PLAYER_CONNECTION_CHANGED_EVENT_TYPE,
            Self::RoundAdvanced { .. } => ROUND_ADVANCED_EVENT_TYPE,
            Self::ContentRevealed { .. } => CONTENT_REVEALED_EVENT_TYPE,
            Self::GameStatusChanged { .. } => GAME_STATUS_CHANGED_EVENT_TYPE,
        }
    }

    /// Wraps the event into a routed [`Notification`].
    #[must_use]
    pub fn into_notification(self, game_session_id: Uuid) -> Notification {
        Notification {
            game_session_id,
            event_type: self.event_type().to_owned(),
            // Serialization of derived Serialize types to Value is infallible.
            payload: serde_json::to_value(&self).expect("GameEvent serialization is infallible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_notification_carries_session_routing_key_and_type() {
        let session_id = Uuid::new_v4();
        let event = GameEvent::RoundAdvanced {
            round_number: 2,
            round_title: "The Library".to_owned(),
        };

        let notification = event.into_notification(session_id);

        assert_eq!(notification.game_session_id, session_id);
        assert_eq!(notification.event_type, ROUND_ADVANCED_EVENT_TYPE);
        assert_eq!(
            notification.payload["RoundAdvanced"]["round_number"],
            serde_json::json!(2)
        );
    }
}
