//! Catalog records: quests, rounds, characters, and content.
//!
//! These are reference data from the runtime's point of view — immutable for
//! the lifetime of a game session that plays through them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bounds on how many rounds a quest may declare.
pub const MIN_ROUNDS: i32 = 1;
/// Upper bound on how many rounds a quest may declare.
pub const MAX_ROUNDS: i32 = 20;

/// An authored mystery template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Quest identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Long-form description shown to the game master.
    pub description: String,
    /// Declared round count, between [`MIN_ROUNDS`] and [`MAX_ROUNDS`].
    pub number_of_rounds: i32,
    /// The user who authored the quest.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One ordered phase of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round identifier.
    pub id: Uuid,
    /// Owning quest.
    pub quest_id: Uuid,
    /// 1-based position, unique within the quest.
    pub number: i32,
    /// Display title.
    pub title: String,
    /// Narration read when the round opens.
    pub description: String,
}

/// A playable role within a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: Uuid,
    /// Owning quest.
    pub quest_id: Uuid,
    /// Display name.
    pub name: String,
    /// Descriptive text.
    pub description: String,
    /// Whether this character's description is visible to all players
    /// regardless of assignment.
    pub is_public_info: bool,
    /// Optional avatar image path.
    pub avatar_image_path: Option<String>,
}

/// Classification of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// Instructions for everyone, typically untagged by round.
    GeneralInstruction,
    /// Instructions for one character.
    CharacterInstruction,
    /// A clue revealed during play.
    Clue,
    /// Narration describing a round.
    RoundDescription,
}

impl ContentType {
    /// Stable string form used for persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeneralInstruction => "GeneralInstruction",
            Self::CharacterInstruction => "CharacterInstruction",
            Self::Clue => "Clue",
            Self::RoundDescription => "RoundDescription",
        }
    }

    /// Parses the persisted string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GeneralInstruction" => Some(Self::GeneralInstruction),
            "CharacterInstruction" => Some(Self::CharacterInstruction),
            "Clue" => Some(Self::Clue),
            "RoundDescription" => Some(Self::RoundDescription),
            _ => None,
        }
    }
}

/// A single clue/instruction unit, optionally gated by round and character.
///
/// Content with no round tag is catalog-level (general instructions) and is
/// never returned by the per-round visibility resolver. Content with no
/// character tag and `is_public = false` is game-master-only material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Content identifier.
    pub id: Uuid,
    /// Owning quest.
    pub quest_id: Uuid,
    /// Round gate, if any. Round-tagged content becomes visible only once
    /// that round is current or past.
    pub round_id: Option<Uuid>,
    /// Character gate, if any.
    pub character_id: Option<Uuid>,
    /// Classification.
    pub content_type: ContentType,
    /// Display title (also used in `ContentRevealed` notifications).
    pub title: String,
    /// Path of the extracted image backing this item.
    pub image_path: String,
    /// Whether every player sees this item once its round is reached.
    pub is_public: bool,
    /// Ascending presentation order within a result set.
    pub display_order: i32,
}
