//! Commands for the Content Catalog context.

use mystquest_core::command::Command;
use uuid::Uuid;

use super::models::ContentType;

/// Command to author a new quest.
#[derive(Debug, Clone)]
pub struct CreateQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Declared round count.
    pub number_of_rounds: i32,
    /// The authoring user.
    pub created_by: Uuid,
}

impl Command for CreateQuest {
    fn command_type(&self) -> &'static str {
        "catalog.create_quest"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a round to a quest.
#[derive(Debug, Clone)]
pub struct AddRound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning quest.
    pub quest_id: Uuid,
    /// 1-based round number, unique within the quest.
    pub number: i32,
    /// Display title.
    pub title: String,
    /// Round narration.
    pub description: String,
}

impl Command for AddRound {
    fn command_type(&self) -> &'static str {
        "catalog.add_round"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a character to a quest.
#[derive(Debug, Clone)]
pub struct AddCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning quest.
    pub quest_id: Uuid,
    /// Display name.
    pub name: String,
    /// Descriptive text.
    pub description: String,
    /// Whether the character's description is public to all players.
    pub is_public_info: bool,
    /// Optional avatar image path.
    pub avatar_image_path: Option<String>,
}

impl Command for AddCharacter {
    fn command_type(&self) -> &'static str {
        "catalog.add_character"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a content item to a quest.
#[derive(Debug, Clone)]
pub struct AddContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning quest.
    pub quest_id: Uuid,
    /// Optional round gate.
    pub round_id: Option<Uuid>,
    /// Optional character gate.
    pub character_id: Option<Uuid>,
    /// Classification.
    pub content_type: ContentType,
    /// Display title.
    pub title: String,
    /// Backing image path.
    pub image_path: String,
    /// Whether the item is public once its round is reached.
    pub is_public: bool,
    /// Presentation order.
    pub display_order: i32,
}

impl Command for AddContent {
    fn command_type(&self) -> &'static str {
        "catalog.add_content"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
