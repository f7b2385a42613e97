//! Catalog repository abstraction.
//!
//! The session runtime treats these reads as eventually-consistent snapshots
//! taken at call time. Inserts exist for the authoring handlers; catalog
//! records carry no version column because the runtime never mutates them.

use async_trait::async_trait;
use mystquest_core::error::DomainError;
use uuid::Uuid;

use crate::domain::models::{Character, Content, Quest, Round};

/// Repository trait for catalog reference data.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Persist a new quest.
    async fn insert_quest(&self, quest: &Quest) -> Result<(), DomainError>;

    /// Load a quest by id.
    async fn quest_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError>;

    /// List all quests, newest first.
    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError>;

    /// Persist a new round.
    async fn insert_round(&self, round: &Round) -> Result<(), DomainError>;

    /// Load a round by id.
    async fn round_by_id(&self, id: Uuid) -> Result<Option<Round>, DomainError>;

    /// All rounds of a quest ordered by `number` ascending.
    async fn rounds_by_quest(&self, quest_id: Uuid) -> Result<Vec<Round>, DomainError>;

    /// Persist a new character.
    async fn insert_character(&self, character: &Character) -> Result<(), DomainError>;

    /// Load a character by id.
    async fn character_by_id(&self, id: Uuid) -> Result<Option<Character>, DomainError>;

    /// All characters of a quest.
    async fn characters_by_quest(&self, quest_id: Uuid) -> Result<Vec<Character>, DomainError>;

    /// Persist a new content item.
    async fn insert_content(&self, content: &Content) -> Result<(), DomainError>;

    /// All content of a quest ordered by `display_order` ascending.
    async fn content_by_quest(&self, quest_id: Uuid) -> Result<Vec<Content>, DomainError>;
}
