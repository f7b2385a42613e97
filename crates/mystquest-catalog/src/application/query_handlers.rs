//! Query handlers for the Content Catalog context.
//!
//! Read-only lookups over authored reference data. The session runtime uses
//! these for round/character resolution; operators use them to review a
//! quest before running it.

use mystquest_core::error::DomainError;
use uuid::Uuid;

use crate::domain::models::{Character, Content, Quest, Round};
use crate::repository::CatalogRepository;

/// Which slice of a quest's content to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScope {
    /// Every item of the quest.
    All,
    /// Only catalog-level items (no round tag), e.g. general instructions.
    CatalogLevel,
    /// Only items tagged with one round.
    Round(Uuid),
}

/// Retrieves a quest by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist.
pub async fn get_quest(
    quest_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Quest, DomainError> {
    catalog
        .quest_by_id(quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", quest_id))
}

/// Lists all quests.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn list_quests(catalog: &dyn CatalogRepository) -> Result<Vec<Quest>, DomainError> {
    catalog.list_quests().await
}

/// All rounds of a quest ordered by number.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist.
pub async fn get_rounds(
    quest_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<Round>, DomainError> {
    get_quest(quest_id, catalog).await?;
    catalog.rounds_by_quest(quest_id).await
}

/// Retrieves a character by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the character does not exist.
pub async fn get_character(
    character_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Character, DomainError> {
    catalog
        .character_by_id(character_id)
        .await?
        .ok_or_else(|| DomainError::not_found("character", character_id))
}

/// All characters of a quest.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist.
pub async fn get_characters(
    quest_id: Uuid,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<Character>, DomainError> {
    get_quest(quest_id, catalog).await?;
    catalog.characters_by_quest(quest_id).await
}

/// Content of a quest filtered by [`ContentScope`], in display order.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist.
pub async fn get_content(
    quest_id: Uuid,
    scope: ContentScope,
    catalog: &dyn CatalogRepository,
) -> Result<Vec<Content>, DomainError> {
    get_quest(quest_id, catalog).await?;
    let mut items = catalog.content_by_quest(quest_id).await?;
    items.retain(|c| match scope {
        ContentScope::All => true,
        ContentScope::CatalogLevel => c.round_id.is_none(),
        ContentScope::Round(round_id) => c.round_id == Some(round_id),
    });
    Ok(items)
}

