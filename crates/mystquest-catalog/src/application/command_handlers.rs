//! Command handlers for the Content Catalog context.
//!
//! Application-level functions that validate authoring commands against the
//! catalog and persist new reference records.

use mystquest_core::clock::Clock;
use mystquest_core::command::Command;
use mystquest_core::error::DomainError;
use uuid::Uuid;

use crate::domain::commands::{AddCharacter, AddContent, AddRound, CreateQuest};
use crate::domain::models::{Character, Content, MAX_ROUNDS, MIN_ROUNDS, Quest, Round};
use crate::repository::CatalogRepository;

/// Handles [`CreateQuest`]: validates the declared round count and persists
/// the quest.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title is blank or the round
/// count is outside [`MIN_ROUNDS`]..=[`MAX_ROUNDS`], or a repository error.
pub async fn handle_create_quest(
    command: &CreateQuest,
    clock: &dyn Clock,
    catalog: &dyn CatalogRepository,
) -> Result<Quest, DomainError> {
    if command.title.trim().is_empty() {
        return Err(DomainError::Validation("quest title is required".into()));
    }
    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&command.number_of_rounds) {
        return Err(DomainError::Validation(format!(
            "number of rounds must be between {MIN_ROUNDS} and {MAX_ROUNDS}, got {}",
            command.number_of_rounds
        )));
    }

    let now = clock.now();
    let quest = Quest {
        id: Uuid::new_v4(),
        title: command.title.clone(),
        description: command.description.clone(),
        number_of_rounds: command.number_of_rounds,
        created_by: command.created_by,
        created_at: now,
        updated_at: now,
    };
    catalog.insert_quest(&quest).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        quest_id = %quest.id,
        "quest created"
    );
    Ok(quest)
}

/// Handles [`AddRound`]: verifies the quest exists and the round number is
/// unused, then persists the round.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest is missing,
/// `DomainError::Validation` for a non-positive number, or
/// `DomainError::Conflict` if the number is already taken within the quest.
pub async fn handle_add_round(
    command: &AddRound,
    catalog: &dyn CatalogRepository,
) -> Result<Round, DomainError> {
    if command.number < 1 {
        return Err(DomainError::Validation(
            "round number must be 1-based".into(),
        ));
    }
    catalog
        .quest_by_id(command.quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", command.quest_id))?;

    let existing = catalog.rounds_by_quest(command.quest_id).await?;
    if existing.iter().any(|r| r.number == command.number) {
        return Err(DomainError::Conflict(format!(
            "round {} already exists for quest {}",
            command.number, command.quest_id
        )));
    }

    let round = Round {
        id: Uuid::new_v4(),
        quest_id: command.quest_id,
        number: command.number,
        title: command.title.clone(),
        description: command.description.clone(),
    };
    catalog.insert_round(&round).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        round_id = %round.id,
        number = round.number,
        "round added"
    );
    Ok(round)
}

/// Handles [`AddCharacter`]: verifies the quest exists and persists the
/// character.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest is missing or
/// `DomainError::Validation` for a blank name.
pub async fn handle_add_character(
    command: &AddCharacter,
    catalog: &dyn CatalogRepository,
) -> Result<Character, DomainError> {
    if command.name.trim().is_empty() {
        return Err(DomainError::Validation("character name is required".into()));
    }
    catalog
        .quest_by_id(command.quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", command.quest_id))?;

    let character = Character {
        id: Uuid::new_v4(),
        quest_id: command.quest_id,
        name: command.name.clone(),
        description: command.description.clone(),
        is_public_info: command.is_public_info,
        avatar_image_path: command.avatar_image_path.clone(),
    };
    catalog.insert_character(&character).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        character_id = %character.id,
        "character added"
    );
    Ok(character)
}

/// Handles [`AddContent`]: verifies the quest exists and that round/character
/// tags, when present, reference the same quest, then persists the item.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for a missing quest/round/character or
/// `DomainError::Validation` when a tag belongs to a different quest.
pub async fn handle_add_content(
    command: &AddContent,
    catalog: &dyn CatalogRepository,
) -> Result<Content, DomainError> {
    catalog
        .quest_by_id(command.quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", command.quest_id))?;

    if let Some(round_id) = command.round_id {
        let round = catalog
            .round_by_id(round_id)
            .await?
            .ok_or_else(|| DomainError::not_found("round", round_id))?;
        if round.quest_id != command.quest_id {
            return Err(DomainError::Validation(format!(
                "round {round_id} belongs to a different quest"
            )));
        }
    }
    if let Some(character_id) = command.character_id {
        let character = catalog
            .character_by_id(character_id)
            .await?
            .ok_or_else(|| DomainError::not_found("character", character_id))?;
        if character.quest_id != command.quest_id {
            return Err(DomainError::Validation(format!(
                "character {character_id} belongs to a different quest"
            )));
        }
    }

    let content = Content {
        id: Uuid::new_v4(),
        quest_id: command.quest_id,
        round_id: command.round_id,
        character_id: command.character_id,
        content_type: command.content_type,
        title: command.title.clone(),
        image_path: command.image_path.clone(),
        is_public: command.is_public,
        display_order: command.display_order,
    };
    catalog.insert_content(&content).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        content_id = %content.id,
        "content added"
    );
    Ok(content)
}

