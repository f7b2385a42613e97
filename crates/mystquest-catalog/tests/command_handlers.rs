//! Tests for the Content Catalog command handlers.
//!
//! These live as integration tests because `mystquest-test-support` depends
//! on this crate; inside unit tests the cyclic dev-dependency would compile
//! the crate twice and its types would not unify with the test doubles.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use mystquest_catalog::application::command_handlers::{
    handle_add_content, handle_add_round, handle_create_quest,
};
use mystquest_catalog::domain::commands::{AddContent, AddRound, CreateQuest};
use mystquest_catalog::domain::models::ContentType;
use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::error::DomainError;
use mystquest_test_support::{FixedClock, InMemoryCatalog};

fn create_quest_command(number_of_rounds: i32) -> CreateQuest {
    CreateQuest {
        correlation_id: Uuid::new_v4(),
        title: "The Manor".to_owned(),
        description: "A murder in the manor".to_owned(),
        number_of_rounds,
        created_by: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_create_quest_persists_quest_with_clock_timestamps() {
    // Arrange
    let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    let clock = FixedClock(fixed_now);
    let catalog = InMemoryCatalog::new();
    let command = create_quest_command(3);

    // Act
    let quest = handle_create_quest(&command, &clock, &catalog)
        .await
        .unwrap();

    // Assert
    assert_eq!(quest.created_at, fixed_now);
    assert_eq!(quest.updated_at, fixed_now);
    let stored = catalog.quest_by_id(quest.id).await.unwrap().unwrap();
    assert_eq!(stored, quest);
}

#[tokio::test]
async fn test_create_quest_rejects_round_count_out_of_bounds() {
    let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    let clock = FixedClock(fixed_now);
    let catalog = InMemoryCatalog::new();

    for bad in [0, 21, -4] {
        let result = handle_create_quest(&create_quest_command(bad), &clock, &catalog).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}

#[tokio::test]
async fn test_add_round_rejects_duplicate_number() {
    // Arrange
    let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    let clock = FixedClock(fixed_now);
    let catalog = InMemoryCatalog::new();
    let quest = handle_create_quest(&create_quest_command(3), &clock, &catalog)
        .await
        .unwrap();
    let command = AddRound {
        correlation_id: Uuid::new_v4(),
        quest_id: quest.id,
        number: 1,
        title: "Opening".to_owned(),
        description: String::new(),
    };
    handle_add_round(&command, &catalog).await.unwrap();

    // Act
    let result = handle_add_round(&command, &catalog).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert_eq!(catalog.rounds_by_quest(quest.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_round_returns_not_found_for_missing_quest() {
    let catalog = InMemoryCatalog::new();
    let command = AddRound {
        correlation_id: Uuid::new_v4(),
        quest_id: Uuid::new_v4(),
        number: 1,
        title: "Opening".to_owned(),
        description: String::new(),
    };

    let result = handle_add_round(&command, &catalog).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_add_content_rejects_round_from_another_quest() {
    // Arrange
    let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    let clock = FixedClock(fixed_now);
    let catalog = InMemoryCatalog::new();
    let quest_a = handle_create_quest(&create_quest_command(3), &clock, &catalog)
        .await
        .unwrap();
    let quest_b = handle_create_quest(&create_quest_command(3), &clock, &catalog)
        .await
        .unwrap();
    let round_b = handle_add_round(
        &AddRound {
            correlation_id: Uuid::new_v4(),
            quest_id: quest_b.id,
            number: 1,
            title: "Opening".to_owned(),
            description: String::new(),
        },
        &catalog,
    )
    .await
    .unwrap();

    // Act
    let result = handle_add_content(
        &AddContent {
            correlation_id: Uuid::new_v4(),
            quest_id: quest_a.id,
            round_id: Some(round_b.id),
            character_id: None,
            content_type: ContentType::Clue,
            title: "Bloody glove".to_owned(),
            image_path: "clues/glove.png".to_owned(),
            is_public: true,
            display_order: 1,
        },
        &catalog,
    )
    .await;

    // Assert
    assert!(matches!(result, Err(DomainError::Validation(_))));
}
