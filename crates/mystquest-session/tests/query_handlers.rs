//! Tests for the Session & Progress query handlers.
//!
//! These live as integration tests because `mystquest-test-support` depends
//! on this crate; inside unit tests the cyclic dev-dependency would compile
//! the crate twice and its types would not unify with the test doubles.

use chrono::{DateTime, TimeZone, Utc};
use mystquest_catalog::domain::models::{Character, Content, ContentType, Quest, Round};
use mystquest_core::error::DomainError;
use mystquest_session::application::query_handlers::{
    get_character, get_current_round, get_game_info, get_public_characters, get_revealed_content,
    get_session, list_sessions,
};
use mystquest_session::domain::player::PlayerSession;
use mystquest_session::domain::session::{GameSession, GameSessionStatus};
use mystquest_session::repository::SessionRepository;
use mystquest_test_support::{InMemoryCatalog, InMemorySessionStore};
use uuid::Uuid;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

struct Fixture {
    catalog: InMemoryCatalog,
    store: InMemorySessionStore,
    quest: Quest,
    rounds: Vec<Round>,
    session: GameSession,
}

async fn fixture(round_count: i32) -> Fixture {
    let catalog = InMemoryCatalog::new();
    let store = InMemorySessionStore::new();
    let now = fixed_now();
    let quest = Quest {
        id: Uuid::new_v4(),
        title: "The Manor".to_owned(),
        description: "A murder in the manor".to_owned(),
        number_of_rounds: round_count,
        created_by: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    };
    catalog.put_quest(quest.clone());
    let rounds: Vec<Round> = (1..=round_count)
        .map(|number| Round {
            id: Uuid::new_v4(),
            quest_id: quest.id,
            number,
            title: format!("Round {number}"),
            description: format!("Round {number} description"),
        })
        .collect();
    for round in &rounds {
        catalog.put_round(round.clone());
    }
    let session = GameSession::create(quest.id, &rounds[0], now);
    store.insert_session(&session).await.unwrap();
    Fixture {
        catalog,
        store,
        quest,
        rounds,
        session,
    }
}

async fn invited(fx: &Fixture, token: &str, character_id: Option<Uuid>) -> PlayerSession {
    let mut player = PlayerSession::invite(
        fx.session.id,
        format!("{token}@x.com"),
        token.to_owned(),
        fixed_now(),
    );
    player.character_id = character_id;
    fx.store.insert_player(&player).await.unwrap();
    player
}

fn character(quest_id: Uuid, name: &str, is_public_info: bool) -> Character {
    Character {
        id: Uuid::new_v4(),
        quest_id,
        name: name.to_owned(),
        description: String::new(),
        is_public_info,
        avatar_image_path: None,
    }
}

fn content(
    quest_id: Uuid,
    round_id: Option<Uuid>,
    character_id: Option<Uuid>,
    is_public: bool,
    display_order: i32,
) -> Content {
    Content {
        id: Uuid::new_v4(),
        quest_id,
        round_id,
        character_id,
        content_type: ContentType::Clue,
        title: format!("clue {display_order}"),
        image_path: String::new(),
        is_public,
        display_order,
    }
}

#[tokio::test]
async fn test_get_session_includes_players_and_version() {
    // Arrange
    let fx = fixture(3).await;
    invited(&fx, "tok-1", None).await;
    invited(&fx, "tok-2", None).await;

    // Act
    let view = get_session(fx.session.id, &fx.store).await.unwrap();

    // Assert
    assert_eq!(view.id, fx.session.id);
    assert_eq!(view.quest_id, fx.quest.id);
    assert_eq!(view.version, 0);
    assert_eq!(view.players.len(), 2);
}

#[tokio::test]
async fn test_list_sessions_reports_player_counts() {
    // Arrange
    let fx = fixture(3).await;
    invited(&fx, "tok-1", None).await;
    let lone_session = GameSession::create(fx.quest.id, &fx.rounds[0], fixed_now());
    fx.store.insert_session(&lone_session).await.unwrap();

    // Act
    let summaries = list_sessions(&fx.store).await.unwrap();

    // Assert
    assert_eq!(summaries.len(), 2);
    let by_id = |id: Uuid| summaries.iter().find(|s| s.id == id).unwrap();
    assert_eq!(by_id(fx.session.id).player_count, 1);
    assert_eq!(by_id(lone_session.id).player_count, 0);
}

#[tokio::test]
async fn test_get_game_info_describes_quest_round_and_player() {
    // Arrange
    let fx = fixture(3).await;
    let mut player = invited(&fx, "tok-1", None).await;
    player.join("Alice", fixed_now());
    fx.store.update_player(&player).await.unwrap();

    // Act
    let info = get_game_info("tok-1", &fx.catalog, &fx.store).await.unwrap();

    // Assert
    assert_eq!(info.quest_title, "The Manor");
    assert_eq!(info.status, GameSessionStatus::Created);
    assert_eq!(info.current_round, 1);
    assert_eq!(info.round_title, "Round 1");
    assert_eq!(info.player_name, "Alice");
    assert!(info.is_connected);
    assert!(!info.has_character);
}

#[tokio::test]
async fn test_get_character_before_assignment_is_invalid_state() {
    let fx = fixture(3).await;
    invited(&fx, "tok-1", None).await;

    let result = get_character("tok-1", &fx.catalog, &fx.store).await;

    assert!(matches!(result, Err(DomainError::InvalidState(_))));
}

#[tokio::test]
async fn test_get_character_returns_assigned_character() {
    // Arrange
    let fx = fixture(3).await;
    let butler = character(fx.quest.id, "Butler", false);
    fx.catalog.put_character(butler.clone());
    invited(&fx, "tok-1", Some(butler.id)).await;

    // Act
    let view = get_character("tok-1", &fx.catalog, &fx.store).await.unwrap();

    // Assert
    assert_eq!(view.id, butler.id);
    assert_eq!(view.name, "Butler");
}

#[tokio::test]
async fn test_get_public_characters_filters_private_dossiers() {
    // Arrange
    let fx = fixture(3).await;
    fx.catalog.put_character(character(fx.quest.id, "Butler", true));
    fx.catalog.put_character(character(fx.quest.id, "Killer", false));
    invited(&fx, "tok-1", None).await;

    // Act
    let views = get_public_characters("tok-1", &fx.catalog, &fx.store)
        .await
        .unwrap();

    // Assert
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Butler");
}

#[tokio::test]
async fn test_get_current_round_splits_public_and_character_hands() {
    // Arrange
    let fx = fixture(3).await;
    let butler = character(fx.quest.id, "Butler", false);
    let maid = character(fx.quest.id, "Maid", false);
    fx.catalog.put_character(butler.clone());
    fx.catalog.put_character(maid.clone());
    let round_one = fx.rounds[0].id;
    fx.catalog
        .put_content(content(fx.quest.id, Some(round_one), None, true, 2));
    fx.catalog
        .put_content(content(fx.quest.id, Some(round_one), Some(butler.id), false, 1));
    // Other character's secret, catalog-level item, next round's clue.
    fx.catalog
        .put_content(content(fx.quest.id, Some(round_one), Some(maid.id), false, 3));
    fx.catalog.put_content(content(fx.quest.id, None, None, true, 4));
    fx.catalog
        .put_content(content(fx.quest.id, Some(fx.rounds[1].id), None, true, 5));
    invited(&fx, "tok-1", Some(butler.id)).await;

    // Act
    let view = get_current_round("tok-1", &fx.catalog, &fx.store)
        .await
        .unwrap();

    // Assert
    assert_eq!(view.round_number, 1);
    assert_eq!(view.public_content.len(), 1);
    assert_eq!(view.public_content[0].display_order, 2);
    assert_eq!(view.character_content.len(), 1);
    assert_eq!(view.character_content[0].display_order, 1);
}

#[tokio::test]
async fn test_get_revealed_content_unions_past_rounds_never_future_ones() {
    // Arrange
    let fx = fixture(3).await;
    fx.catalog
        .put_content(content(fx.quest.id, Some(fx.rounds[0].id), None, true, 1));
    fx.catalog
        .put_content(content(fx.quest.id, Some(fx.rounds[1].id), None, true, 2));
    fx.catalog
        .put_content(content(fx.quest.id, Some(fx.rounds[2].id), None, true, 3));
    invited(&fx, "tok-1", None).await;
    let mut session = fx.store.session_by_id(fx.session.id).await.unwrap().unwrap();
    session.advance_to(&fx.rounds[1], fixed_now());
    fx.store.update_session(&session).await.unwrap();

    // Act
    let views = get_revealed_content("tok-1", &fx.catalog, &fx.store)
        .await
        .unwrap();

    // Assert
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].display_order, 1);
    assert_eq!(views[1].display_order, 2);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let fx = fixture(1).await;

    let result = get_game_info("nope", &fx.catalog, &fx.store).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
