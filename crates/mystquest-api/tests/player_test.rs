//! Integration tests for the player-facing endpoints, including a full
//! play-through of a three-round mystery.

mod common;

use axum::Router;
use axum::http::StatusCode;

struct Manor {
    app: Router,
    session_id: String,
    round_ids: Vec<String>,
    butler_id: String,
    maid_id: String,
}

/// Authors a three-round quest with two characters and a spread of content,
/// creates a session, and returns the handles the tests need.
async fn setup_manor() -> Manor {
    let app = common::build_test_app();
    let quest_id = common::create_quest(&app, "The Manor", 3).await;
    let round_ids = common::add_rounds(&app, &quest_id, 3).await;

    let mut character_ids = Vec::new();
    for (name, is_public_info) in [("Butler", true), ("Maid", false)] {
        let (status, json) = common::post_json(
            app.clone(),
            &format!("/api/v1/quests/{quest_id}/characters"),
            &serde_json::json!({
                "name": name,
                "description": format!("The {name}"),
                "is_public_info": is_public_info,
                "avatar_image_path": null,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        character_ids.push(json["id"].as_str().unwrap().to_owned());
    }
    let (butler_id, maid_id) = (character_ids[0].clone(), character_ids[1].clone());

    // Round 1: a public clue, one secret per character. Round 2: a public
    // clue. Plus one catalog-level instruction sheet.
    let items = [
        (Some(round_ids[0].as_str()), None, true, 1, "Floor plan"),
        (
            Some(round_ids[0].as_str()),
            Some(butler_id.as_str()),
            false,
            2,
            "Butler's secret",
        ),
        (
            Some(round_ids[0].as_str()),
            Some(maid_id.as_str()),
            false,
            3,
            "Maid's secret",
        ),
        (Some(round_ids[1].as_str()), None, true, 4, "Torn letter"),
        (None, None, true, 5, "How to play"),
    ];
    for (round_id, character_id, is_public, display_order, title) in items {
        let (status, _) = common::post_json(
            app.clone(),
            &format!("/api/v1/quests/{quest_id}/content"),
            &serde_json::json!({
                "round_id": round_id,
                "character_id": character_id,
                "content_type": if round_id.is_some() { "Clue" } else { "GeneralInstruction" },
                "title": title,
                "image_path": "",
                "is_public": is_public,
                "display_order": display_order,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/sessions",
        &serde_json::json!({ "quest_id": quest_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session_id = json["id"].as_str().unwrap().to_owned();

    Manor {
        app,
        session_id,
        round_ids,
        butler_id,
        maid_id,
    }
}

async fn invite(manor: &Manor, email: &str) -> (String, String) {
    let (status, json) = common::post_json(
        manor.app.clone(),
        &format!("/api/v1/sessions/{}/invite", manor.session_id),
        &serde_json::json!({ "email": email }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        json["id"].as_str().unwrap().to_owned(),
        json["invitation_token"].as_str().unwrap().to_owned(),
    )
}

async fn assign(manor: &Manor, player_id: &str, character_id: &str) {
    let (status, _) = common::put_json(
        manor.app.clone(),
        &format!(
            "/api/v1/sessions/{}/players/{player_id}/character",
            manor.session_id
        ),
        &serde_json::json!({ "character_id": character_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_join_game_connects_player_and_game_info_reflects_it() {
    let manor = setup_manor().await;
    let (player_id, token) = invite(&manor, "alice@example.com").await;
    assign(&manor, &player_id, &manor.butler_id).await;

    let (status, json) = common::post_json(
        manor.app.clone(),
        &format!("/api/v1/player/{token}/join"),
        &serde_json::json!({ "player_name": "Alice" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["player_name"], "Alice");
    assert_eq!(json["is_connected"], true);

    let (status, json) =
        common::get_json(manor.app.clone(), &format!("/api/v1/player/{token}/game-info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["quest_title"], "The Manor");
    assert_eq!(json["status"], "Created");
    assert_eq!(json["current_round"], 1);
    assert_eq!(json["round_title"], "Round 1");
    assert_eq!(json["player_name"], "Alice");
    assert_eq!(json["has_character"], true);
}

#[tokio::test]
async fn test_join_with_unknown_token_returns_404() {
    let manor = setup_manor().await;

    let (status, json) = common::post_json(
        manor.app,
        "/api/v1/player/no-such-token/join",
        &serde_json::json!({ "player_name": "Mallory" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_character_endpoint_requires_an_assignment() {
    let manor = setup_manor().await;
    let (_, token) = invite(&manor, "bob@example.com").await;

    let (status, json) =
        common::get_json(manor.app.clone(), &format!("/api/v1/player/{token}/character")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "invalid_state");

    let (_, json) = common::get_json(
        manor.app,
        &format!("/api/v1/player/{token}/public-characters"),
    )
    .await;
    // Only the Butler's dossier is public.
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Butler");
}

#[tokio::test]
async fn test_current_round_splits_public_and_character_content() {
    let manor = setup_manor().await;
    let (player_id, token) = invite(&manor, "alice@example.com").await;
    assign(&manor, &player_id, &manor.butler_id).await;

    let (status, json) = common::get_json(
        manor.app,
        &format!("/api/v1/player/{token}/current-round"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["round_number"], 1);
    // Public hand: the floor plan. Not the torn letter (round 2), not the
    // instruction sheet (catalog-level), not the maid's secret.
    let public: Vec<&str> = json["public_content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(public, vec!["Floor plan"]);
    let private: Vec<&str> = json["character_content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(private, vec!["Butler's secret"]);
}

#[tokio::test]
async fn test_revealed_content_accumulates_rounds_without_leaking_ahead() {
    let manor = setup_manor().await;
    let (alice_id, alice_token) = invite(&manor, "alice@example.com").await;
    let (maid_player_id, maid_token) = invite(&manor, "bob@example.com").await;
    assign(&manor, &alice_id, &manor.butler_id).await;
    assign(&manor, &maid_player_id, &manor.maid_id).await;

    // Start play and advance into round 2.
    let (status, _) = common::put_json(
        manor.app.clone(),
        &format!("/api/v1/sessions/{}/status", manor.session_id),
        &serde_json::json!({ "status": "InProgress" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = common::put_empty(
        manor.app.clone(),
        &format!("/api/v1/sessions/{}/advance-round", manor.session_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_round_id"], manor.round_ids[1]);

    // Alice (Butler) sees both public clues and her own secret, in display
    // order, and never the maid's secret.
    let (status, json) = common::get_json(
        manor.app.clone(),
        &format!("/api/v1/player/{alice_token}/revealed-content"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Floor plan", "Butler's secret", "Torn letter"]);

    // Bob (Maid) sees his secret instead.
    let (_, json) = common::get_json(
        manor.app,
        &format!("/api/v1/player/{maid_token}/revealed-content"),
    )
    .await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Floor plan", "Maid's secret", "Torn letter"]);
}
