//! Integration tests for the Content Catalog context.

mod common;

use axum::http::StatusCode;
use uuid::Uuid;

#[tokio::test]
async fn test_create_quest_round_trip() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/quests",
        &serde_json::json!({
            "title": "The Manor",
            "description": "A murder in the manor",
            "number_of_rounds": 3,
            "created_by": Uuid::new_v4(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "The Manor");
    assert_eq!(json["number_of_rounds"], 3);
    let quest_id = json["id"].as_str().unwrap().to_owned();

    // GET /{id} — verify persisted state
    let (status, json) = common::get_json(app, &format!("/api/v1/quests/{quest_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], quest_id);
    assert_eq!(json["title"], "The Manor");
}

#[tokio::test]
async fn test_create_quest_with_zero_rounds_returns_400() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/quests",
        &serde_json::json!({
            "title": "Empty",
            "description": "",
            "number_of_rounds": 0,
            "created_by": Uuid::new_v4(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_get_unknown_quest_returns_404() {
    let app = common::build_test_app();

    let (status, json) =
        common::get_json(app, &format!("/api/v1/quests/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_rounds_are_listed_in_number_order() {
    let app = common::build_test_app();
    let quest_id = common::create_quest(&app, "The Manor", 3).await;

    // Author out of order.
    for number in [3, 1, 2] {
        let (status, _) = common::post_json(
            app.clone(),
            &format!("/api/v1/quests/{quest_id}/rounds"),
            &serde_json::json!({
                "number": number,
                "title": format!("Round {number}"),
                "description": "",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) =
        common::get_json(app, &format!("/api/v1/quests/{quest_id}/rounds")).await;

    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_duplicate_round_number_returns_409() {
    let app = common::build_test_app();
    let quest_id = common::create_quest(&app, "The Manor", 3).await;
    common::add_rounds(&app, &quest_id, 1).await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/quests/{quest_id}/rounds"),
        &serde_json::json!({ "number": 1, "title": "Again", "description": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn test_add_content_with_unknown_type_returns_400() {
    let app = common::build_test_app();
    let quest_id = common::create_quest(&app, "The Manor", 1).await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/quests/{quest_id}/content"),
        &serde_json::json!({
            "content_type": "Hologram",
            "title": "clue",
            "image_path": "clues/1.png",
            "is_public": true,
            "display_order": 1,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_content_listing_supports_round_and_catalog_scopes() {
    let app = common::build_test_app();
    let quest_id = common::create_quest(&app, "The Manor", 2).await;
    let round_ids = common::add_rounds(&app, &quest_id, 2).await;

    for (round_id, title) in [
        (Some(round_ids[0].as_str()), "round one clue"),
        (Some(round_ids[1].as_str()), "round two clue"),
        (None, "general instructions"),
    ] {
        let (status, _) = common::post_json(
            app.clone(),
            &format!("/api/v1/quests/{quest_id}/content"),
            &serde_json::json!({
                "round_id": round_id,
                "content_type": if round_id.is_some() { "Clue" } else { "GeneralInstruction" },
                "title": title,
                "image_path": "",
                "is_public": true,
                "display_order": 1,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = common::get_json(
        app.clone(),
        &format!("/api/v1/quests/{quest_id}/content?round_id={}", round_ids[0]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "round one clue");

    let (status, json) = common::get_json(
        app,
        &format!("/api/v1/quests/{quest_id}/content?catalog_level=true"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "general instructions");
}
