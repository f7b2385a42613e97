//! Routes for the Content Catalog bounded context.

use axum::extract::{Path, Query, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use mystquest_catalog::application::{command_handlers, query_handlers};
use mystquest_catalog::domain::commands;
use mystquest_catalog::domain::models::{Character, Content, ContentType, Quest, Round};
use mystquest_core::error::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Declared round count.
    pub number_of_rounds: i32,
    /// The authoring user.
    pub created_by: Uuid,
}

/// Request body for POST /{id}/rounds.
#[derive(Debug, Deserialize)]
pub struct AddRoundRequest {
    /// 1-based round number, unique within the quest.
    pub number: i32,
    /// Display title.
    pub title: String,
    /// Round narration.
    pub description: String,
}

/// Request body for POST /{id}/characters.
#[derive(Debug, Deserialize)]
pub struct AddCharacterRequest {
    /// Display name.
    pub name: String,
    /// Descriptive text.
    pub description: String,
    /// Whether the character's description is public to all players.
    pub is_public_info: bool,
    /// Optional avatar image path.
    pub avatar_image_path: Option<String>,
}

/// Request body for POST /{id}/content.
#[derive(Debug, Deserialize)]
pub struct AddContentRequest {
    /// Optional round gate.
    pub round_id: Option<Uuid>,
    /// Optional character gate.
    pub character_id: Option<Uuid>,
    /// Classification, one of the `ContentType` names.
    pub content_type: String,
    /// Display title.
    pub title: String,
    /// Backing image path.
    pub image_path: String,
    /// Whether the item is public once its round is reached.
    pub is_public: bool,
    /// Presentation order.
    pub display_order: i32,
}

/// Query string for GET /{id}/content.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    /// Restrict to one round's items.
    pub round_id: Option<Uuid>,
    /// Restrict to catalog-level items (no round tag).
    pub catalog_level: Option<bool>,
}

/// POST /
#[instrument(skip(state, request), fields(title = %request.title))]
async fn create_quest(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestRequest>,
) -> Result<Json<Quest>, ApiError> {
    let command = commands::CreateQuest {
        correlation_id: Uuid::new_v4(),
        title: request.title,
        description: request.description,
        number_of_rounds: request.number_of_rounds,
        created_by: request.created_by,
    };

    let quest = command_handlers::handle_create_quest(
        &command,
        state.clock.as_ref(),
        state.catalog.as_ref(),
    )
    .await?;
    Ok(Json(quest))
}

/// GET /
async fn list_quests(State(state): State<AppState>) -> Result<Json<Vec<Quest>>, ApiError> {
    let quests = query_handlers::list_quests(state.catalog.as_ref()).await?;
    Ok(Json(quests))
}

/// GET /{id}
async fn get_quest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quest>, ApiError> {
    let quest = query_handlers::get_quest(id, state.catalog.as_ref()).await?;
    Ok(Json(quest))
}

/// POST /{id}/rounds
#[instrument(skip(state, request), fields(quest_id = %id, number = request.number))]
async fn add_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddRoundRequest>,
) -> Result<Json<Round>, ApiError> {
    let command = commands::AddRound {
        correlation_id: Uuid::new_v4(),
        quest_id: id,
        number: request.number,
        title: request.title,
        description: request.description,
    };

    let round = command_handlers::handle_add_round(&command, state.catalog.as_ref()).await?;
    Ok(Json(round))
}

/// GET /{id}/rounds
async fn get_rounds(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Round>>, ApiError> {
    let rounds = query_handlers::get_rounds(id, state.catalog.as_ref()).await?;
    Ok(Json(rounds))
}

/// POST /{id}/characters
#[instrument(skip(state, request), fields(quest_id = %id, name = %request.name))]
async fn add_character(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCharacterRequest>,
) -> Result<Json<Character>, ApiError> {
    let command = commands::AddCharacter {
        correlation_id: Uuid::new_v4(),
        quest_id: id,
        name: request.name,
        description: request.description,
        is_public_info: request.is_public_info,
        avatar_image_path: request.avatar_image_path,
    };

    let character =
        command_handlers::handle_add_character(&command, state.catalog.as_ref()).await?;
    Ok(Json(character))
}

/// GET /{id}/characters
async fn get_characters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = query_handlers::get_characters(id, state.catalog.as_ref()).await?;
    Ok(Json(characters))
}

/// POST /{id}/content
#[instrument(skip(state, request), fields(quest_id = %id, title = %request.title))]
async fn add_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddContentRequest>,
) -> Result<Json<Content>, ApiError> {
    let content_type = ContentType::parse(&request.content_type).ok_or_else(|| {
        DomainError::Validation(format!("unknown content type {:?}", request.content_type))
    })?;
    let command = commands::AddContent {
        correlation_id: Uuid::new_v4(),
        quest_id: id,
        round_id: request.round_id,
        character_id: request.character_id,
        content_type,
        title: request.title,
        image_path: request.image_path,
        is_public: request.is_public,
        display_order: request.display_order,
    };

    let content = command_handlers::handle_add_content(&command, state.catalog.as_ref()).await?;
    Ok(Json(content))
}

/// GET /{id}/content
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let scope = match (query.round_id, query.catalog_level) {
        (Some(round_id), _) => query_handlers::ContentScope::Round(round_id),
        (None, Some(true)) => query_handlers::ContentScope::CatalogLevel,
        _ => query_handlers::ContentScope::All,
    };
    let content = query_handlers::get_content(id, scope, state.catalog.as_ref()).await?;
    Ok(Json(content))
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quest).get(list_quests))
        .route("/{id}", get(get_quest))
        .route("/{id}/rounds", post(add_round).get(get_rounds))
        .route("/{id}/characters", post(add_character).get(get_characters))
        .route("/{id}/content", post(add_content).get(get_content))
}
