//! Routes for invited players, addressed by invitation token.
//!
//! These endpoints never expose other players' tokens, game-master-only
//! material, or content from rounds that have not been reached.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use mystquest_session::application::{command_handlers, query_handlers};
use mystquest_session::domain::commands;
use mystquest_session::domain::player::PlayerSession;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{token}/join.
#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    /// The display name the player picked.
    pub player_name: String,
}

/// POST /{token}/join
#[instrument(skip(state, token, request), fields(player_name = %request.player_name))]
async fn join_game(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<JoinGameRequest>,
) -> Result<Json<PlayerSession>, ApiError> {
    let command = commands::JoinGame {
        correlation_id: Uuid::new_v4(),
        token,
        player_name: request.player_name,
    };

    let player = command_handlers::handle_join_game(
        &command,
        state.clock.as_ref(),
        state.sessions.as_ref(),
        state.notifier.as_ref(),
    )
    .await?;
    Ok(Json(player))
}

/// GET /{token}/game-info
async fn game_info(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<query_handlers::GameInfoView>, ApiError> {
    let view =
        query_handlers::get_game_info(&token, state.catalog.as_ref(), state.sessions.as_ref())
            .await?;
    Ok(Json(view))
}

/// GET /{token}/character
async fn character(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<query_handlers::CharacterView>, ApiError> {
    let view =
        query_handlers::get_character(&token, state.catalog.as_ref(), state.sessions.as_ref())
            .await?;
    Ok(Json(view))
}

/// GET /{token}/public-characters
async fn public_characters(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Vec<query_handlers::CharacterView>>, ApiError> {
    let views = query_handlers::get_public_characters(
        &token,
        state.catalog.as_ref(),
        state.sessions.as_ref(),
    )
    .await?;
    Ok(Json(views))
}

/// GET /{token}/current-round
async fn current_round(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<query_handlers::CurrentRoundView>, ApiError> {
    let view =
        query_handlers::get_current_round(&token, state.catalog.as_ref(), state.sessions.as_ref())
            .await?;
    Ok(Json(view))
}

/// GET /{token}/revealed-content
async fn revealed_content(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Vec<query_handlers::ContentView>>, ApiError> {
    let views = query_handlers::get_revealed_content(
        &token,
        state.catalog.as_ref(),
        state.sessions.as_ref(),
    )
    .await?;
    Ok(Json(views))
}

/// Returns the router for player-facing endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{token}/join", post(join_game))
        .route("/{token}/game-info", get(game_info))
        .route("/{token}/character", get(character))
        .route("/{token}/public-characters", get(public_characters))
        .route("/{token}/current-round", get(current_round))
        .route("/{token}/revealed-content", get(revealed_content))
}
