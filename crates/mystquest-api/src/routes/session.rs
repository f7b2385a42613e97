//! Routes for the Session & Progress bounded context (operator-facing).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use mystquest_core::error::DomainError;
use mystquest_session::application::{command_handlers, query_handlers};
use mystquest_session::domain::commands;
use mystquest_session::domain::player::PlayerSession;
use mystquest_session::domain::session::{GameSession, GameSessionStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// The quest to run.
    pub quest_id: Uuid,
}

/// Request body for PUT /{id}/status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status name (`Created`, `InProgress`, `Paused`, `Completed`).
    pub status: String,
}

/// Request body for POST /{id}/invite.
#[derive(Debug, Deserialize)]
pub struct InvitePlayerRequest {
    /// The invitee's email address.
    pub email: String,
}

/// Request body for PUT /{id}/players/{player_id}/character.
#[derive(Debug, Deserialize)]
pub struct AssignCharacterRequest {
    /// The character to bind.
    pub character_id: Uuid,
}

/// POST /
#[instrument(skip(state, request), fields(quest_id = %request.quest_id))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<GameSession>, ApiError> {
    let command = commands::CreateSession {
        correlation_id: Uuid::new_v4(),
        quest_id: request.quest_id,
    };

    let session = command_handlers::handle_create_session(
        &command,
        state.clock.as_ref(),
        state.catalog.as_ref(),
        state.sessions.as_ref(),
    )
    .await?;
    Ok(Json(session))
}

/// GET /
async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<query_handlers::SessionSummary>>, ApiError> {
    let summaries = query_handlers::list_sessions(state.sessions.as_ref()).await?;
    Ok(Json(summaries))
}

/// GET /{id}
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<query_handlers::SessionView>, ApiError> {
    let view = query_handlers::get_session(id, state.sessions.as_ref()).await?;
    Ok(Json(view))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.delete_session(id).await?;
    info!(session_id = %id, "game session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /{id}/status
#[instrument(skip(state, request), fields(session_id = %id))]
async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<GameSession>, ApiError> {
    let status = GameSessionStatus::parse(&request.status).ok_or_else(|| {
        DomainError::Validation(format!("unknown session status {:?}", request.status))
    })?;
    let command = commands::SetSessionStatus {
        correlation_id: Uuid::new_v4(),
        session_id: id,
        status,
    };

    let session = command_handlers::handle_set_status(
        &command,
        state.clock.as_ref(),
        state.sessions.as_ref(),
        state.notifier.as_ref(),
    )
    .await?;
    Ok(Json(session))
}

/// PUT /{id}/advance-round
#[instrument(skip(state), fields(session_id = %id))]
async fn advance_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSession>, ApiError> {
    let command = commands::AdvanceRound {
        correlation_id: Uuid::new_v4(),
        session_id: id,
    };

    let session = command_handlers::handle_advance_round(
        &command,
        state.clock.as_ref(),
        state.catalog.as_ref(),
        state.sessions.as_ref(),
        state.notifier.as_ref(),
    )
    .await?;
    Ok(Json(session))
}

/// POST /{id}/invite
#[instrument(skip(state, request), fields(session_id = %id))]
async fn invite_player(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InvitePlayerRequest>,
) -> Result<Json<PlayerSession>, ApiError> {
    let command = commands::InvitePlayer {
        correlation_id: Uuid::new_v4(),
        session_id: id,
        email: request.email,
    };

    let player = command_handlers::handle_invite_player(
        &command,
        state.clock.as_ref(),
        state.tokens.as_ref(),
        state.sessions.as_ref(),
    )
    .await?;
    Ok(Json(player))
}

/// PUT /{id}/players/{player_id}/character
#[instrument(skip(state, request), fields(session_id = %id, player_session_id = %player_id))]
async fn assign_character(
    State(state): State<AppState>,
    Path((id, player_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<AssignCharacterRequest>,
) -> Result<Json<PlayerSession>, ApiError> {
    let command = commands::AssignCharacter {
        correlation_id: Uuid::new_v4(),
        session_id: id,
        player_session_id: player_id,
        character_id: request.character_id,
    };

    let player = command_handlers::handle_assign_character(
        &command,
        state.catalog.as_ref(),
        state.sessions.as_ref(),
    )
    .await?;
    Ok(Json(player))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route("/{id}", get(get_session).delete(delete_session))
        .route("/{id}/status", put(set_status))
        .route("/{id}/advance-round", put(advance_round))
        .route("/{id}/invite", post(invite_player))
        .route("/{id}/players/{player_id}/character", put(assign_character))
}
