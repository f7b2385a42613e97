//! MystQuest HTTP API.
//!
//! Axum router over the catalog and session contexts. Exposed as a library
//! so integration tests can build the router with in-memory collaborators.

pub mod error;
pub mod notify;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router (without middleware layers).
pub fn app_router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/quests", routes::quest::router())
        .nest("/api/v1/sessions", routes::session::router())
        .nest("/api/v1/player", routes::player::router())
}
