//! Query handlers for the Session & Progress context.
//!
//! Two audiences: operator queries addressed by session id (full records,
//! including invitation tokens), and player queries addressed by invitation
//! token (views filtered through the visibility rule, never exposing other
//! players' tokens or unrevealed content).

use chrono::{DateTime, Utc};
use mystquest_catalog::domain::models::{Character, Content};
use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::player::PlayerSession;
use crate::domain::session::{GameSession, GameSessionStatus};
use crate::domain::visibility;
use crate::repository::SessionRepository;

/// Operator view of one player within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: Uuid,
    pub character_id: Option<Uuid>,
    pub player_name: String,
    pub invitation_token: String,
    pub email: String,
    pub last_active_at: DateTime<Utc>,
    pub is_connected: bool,
}

impl From<PlayerSession> for PlayerView {
    fn from(player: PlayerSession) -> Self {
        Self {
            id: player.id,
            character_id: player.character_id,
            player_name: player.player_name,
            invitation_token: player.invitation_token,
            email: player.email,
            last_active_at: player.last_active_at,
            is_connected: player.is_connected,
        }
    }
}

/// Operator view of one session with its players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub quest_id: Uuid,
    pub status: GameSessionStatus,
    pub current_round_id: Uuid,
    pub current_round: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub version: i64,
    pub players: Vec<PlayerView>,
}

impl SessionView {
    fn assemble(session: GameSession, players: Vec<PlayerSession>) -> Self {
        Self {
            id: session.id,
            quest_id: session.quest_id,
            status: session.status,
            current_round_id: session.current_round_id,
            current_round: session.current_round,
            created_at: session.created_at,
            updated_at: session.updated_at,
            started_at: session.started_at,
            ended_at: session.ended_at,
            version: session.version,
            players: players.into_iter().map(PlayerView::from).collect(),
        }
    }
}

/// One row of the session list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub quest_id: Uuid,
    pub status: GameSessionStatus,
    pub current_round: i32,
    pub created_at: DateTime<Utc>,
    pub player_count: usize,
}

/// What a player sees on their lobby screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfoView {
    pub quest_title: String,
    pub quest_description: String,
    pub status: GameSessionStatus,
    pub current_round: i32,
    pub round_title: String,
    pub player_name: String,
    pub is_connected: bool,
    pub has_character: bool,
}

/// Player-facing character card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_public_info: bool,
    pub avatar_image_path: Option<String>,
}

impl From<Character> for CharacterView {
    fn from(character: Character) -> Self {
        Self {
            id: character.id,
            name: character.name,
            description: character.description,
            is_public_info: character.is_public_info,
            avatar_image_path: character.avatar_image_path,
        }
    }
}

/// Player-facing content card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentView {
    pub id: Uuid,
    pub content_type: String,
    pub title: String,
    pub image_path: String,
    pub is_public: bool,
    pub display_order: i32,
}

impl From<&Content> for ContentView {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id,
            content_type: content.content_type.as_str().to_owned(),
            title: content.title.clone(),
            image_path: content.image_path.clone(),
            is_public: content.is_public,
            display_order: content.display_order,
        }
    }
}

/// The current round as one player sees it: the round header plus the
/// public hand and the player's private hand, both display-ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentRoundView {
    pub round_number: i32,
    pub round_title: String,
    pub round_description: String,
    pub public_content: Vec<ContentView>,
    pub character_content: Vec<ContentView>,
}

/// Operator query: one session with its players.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the session does not exist.
pub async fn get_session(
    session_id: Uuid,
    sessions: &dyn SessionRepository,
) -> Result<SessionView, DomainError> {
    let session = sessions
        .session_by_id(session_id)
        .await?
        .ok_or_else(|| DomainError::not_found("game session", session_id))?;
    let players = sessions.players_by_session(session_id).await?;
    Ok(SessionView::assemble(session, players))
}

/// Operator query: all sessions, newest first.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn list_sessions(
    sessions: &dyn SessionRepository,
) -> Result<Vec<SessionSummary>, DomainError> {
    let mut summaries = Vec::new();
    for session in sessions.list_sessions().await? {
        let player_count = sessions.players_by_session(session.id).await?.len();
        summaries.push(SessionSummary {
            id: session.id,
            quest_id: session.quest_id,
            status: session.status,
            current_round: session.current_round,
            created_at: session.created_at,
            player_count,
        });
    }
    Ok(summaries)
}

/// Resolves an invitation token to its player and owning session.
async fn player_and_session(
    token: &str,
    sessions: &dyn SessionRepository,
) -> Result<(PlayerSession, GameSession), DomainError> {
    let player = sessions
        .player_by_token(token)
        .await?
        .ok_or_else(|| DomainError::token_not_found(token))?;
    let session = sessions
        .session_by_id(player.game_session_id)
        .await?
        .ok_or_else(|| DomainError::not_found("game session", player.game_session_id))?;
    Ok((player, session))
}

/// Player query: lobby summary of the game behind an invitation token.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the token, quest, or current round is
/// unknown.
pub async fn get_game_info(
    token: &str,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<GameInfoView, DomainError> {
    let (player, session) = player_and_session(token, sessions).await?;
    let quest = catalog
        .quest_by_id(session.quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", session.quest_id))?;
    let round = catalog
        .round_by_id(session.current_round_id)
        .await?
        .ok_or_else(|| DomainError::not_found("round", session.current_round_id))?;
    Ok(GameInfoView {
        quest_title: quest.title,
        quest_description: quest.description,
        status: session.status,
        current_round: session.current_round,
        round_title: round.title,
        player_name: player.player_name,
        is_connected: player.is_connected,
        has_character: player.character_id.is_some(),
    })
}

/// Player query: the character bound to the token's player.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown token and
/// `DomainError::InvalidState` if no character has been assigned yet.
pub async fn get_character(
    token: &str,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<CharacterView, DomainError> {
    let (player, _) = player_and_session(token, sessions).await?;
    let Some(character_id) = player.character_id else {
        return Err(DomainError::InvalidState(
            "no character has been assigned to this player yet".into(),
        ));
    };
    let character = catalog
        .character_by_id(character_id)
        .await?
        .ok_or_else(|| DomainError::not_found("character", character_id))?;
    Ok(character.into())
}

/// Player query: the quest's publicly known characters (dossier page).
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown token.
pub async fn get_public_characters(
    token: &str,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<Vec<CharacterView>, DomainError> {
    let (_, session) = player_and_session(token, sessions).await?;
    let characters = catalog.characters_by_quest(session.quest_id).await?;
    Ok(characters
        .into_iter()
        .filter(|c| c.is_public_info)
        .map(CharacterView::from)
        .collect())
}

/// Player query: the current round with its public hand and the player's
/// private hand. Character-tagged items that are also public are served in
/// the public list only.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the token or current round is
/// unknown.
pub async fn get_current_round(
    token: &str,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<CurrentRoundView, DomainError> {
    let (player, session) = player_and_session(token, sessions).await?;
    let round = catalog
        .round_by_id(session.current_round_id)
        .await?
        .ok_or_else(|| DomainError::not_found("round", session.current_round_id))?;
    let contents = catalog.content_by_quest(session.quest_id).await?;

    let in_scope = std::iter::once(round.id).collect();
    let visible = visibility::resolve(&contents, &in_scope, player.character_id);
    let (public, private): (Vec<_>, Vec<_>) = visible.into_iter().partition(|c| c.is_public);

    Ok(CurrentRoundView {
        round_number: round.number,
        round_title: round.title,
        round_description: round.description,
        public_content: public.into_iter().map(ContentView::from).collect(),
        character_content: private.into_iter().map(ContentView::from).collect(),
    })
}

/// Player query: everything revealed so far — the visible union across the
/// current round and all earlier ones, display-ordered.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown token.
pub async fn get_revealed_content(
    token: &str,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<Vec<ContentView>, DomainError> {
    let (player, session) = player_and_session(token, sessions).await?;
    let rounds = catalog.rounds_by_quest(session.quest_id).await?;
    let contents = catalog.content_by_quest(session.quest_id).await?;

    let in_scope = visibility::rounds_up_to(&rounds, session.current_round);
    let visible = visibility::resolve(&contents, &in_scope, player.character_id);
    Ok(visible.into_iter().map(ContentView::from).collect())
}

