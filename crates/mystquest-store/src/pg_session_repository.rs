//! `PostgreSQL` implementation of the `SessionRepository` trait.
//!
//! Updates are guarded by the record's `version` column. When the guard
//! misses, the row is re-read to tell a stale write (`ConcurrencyConflict`)
//! apart from a deleted record (`NotFound`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mystquest_core::error::DomainError;
use mystquest_session::domain::player::PlayerSession;
use mystquest_session::domain::session::{GameSession, GameSessionStatus};
use mystquest_session::repository::SessionRepository;

use crate::map_sqlx_err;

/// PostgreSQL-backed session repository.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Creates a new `PgSessionRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    quest_id: Uuid,
    status: String,
    current_round_id: Uuid,
    current_round: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    version: i64,
}

impl TryFrom<SessionRow> for GameSession {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, DomainError> {
        let status = GameSessionStatus::parse(&row.status).ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "game session {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            quest_id: row.quest_id,
            status,
            current_round_id: row.current_round_id,
            current_round: row.current_round,
            created_at: row.created_at,
            updated_at: row.updated_at,
            started_at: row.started_at,
            ended_at: row.ended_at,
            version: row.version,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: Uuid,
    game_session_id: Uuid,
    character_id: Option<Uuid>,
    player_name: String,
    invitation_token: String,
    email: String,
    last_active_at: DateTime<Utc>,
    is_connected: bool,
    version: i64,
}

impl From<PlayerRow> for PlayerSession {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            game_session_id: row.game_session_id,
            character_id: row.character_id,
            player_name: row.player_name,
            invitation_token: row.invitation_token,
            email: row.email,
            last_active_at: row.last_active_at,
            is_connected: row.is_connected,
            version: row.version,
        }
    }
}

const SESSION_COLUMNS: &str = "id, quest_id, status, current_round_id, current_round, \
     created_at, updated_at, started_at, ended_at, version";

const PLAYER_COLUMNS: &str = "id, game_session_id, character_id, player_name, \
     invitation_token, email, last_active_at, is_connected, version";

impl PgSessionRepository {
    async fn stored_session_version(&self, id: Uuid) -> Result<Option<i64>, DomainError> {
        let version: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM game_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(version.map(|(v,)| v))
    }

    async fn stored_player_version(&self, id: Uuid) -> Result<Option<i64>, DomainError> {
        let version: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM player_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(version.map(|(v,)| v))
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert_session(&self, session: &GameSession) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO game_sessions \
             (id, quest_id, status, current_round_id, current_round, \
              created_at, updated_at, started_at, ended_at, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(session.id)
        .bind(session.quest_id)
        .bind(session.status.as_str())
        .bind(session.current_round_id)
        .bind(session.current_round)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.started_at)
        .bind(session.ended_at)
        .bind(session.version)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn session_by_id(&self, id: Uuid) -> Result<Option<GameSession>, DomainError> {
        let row: Option<SessionRow> =
            sqlx::query_as(&format!("SELECT {SESSION_COLUMNS} FROM game_sessions WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        row.map(GameSession::try_from).transpose()
    }

    async fn list_sessions(&self) -> Result<Vec<GameSession>, DomainError> {
        let rows: Vec<SessionRow> = sqlx::query_as(&format!(
            "SELECT {SESSION_COLUMNS} FROM game_sessions ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        rows.into_iter().map(GameSession::try_from).collect()
    }

    async fn update_session(&self, session: &GameSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE game_sessions SET \
             status = $1, current_round_id = $2, current_round = $3, updated_at = $4, \
             started_at = $5, ended_at = $6, version = version + 1 \
             WHERE id = $7 AND version = $8",
        )
        .bind(session.status.as_str())
        .bind(session.current_round_id)
        .bind(session.current_round)
        .bind(session.updated_at)
        .bind(session.started_at)
        .bind(session.ended_at)
        .bind(session.id)
        .bind(session.version)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return match self.stored_session_version(session.id).await? {
                Some(actual) => Err(DomainError::ConcurrencyConflict {
                    entity: "game session",
                    id: session.id,
                    expected: session.version,
                    actual,
                }),
                None => Err(DomainError::not_found("game session", session.id)),
            };
        }
        Ok(())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), DomainError> {
        // Player sessions go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM game_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("game session", id));
        }
        Ok(())
    }

    async fn insert_player(&self, player: &PlayerSession) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO player_sessions \
             (id, game_session_id, character_id, player_name, invitation_token, \
              email, last_active_at, is_connected, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(player.id)
        .bind(player.game_session_id)
        .bind(player.character_id)
        .bind(&player.player_name)
        .bind(&player.invitation_token)
        .bind(&player.email)
        .bind(player.last_active_at)
        .bind(player.is_connected)
        .bind(player.version)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn player_by_id(&self, id: Uuid) -> Result<Option<PlayerSession>, DomainError> {
        let row: Option<PlayerRow> =
            sqlx::query_as(&format!("SELECT {PLAYER_COLUMNS} FROM player_sessions WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(row.map(PlayerSession::from))
    }

    async fn player_by_token(&self, token: &str) -> Result<Option<PlayerSession>, DomainError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!(
            "SELECT {PLAYER_COLUMNS} FROM player_sessions WHERE invitation_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(PlayerSession::from))
    }

    async fn player_by_session_and_email(
        &self,
        game_session_id: Uuid,
        email: &str,
    ) -> Result<Option<PlayerSession>, DomainError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!(
            "SELECT {PLAYER_COLUMNS} FROM player_sessions \
             WHERE game_session_id = $1 AND email = $2"
        ))
        .bind(game_session_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(PlayerSession::from))
    }

    async fn players_by_session(
        &self,
        game_session_id: Uuid,
    ) -> Result<Vec<PlayerSession>, DomainError> {
        let rows: Vec<PlayerRow> = sqlx::query_as(&format!(
            "SELECT {PLAYER_COLUMNS} FROM player_sessions \
             WHERE game_session_id = $1 ORDER BY last_active_at ASC"
        ))
        .bind(game_session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(PlayerSession::from).collect())
    }

    async fn update_player(&self, player: &PlayerSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE player_sessions SET \
             character_id = $1, player_name = $2, last_active_at = $3, \
             is_connected = $4, version = version + 1 \
             WHERE id = $5 AND version = $6",
        )
        .bind(player.character_id)
        .bind(&player.player_name)
        .bind(player.last_active_at)
        .bind(player.is_connected)
        .bind(player.id)
        .bind(player.version)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return match self.stored_player_version(player.id).await? {
                Some(actual) => Err(DomainError::ConcurrencyConflict {
                    entity: "player session",
                    id: player.id,
                    expected: player.version,
                    actual,
                }),
                None => Err(DomainError::not_found("player session", player.id)),
            };
        }
        Ok(())
    }
}
