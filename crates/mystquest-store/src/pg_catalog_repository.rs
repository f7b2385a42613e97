//! `PostgreSQL` implementation of the `CatalogRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mystquest_catalog::domain::models::{Character, Content, ContentType, Quest, Round};
use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::error::DomainError;

use crate::map_sqlx_err;

/// PostgreSQL-backed catalog repository.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    /// Creates a new `PgCatalogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuestRow {
    id: Uuid,
    title: String,
    description: String,
    number_of_rounds: i32,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QuestRow> for Quest {
    fn from(row: QuestRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            number_of_rounds: row.number_of_rounds,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoundRow {
    id: Uuid,
    quest_id: Uuid,
    number: i32,
    title: String,
    description: String,
}

impl From<RoundRow> for Round {
    fn from(row: RoundRow) -> Self {
        Self {
            id: row.id,
            quest_id: row.quest_id,
            number: row.number,
            title: row.title,
            description: row.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CharacterRow {
    id: Uuid,
    quest_id: Uuid,
    name: String,
    description: String,
    is_public_info: bool,
    avatar_image_path: Option<String>,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Self {
            id: row.id,
            quest_id: row.quest_id,
            name: row.name,
            description: row.description,
            is_public_info: row.is_public_info,
            avatar_image_path: row.avatar_image_path,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContentRow {
    id: Uuid,
    quest_id: Uuid,
    round_id: Option<Uuid>,
    character_id: Option<Uuid>,
    content_type: String,
    title: String,
    image_path: String,
    is_public: bool,
    display_order: i32,
}

impl TryFrom<ContentRow> for Content {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, DomainError> {
        let content_type = ContentType::parse(&row.content_type).ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "content {} has unknown content type {:?}",
                row.id, row.content_type
            ))
        })?;
        Ok(Self {
            id: row.id,
            quest_id: row.quest_id,
            round_id: row.round_id,
            character_id: row.character_id,
            content_type,
            title: row.title,
            image_path: row.image_path,
            is_public: row.is_public,
            display_order: row.display_order,
        })
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn insert_quest(&self, quest: &Quest) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO quests \
             (id, title, description, number_of_rounds, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(quest.id)
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(quest.number_of_rounds)
        .bind(quest.created_by)
        .bind(quest.created_at)
        .bind(quest.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn quest_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError> {
        let row: Option<QuestRow> = sqlx::query_as(
            "SELECT id, title, description, number_of_rounds, created_by, created_at, updated_at \
             FROM quests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Quest::from))
    }

    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError> {
        let rows: Vec<QuestRow> = sqlx::query_as(
            "SELECT id, title, description, number_of_rounds, created_by, created_at, updated_at \
             FROM quests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Quest::from).collect())
    }

    async fn insert_round(&self, round: &Round) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO rounds (id, quest_id, number, title, description) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(round.id)
        .bind(round.quest_id)
        .bind(round.number)
        .bind(&round.title)
        .bind(&round.description)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn round_by_id(&self, id: Uuid) -> Result<Option<Round>, DomainError> {
        let row: Option<RoundRow> = sqlx::query_as(
            "SELECT id, quest_id, number, title, description FROM rounds WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Round::from))
    }

    async fn rounds_by_quest(&self, quest_id: Uuid) -> Result<Vec<Round>, DomainError> {
        let rows: Vec<RoundRow> = sqlx::query_as(
            "SELECT id, quest_id, number, title, description \
             FROM rounds WHERE quest_id = $1 ORDER BY number ASC",
        )
        .bind(quest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Round::from).collect())
    }

    async fn insert_character(&self, character: &Character) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO characters \
             (id, quest_id, name, description, is_public_info, avatar_image_path) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(character.id)
        .bind(character.quest_id)
        .bind(&character.name)
        .bind(&character.description)
        .bind(character.is_public_info)
        .bind(&character.avatar_image_path)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn character_by_id(&self, id: Uuid) -> Result<Option<Character>, DomainError> {
        let row: Option<CharacterRow> = sqlx::query_as(
            "SELECT id, quest_id, name, description, is_public_info, avatar_image_path \
             FROM characters WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Character::from))
    }

    async fn characters_by_quest(&self, quest_id: Uuid) -> Result<Vec<Character>, DomainError> {
        let rows: Vec<CharacterRow> = sqlx::query_as(
            "SELECT id, quest_id, name, description, is_public_info, avatar_image_path \
             FROM characters WHERE quest_id = $1 ORDER BY name ASC",
        )
        .bind(quest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Character::from).collect())
    }

    async fn insert_content(&self, content: &Content) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO contents \
             (id, quest_id, round_id, character_id, content_type, title, image_path, \
              is_public, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(content.id)
        .bind(content.quest_id)
        .bind(content.round_id)
        .bind(content.character_id)
        .bind(content.content_type.as_str())
        .bind(&content.title)
        .bind(&content.image_path)
        .bind(content.is_public)
        .bind(content.display_order)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn content_by_quest(&self, quest_id: Uuid) -> Result<Vec<Content>, DomainError> {
        let rows: Vec<ContentRow> = sqlx::query_as(
            "SELECT id, quest_id, round_id, character_id, content_type, title, image_path, \
             is_public, display_order \
             FROM contents WHERE quest_id = $1 ORDER BY display_order ASC",
        )
        .bind(quest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        rows.into_iter().map(Content::try_from).collect()
    }
}
