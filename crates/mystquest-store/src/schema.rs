//! Database schema for the catalog and session tables.

use mystquest_core::error::DomainError;
use sqlx::PgPool;

/// SQL to create the catalog tables (quests, rounds, characters, contents).
pub const CREATE_CATALOG_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS quests (
    id               UUID PRIMARY KEY,
    title            VARCHAR(255) NOT NULL,
    description      TEXT NOT NULL,
    number_of_rounds INT NOT NULL,
    created_by       UUID NOT NULL,
    created_at       TIMESTAMPTZ NOT NULL,
    updated_at       TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS rounds (
    id          UUID PRIMARY KEY,
    quest_id    UUID NOT NULL REFERENCES quests (id) ON DELETE CASCADE,
    number      INT NOT NULL,
    title       VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    UNIQUE (quest_id, number)
);

CREATE INDEX IF NOT EXISTS idx_rounds_quest_id
    ON rounds (quest_id, number);

CREATE TABLE IF NOT EXISTS characters (
    id                UUID PRIMARY KEY,
    quest_id          UUID NOT NULL REFERENCES quests (id) ON DELETE CASCADE,
    name              VARCHAR(255) NOT NULL,
    description       TEXT NOT NULL,
    is_public_info    BOOLEAN NOT NULL,
    avatar_image_path VARCHAR(1024)
);

CREATE INDEX IF NOT EXISTS idx_characters_quest_id
    ON characters (quest_id);

CREATE TABLE IF NOT EXISTS contents (
    id            UUID PRIMARY KEY,
    quest_id      UUID NOT NULL REFERENCES quests (id) ON DELETE CASCADE,
    -- round_id/character_id are loose tags, not enforced references:
    -- deleting a round or character leaves them dangling, and readers
    -- skip tags that no longer resolve.
    round_id      UUID,
    character_id  UUID,
    content_type  VARCHAR(64) NOT NULL,
    title         VARCHAR(255) NOT NULL,
    image_path    VARCHAR(1024) NOT NULL,
    is_public     BOOLEAN NOT NULL,
    display_order INT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contents_quest_id
    ON contents (quest_id, display_order);
";

/// SQL to create the session tables (game sessions and player sessions).
pub const CREATE_SESSION_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS game_sessions (
    id               UUID PRIMARY KEY,
    quest_id         UUID NOT NULL REFERENCES quests (id),
    status           VARCHAR(32) NOT NULL,
    current_round_id UUID NOT NULL REFERENCES rounds (id),
    current_round    INT NOT NULL,
    created_at       TIMESTAMPTZ NOT NULL,
    updated_at       TIMESTAMPTZ NOT NULL,
    started_at       TIMESTAMPTZ,
    ended_at         TIMESTAMPTZ,
    version          BIGINT NOT NULL
);

CREATE TABLE IF NOT EXISTS player_sessions (
    id               UUID PRIMARY KEY,
    game_session_id  UUID NOT NULL REFERENCES game_sessions (id) ON DELETE CASCADE,
    character_id     UUID REFERENCES characters (id),
    player_name      VARCHAR(255) NOT NULL,
    invitation_token VARCHAR(64) NOT NULL UNIQUE,
    email            VARCHAR(320) NOT NULL,
    last_active_at   TIMESTAMPTZ NOT NULL,
    is_connected     BOOLEAN NOT NULL,
    version          BIGINT NOT NULL,
    UNIQUE (game_session_id, email)
);

CREATE INDEX IF NOT EXISTS idx_player_sessions_game_session_id
    ON player_sessions (game_session_id);
";

/// Creates all tables if they do not exist yet.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if a statement fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), DomainError> {
    for statements in [CREATE_CATALOG_TABLES, CREATE_SESSION_TABLES] {
        sqlx::raw_sql(statements)
            .execute(pool)
            .await
            .map_err(|err| DomainError::Infrastructure(err.to_string()))?;
    }
    tracing::info!("database schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_tags_do_not_cascade_on_round_or_character_deletion() {
        // Arrange
        let contents_table = CREATE_CATALOG_TABLES
            .split("CREATE TABLE IF NOT EXISTS contents")
            .nth(1)
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        // Assert: deleting a round or character must orphan the tag, not
        // delete the content row, so the columns carry no foreign key.
        assert!(!contents_table.contains("REFERENCES rounds"));
        assert!(!contents_table.contains("REFERENCES characters"));
    }

    #[test]
    fn test_player_sessions_are_deleted_with_their_game_session() {
        // Arrange
        let players_table = CREATE_SESSION_TABLES
            .split("CREATE TABLE IF NOT EXISTS player_sessions")
            .nth(1)
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        // Assert
        assert!(players_table.contains("REFERENCES game_sessions (id) ON DELETE CASCADE"));
    }
}
