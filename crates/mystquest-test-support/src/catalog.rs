//! In-memory `CatalogRepository` for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mystquest_catalog::domain::models::{Character, Content, Quest, Round};
use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::error::DomainError;
use uuid::Uuid;

/// An in-memory catalog. Seed reference data with the `put_*` methods or
/// through the `CatalogRepository` inserts; reads honor the trait's ordering
/// contracts (rounds by number, content by display order).
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    quests: Mutex<Vec<Quest>>,
    rounds: Mutex<Vec<Round>>,
    characters: Mutex<Vec<Character>>,
    contents: Mutex<Vec<Content>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a quest.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_quest(&self, quest: Quest) {
        self.quests.lock().unwrap().push(quest);
    }

    /// Seed a round.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_round(&self, round: Round) {
        self.rounds.lock().unwrap().push(round);
    }

    /// Seed a character.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_character(&self, character: Character) {
        self.characters.lock().unwrap().push(character);
    }

    /// Seed a content item.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_content(&self, content: Content) {
        self.contents.lock().unwrap().push(content);
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn insert_quest(&self, quest: &Quest) -> Result<(), DomainError> {
        self.put_quest(quest.clone());
        Ok(())
    }

    async fn quest_by_id(&self, id: Uuid) -> Result<Option<Quest>, DomainError> {
        Ok(self
            .quests
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list_quests(&self) -> Result<Vec<Quest>, DomainError> {
        let mut quests = self.quests.lock().unwrap().clone();
        quests.sort_by_key(|q| std::cmp::Reverse(q.created_at));
        Ok(quests)
    }

    async fn insert_round(&self, round: &Round) -> Result<(), DomainError> {
        self.put_round(round.clone());
        Ok(())
    }

    async fn round_by_id(&self, id: Uuid) -> Result<Option<Round>, DomainError> {
        Ok(self
            .rounds
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn rounds_by_quest(&self, quest_id: Uuid) -> Result<Vec<Round>, DomainError> {
        let mut rounds: Vec<Round> = self
            .rounds
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.quest_id == quest_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.number);
        Ok(rounds)
    }

    async fn insert_character(&self, character: &Character) -> Result<(), DomainError> {
        self.put_character(character.clone());
        Ok(())
    }

    async fn character_by_id(&self, id: Uuid) -> Result<Option<Character>, DomainError> {
        Ok(self
            .characters
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn characters_by_quest(&self, quest_id: Uuid) -> Result<Vec<Character>, DomainError> {
        Ok(self
            .characters
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.quest_id == quest_id)
            .cloned()
            .collect())
    }

    async fn insert_content(&self, content: &Content) -> Result<(), DomainError> {
        self.put_content(content.clone());
        Ok(())
    }

    async fn content_by_quest(&self, quest_id: Uuid) -> Result<Vec<Content>, DomainError> {
        let mut contents: Vec<Content> = self
            .contents
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.quest_id == quest_id)
            .cloned()
            .collect();
        contents.sort_by_key(|c| c.display_order);
        Ok(contents)
    }
}
