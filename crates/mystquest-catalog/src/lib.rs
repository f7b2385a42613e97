//! MystQuest — Content Catalog bounded context.
//!
//! Holds the authored reference data a game session plays through: quests,
//! their rounds and characters, and the clue/instruction content gated by
//! round and character. The session runtime consumes this context through
//! read-only lookups; authoring happens before a session starts.

pub mod application;
pub mod domain;
pub mod repository;
