//! MystQuest — Session & Progress bounded context.
//!
//! Owns the game-session runtime: session lifecycle and round progression,
//! player admission via invitation tokens, and the visibility rule deciding
//! which content a player may see at a given moment.

pub mod application;
pub mod domain;
pub mod repository;
