//! MystQuest Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types the bounded
//! contexts depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod notifier;
pub mod token;
