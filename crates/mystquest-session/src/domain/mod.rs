//! Domain layer for the Session & Progress context.

pub mod commands;
pub mod events;
pub mod player;
pub mod session;
pub mod visibility;
