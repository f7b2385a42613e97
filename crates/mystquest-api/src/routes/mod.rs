//! Route modules organized by bounded context.

pub mod health;
pub mod player;
pub mod quest;
pub mod session;
