//! Application layer for the Content Catalog context.

pub mod command_handlers;
pub mod query_handlers;
