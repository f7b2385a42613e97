//! Domain layer for the Content Catalog context.

pub mod commands;
pub mod models;
