/// Database configuration and connection management
pub mod database;

/// Initial category seeding from config.toml
pub mod categories;
