//! Initial category seeding from config.toml
//!
//! This module provides functionality to load the initial category list from
//! a TOML configuration file. The categories defined in config.toml are used
//! to seed the database on first run or when categories are missing; existing
//! categories with the same name are left untouched.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, serde::Deserialize)]
pub struct Config {
    /// List of category configurations to seed
    pub categories: Vec<CategoryConfig>,
}

/// Configuration for a single category
#[derive(Debug, serde::Deserialize, Clone)]
pub struct CategoryConfig {
    /// Name of the category
    pub name: String,
}

/// Loads category configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads category configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Inserts any configured categories that are not yet present in the database.
///
/// Matching is by name; categories already present are skipped so the seeding
/// pass is safe to run on every startup.
pub async fn seed_initial_categories(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut created = 0;

    for category_config in &config.categories {
        let existing = Category::find()
            .filter(category::Column::Name.eq(&category_config.name))
            .one(db)
            .await?;

        if existing.is_none() {
            let model = category::ActiveModel {
                name: Set(category_config.name.clone()),
                ..Default::default()
            };
            model.insert(db).await?;
            created += 1;
        }
    }

    info!(created, "Category seeding pass complete");
    Ok(created)
}
