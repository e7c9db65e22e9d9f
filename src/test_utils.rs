//! Shared test utilities for `TutorHub`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{account, course},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Default `NewAccount` parameters for a given username.
pub fn default_new_account(username: &str) -> account::NewAccount {
    account::NewAccount {
        username: username.to_string(),
        password: "hashed-password".to_string(),
        name: format!("{username} name"),
        email: format!("{username}@example.com"),
        phone: "010-0000-0000".to_string(),
        introduction: "Test account".to_string(),
        profile_image_url: None,
    }
}

/// Default `NewCourse` parameters used across tests.
pub fn default_new_course() -> course::NewCourse {
    course::NewCourse {
        title: "Test Course".to_string(),
        thumbnail_image_url: "https://example.com/thumb.png".to_string(),
        description: "A course for testing".to_string(),
        curriculum: "Week 1: basics".to_string(),
        price: 50_000,
        max_tutees: 10,
    }
}

/// Creates a test account with sensible defaults.
pub async fn create_test_account(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::account::Model> {
    account::create_account(db, default_new_account(username)).await
}

/// Creates a test account with a specific display name, for search tests.
pub async fn create_custom_account(
    db: &DatabaseConnection,
    username: &str,
    name: &str,
) -> Result<entities::account::Model> {
    account::create_account(
        db,
        account::NewAccount {
            name: name.to_string(),
            ..default_new_account(username)
        },
    )
    .await
}

/// Creates a test category with the given name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    use sea_orm::{ActiveModelTrait, Set};

    let model = entities::category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates a test course with sensible defaults and the given title.
pub async fn create_test_course(
    db: &DatabaseConnection,
    tutor_id: i64,
    category_id: i64,
    title: &str,
) -> Result<entities::course::Model> {
    course::create_course(
        db,
        tutor_id,
        category_id,
        course::NewCourse {
            title: title.to_string(),
            ..default_new_course()
        },
    )
    .await
}

/// Sets up a complete test environment with a tutor, a category, and a course.
/// Returns (db, tutor, category, course) for common test scenarios.
pub async fn setup_with_course() -> Result<(
    DatabaseConnection,
    entities::account::Model,
    entities::category::Model,
    entities::course::Model,
)> {
    let db = setup_test_db().await?;
    let tutor = create_test_account(&db, "tutor").await?;
    let category = create_test_category(&db, "math").await?;
    let course = create_test_course(&db, tutor.id, category.id, "Test Course").await?;
    Ok((db, tutor, category, course))
}
