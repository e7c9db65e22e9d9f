//! Database configuration module for `TutorHub`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Account, Category, Course, Enrollment, Review, WishedCourse};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/tutorhub.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
/// It creates tables for accounts, categories, courses, enrollments, wishlist entries, and reviews.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Referenced tables first, join tables last. if_not_exists keeps the
    // startup pass rerunnable against an existing database file.
    let mut account_table = schema.create_table_from_entity(Account);
    account_table.if_not_exists();
    let mut category_table = schema.create_table_from_entity(Category);
    category_table.if_not_exists();
    let mut course_table = schema.create_table_from_entity(Course);
    course_table.if_not_exists();
    let mut enrollment_table = schema.create_table_from_entity(Enrollment);
    enrollment_table.if_not_exists();
    let mut wished_course_table = schema.create_table_from_entity(WishedCourse);
    wished_course_table.if_not_exists();
    let mut review_table = schema.create_table_from_entity(Review);
    review_table.if_not_exists();

    db.execute(builder.build(&account_table)).await?;
    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&course_table)).await?;
    db.execute(builder.build(&enrollment_table)).await?;
    db.execute(builder.build(&wished_course_table)).await?;
    db.execute(builder.build(&review_table)).await?;

    Ok(())
}
