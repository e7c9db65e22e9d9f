//! Maintenance binary: initializes the database schema, seeds configured
//! categories, and runs a full cached-metrics refresh over every course.
//! Intended to run after bulk data changes (imports, migrations) and on
//! first startup.

use sea_orm::EntityTrait;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tutorhub::{
    config,
    core::metrics,
    entities::Course,
    errors::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the category seeding configuration
    let category_config = config::categories::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;

    // 4. Connect and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. Seed any missing categories
    let created = config::categories::seed_initial_categories(&db, &category_config).await?;
    info!(created, "Categories seeded.");

    // 6. Full metrics refresh: counts first, popularity score last, per course
    let courses = Course::find().all(&db).await?;
    let total = courses.len();
    for course in courses {
        metrics::refresh_course_metrics(&db, course.id)
            .await
            .inspect_err(|e| error!(course_id = course.id, "Metrics refresh failed: {e}"))?;
    }
    info!(total, "Cached course metrics refreshed.");

    Ok(())
}
