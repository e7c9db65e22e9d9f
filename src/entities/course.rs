//! Course entity - A tutoring course offered by a tutor.
//!
//! Alongside the descriptive fields, the model carries denormalized metric
//! columns (`current_tutees_count`, `wishlist_count`, `review_count`,
//! `average_rating`, `popularity_score`) that are recomputed from the
//! authoritative relation tables by [`crate::core::metrics`]. They are never
//! written directly by request handlers.
//!
//! Courses are never physically deleted; their lifecycle is expressed through
//! the `status` column (`recruiting` -> `in_progress` -> `finished`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    /// Unique identifier for the course
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Course title shown in listings
    pub title: String,
    /// Thumbnail image URL for list views
    pub thumbnail_image_url: String,
    /// Short description of the course
    pub description: String,
    /// Curriculum text (free-form outline of the lessons)
    pub curriculum: String,
    /// Price per seat
    pub price: i64,
    /// Maximum number of tutees that can enroll
    pub max_tutees: i32,
    /// Lifecycle status: `"recruiting"`, `"in_progress"`, or `"finished"`
    pub status: String,
    /// Number of detail-page views
    pub view_count: i64,
    /// Cached count of currently enrolled tutees
    pub current_tutees_count: i32,
    /// Cached count of wishlist entries
    pub wishlist_count: i32,
    /// Cached count of reviews across this course's enrollments
    pub review_count: i32,
    /// Cached mean review rating rounded to one decimal, 0 when unreviewed
    pub average_rating: f64,
    /// Cached weighted ranking score, see [`crate::core::metrics`]
    pub popularity_score: f64,
    /// When the course was created
    pub created_at: DateTimeUtc,
    /// When the course was last modified
    pub updated_at: DateTimeUtc,
    /// Account that created and owns this course
    pub tutor_id: i64,
    /// Category this course belongs to
    pub category_id: i64,
}

impl Model {
    /// Seats still available for enrollment.
    #[must_use]
    pub fn remaining_slots(&self) -> i32 {
        self.max_tutees - self.current_tutees_count
    }
}

/// Defines relationships between Course and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each course belongs to one tutor account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::TutorId",
        to = "super::account::Column::Id"
    )]
    Tutor,
    /// Each course belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One course has many enrollments
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    /// One course has many wishlist entries
    #[sea_orm(has_many = "super::wished_course::Entity")]
    WishedCourses,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutor.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::wished_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishedCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
