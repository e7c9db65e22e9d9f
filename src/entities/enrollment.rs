//! Enrollment entity - Join of account and course recording participation.
//!
//! One row per (user, course) pair, maintained by the enroll operation rather
//! than a database constraint. Reviews hang off enrollments, not accounts, so
//! only participants can review a course.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrollment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    /// Unique identifier for the enrollment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account participating as tutee
    pub user_id: i64,
    /// Course being attended
    pub course_id: i64,
    /// Participation status: `"enrolled"` or `"completed"`
    pub status: String,
    /// First day of participation
    pub start_date: Option<Date>,
    /// Last day of participation, set when the enrollment completes
    pub end_date: Option<Date>,
    /// When the enrollment row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Enrollment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each enrollment belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    User,
    /// Each enrollment belongs to one course
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    /// One enrollment has at most one review
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
