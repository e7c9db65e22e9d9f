//! `WishedCourse` entity - A user's saved-for-later course entry.
//!
//! Distinct from enrollment: wishing records interest, not participation.
//! Rows are created and deleted by the wishlist toggle, which also keeps one
//! row at most per (user, course) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wishlist entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wished_courses")]
pub struct Model {
    /// Unique identifier for the wishlist entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account that wished the course
    pub user_id: i64,
    /// Course that was wished
    pub course_id: i64,
    /// When the entry was created; drives wishlist ordering
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `WishedCourse` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each wishlist entry belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::UserId",
        to = "super::account::Column::Id"
    )]
    User,
    /// Each wishlist entry belongs to one course
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
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

impl ActiveModelBehavior for ActiveModel {}
