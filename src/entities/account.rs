//! Account entity - Represents a marketplace user.
//!
//! An account can act as a tutor (owning created courses) and as a tutee
//! (holding enrollments and wishlist entries). The same table backs both
//! roles; ownership is expressed through the course `tutor_id` foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the marketplace
    #[sea_orm(unique)]
    pub username: String,
    /// Hashed credential blob (hashing itself lives outside this crate)
    pub password: String,
    /// Display name shown on course listings
    pub name: String,
    /// Contact e-mail address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Short self-introduction shown on profile pages
    pub introduction: String,
    /// Optional profile image URL
    pub profile_image_url: Option<String>,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account owns many created courses (as tutor)
    #[sea_orm(has_many = "super::course::Entity")]
    CreatedCourses,
    /// One account has many enrollments (as tutee)
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    /// One account has many wishlist entries
    #[sea_orm(has_many = "super::wished_course::Entity")]
    WishedCourses,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedCourses.def()
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
