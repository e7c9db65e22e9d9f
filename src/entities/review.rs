//! Review entity - Rating and comment left for a completed enrollment.
//!
//! Reviews are keyed by enrollment (unique per enrollment) rather than by
//! account, so a review can only exist for a participation that exists.
//! Reviews are immutable once created; there is no update path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Enrollment this review was left for; at most one review per enrollment
    #[sea_orm(unique)]
    pub enrollment_id: i64,
    /// Star rating in half-point steps from 0.5 to 5.0
    pub rating: f64,
    /// Optional free-text comment
    pub comment: Option<String>,
    /// When the review was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one enrollment
    #[sea_orm(
        belongs_to = "super::enrollment::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollment::Column::Id"
    )]
    Enrollment,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
