//! Course business logic - Handles course creation and lifecycle operations.
//!
//! Provides functions for creating courses, incrementing view counts, and
//! moving courses through their lifecycle. Status transitions are owner-only,
//! and the transition to `finished` is guarded: it fails while any tutee is
//! still enrolled.

use crate::{
    entities::{Account, Category, Course, course, enrollment},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::Expr};

/// Lifecycle status of a course.
///
/// The expected progression is `Recruiting -> InProgress -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    /// Accepting new enrollments
    Recruiting,
    /// Lessons underway, enrollment closed
    InProgress,
    /// Course over; requires zero active enrollments
    Finished,
}

impl CourseStatus {
    /// The canonical string stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }

    /// Parses a status value supplied by a caller.
    ///
    /// # Errors
    /// Returns a Validation error for unknown status values.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "recruiting" => Ok(Self::Recruiting),
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            other => Err(Error::Validation {
                message: format!("Unknown course status: {other}"),
            }),
        }
    }
}

/// Parameters for creating a new course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    /// Course title
    pub title: String,
    /// Thumbnail image URL
    pub thumbnail_image_url: String,
    /// Short description
    pub description: String,
    /// Curriculum text
    pub curriculum: String,
    /// Price per seat
    pub price: i64,
    /// Maximum number of tutees
    pub max_tutees: i32,
}

/// Creates a new course owned by the given tutor, performing input validation.
///
/// New courses start in `recruiting` status with all cached metric fields at
/// zero; the metrics updater takes over once relations start changing.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only, `max_tutees` is not positive,
///   or the price is negative (Validation)
/// - The tutor or category does not exist (`NotFound`)
/// - The database insert fails
pub async fn create_course(
    db: &DatabaseConnection,
    tutor_id: i64,
    category_id: i64,
    new_course: NewCourse,
) -> Result<course::Model> {
    if new_course.title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Course title cannot be empty".to_string(),
        });
    }

    if new_course.max_tutees <= 0 {
        return Err(Error::Validation {
            message: format!("max_tutees must be positive, got {}", new_course.max_tutees),
        });
    }

    if new_course.price < 0 {
        return Err(Error::Validation {
            message: format!("price cannot be negative, got {}", new_course.price),
        });
    }

    Account::find_by_id(tutor_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "account",
            id: tutor_id.to_string(),
        })?;

    Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    let now = chrono::Utc::now();
    let course = course::ActiveModel {
        title: Set(new_course.title.trim().to_string()),
        thumbnail_image_url: Set(new_course.thumbnail_image_url),
        description: Set(new_course.description),
        curriculum: Set(new_course.curriculum),
        price: Set(new_course.price),
        max_tutees: Set(new_course.max_tutees),
        status: Set(CourseStatus::Recruiting.as_str().to_string()),
        view_count: Set(0),
        current_tutees_count: Set(0),
        wishlist_count: Set(0),
        review_count: Set(0),
        average_rating: Set(0.0),
        popularity_score: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
        tutor_id: Set(tutor_id),
        category_id: Set(category_id),
        ..Default::default()
    };

    course.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific course by its unique ID.
pub async fn get_course_by_id(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<Option<course::Model>> {
    Course::find_by_id(course_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Increments a course's view count by one, atomically.
///
/// Uses a single `UPDATE courses SET view_count = view_count + 1` statement
/// instead of a read-modify-write so concurrent detail-view requests cannot
/// lose increments.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn increment_view_count(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<course::Model> {
    let updated = Course::update_many()
        .col_expr(
            course::Column::ViewCount,
            Expr::col(course::Column::ViewCount).add(1),
        )
        .filter(course::Column::Id.eq(course_id))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        });
    }

    Course::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })
}

/// Changes a course's lifecycle status on behalf of the acting account.
///
/// Only the owning tutor may change the status. Moving to `finished` is
/// guarded: it fails with Conflict while any enrollment is still in
/// `enrolled` status, and the course's status is left unchanged.
///
/// # Errors
/// Returns an error if:
/// - The status value is unknown (Validation)
/// - The course does not exist (`NotFound`)
/// - The actor is not the owning tutor (Forbidden)
/// - Tutees remain enrolled when finishing (Conflict)
pub async fn change_status(
    db: &DatabaseConnection,
    actor_id: i64,
    course_id: i64,
    new_status: &str,
) -> Result<course::Model> {
    let new_status = CourseStatus::parse(new_status)?;

    let course = Course::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })?;

    if course.tutor_id != actor_id {
        return Err(Error::Forbidden {
            message: format!("Account {actor_id} does not own course {course_id}"),
        });
    }

    if new_status == CourseStatus::Finished {
        // Guard against finishing with live participants; the live relation
        // is authoritative here, not the cached count.
        let active = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::Status.eq(crate::core::enrollment::EnrollmentStatus::Enrolled.as_str()))
            .count(db)
            .await?;

        if active > 0 {
            return Err(Error::Conflict {
                message: format!("Course {course_id} still has {active} enrolled tutees"),
            });
        }
    }

    let mut model: course::ActiveModel = course.into();
    model.status = Set(new_status.as_str().to_string());
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}
