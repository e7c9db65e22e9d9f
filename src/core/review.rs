//! Review business logic.
//!
//! Reviews are created once per enrollment and are immutable afterwards;
//! there is no update or delete path. Creating a review triggers the review
//! metric and popularity score recomputation on the reviewed course.

use crate::{
    core::metrics,
    entities::{Enrollment, Review, review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Smallest allowed rating.
pub const MIN_RATING: f64 = 0.5;
/// Largest allowed rating.
pub const MAX_RATING: f64 = 5.0;

/// Checks that a rating lies in [0.5, 5.0] on an exact half-point step.
#[must_use]
pub fn is_valid_rating(rating: f64) -> bool {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return false;
    }
    let doubled = rating * 2.0;
    (doubled - doubled.round()).abs() < f64::EPSILON
}

/// Creates a review for an enrollment on behalf of the acting account.
///
/// The actor must own the enrollment: reviews are tied to accounts only
/// through the enrollment relation, so ownership is checked there.
///
/// # Errors
/// Returns an error if:
/// - The enrollment does not exist (`NotFound`)
/// - The actor does not own the enrollment (Forbidden)
/// - The rating is outside [0.5, 5.0] or off the half-point grid (Validation)
/// - The enrollment already has a review (Conflict)
pub async fn create_review(
    db: &DatabaseConnection,
    actor_id: i64,
    enrollment_id: i64,
    rating: f64,
    comment: Option<String>,
) -> Result<review::Model> {
    if !is_valid_rating(rating) {
        return Err(Error::Validation {
            message: format!("Rating must be between 0.5 and 5.0 in 0.5 steps, got {rating}"),
        });
    }

    let enrollment = Enrollment::find_by_id(enrollment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "enrollment",
            id: enrollment_id.to_string(),
        })?;

    if enrollment.user_id != actor_id {
        return Err(Error::Forbidden {
            message: format!("Account {actor_id} does not own enrollment {enrollment_id}"),
        });
    }

    let existing = Review::find()
        .filter(review::Column::EnrollmentId.eq(enrollment_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Conflict {
            message: format!("Enrollment {enrollment_id} already has a review"),
        });
    }

    let model = review::ActiveModel {
        enrollment_id: Set(enrollment_id),
        rating: Set(rating),
        comment: Set(comment),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let result = model.insert(db).await?;

    // Post-review-change trigger point
    metrics::update_review_metrics(db, enrollment.course_id).await?;
    metrics::update_popularity_score(db, enrollment.course_id).await?;

    Ok(result)
}

/// Retrieves all reviews for a course, newest first.
///
/// Joined through the enrollment relation since reviews are keyed by
/// enrollment, not by course.
pub async fn get_reviews_for_course(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<Vec<review::Model>> {
    Review::find()
        .inner_join(Enrollment)
        .filter(crate::entities::enrollment::Column::CourseId.eq(course_id))
        .order_by_desc(review::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
