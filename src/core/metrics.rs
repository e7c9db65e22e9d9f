//! Cached course metric recomputation.
//!
//! The course row carries denormalized counters (`current_tutees_count`,
//! `wishlist_count`, `review_count`, `average_rating`, `popularity_score`)
//! so the read path stays O(1). Each function here recomputes one metric from
//! the authoritative relation tables and writes it back in a single UPDATE.
//! These are explicit trigger points: the write-side operations call them
//! after mutating a relation, and nothing recomputes implicitly on read.
//!
//! Ordering matters for the popularity score: it reads the other cached
//! fields, so the counts must be recomputed first. [`refresh_course_metrics`]
//! runs the full pass in the right order.

use crate::{
    entities::{Course, Enrollment, Review, WishedCourse, course, enrollment, wished_course},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};

/// Weight of the enrolled-tutee count in the popularity score.
pub const TUTEES_WEIGHT: f64 = 0.5;
/// Weight of the wishlist count in the popularity score.
pub const WISHLIST_WEIGHT: f64 = 0.3;
/// Weight of the review count in the popularity score.
pub const REVIEW_COUNT_WEIGHT: f64 = 0.15;
/// Weight of the average rating in the popularity score.
pub const RATING_WEIGHT: f64 = 0.05;

/// Computes the weighted popularity score from materialized metric values.
#[must_use]
pub fn popularity_score(
    current_tutees_count: i32,
    wishlist_count: i32,
    review_count: i32,
    average_rating: f64,
) -> f64 {
    TUTEES_WEIGHT * f64::from(current_tutees_count)
        + WISHLIST_WEIGHT * f64::from(wishlist_count)
        + REVIEW_COUNT_WEIGHT * f64::from(review_count)
        + RATING_WEIGHT * average_rating
}

/// Rounds a rating average to one decimal place.
#[must_use]
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn saturating_i32(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

async fn require_course(db: &DatabaseConnection, course_id: i64) -> Result<course::Model> {
    Course::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })
}

/// Recomputes `current_tutees_count` from the enrollment relation.
///
/// Counts only rows in `enrolled` status: completed participations no longer
/// occupy a seat. Persists only this field. Idempotent: calling twice with no
/// intervening relation change yields the same value.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn update_tutee_count(db: &DatabaseConnection, course_id: i64) -> Result<course::Model> {
    require_course(db, course_id).await?;

    let count = Enrollment::find()
        .filter(enrollment::Column::CourseId.eq(course_id))
        .filter(
            enrollment::Column::Status
                .eq(crate::core::enrollment::EnrollmentStatus::Enrolled.as_str()),
        )
        .count(db)
        .await?;

    Course::update_many()
        .col_expr(
            course::Column::CurrentTuteesCount,
            Expr::value(saturating_i32(count)),
        )
        .filter(course::Column::Id.eq(course_id))
        .exec(db)
        .await?;

    require_course(db, course_id).await
}

/// Recomputes `wishlist_count` from the wishlist relation.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn update_wishlist_count(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<course::Model> {
    require_course(db, course_id).await?;

    let count = WishedCourse::find()
        .filter(wished_course::Column::CourseId.eq(course_id))
        .count(db)
        .await?;

    Course::update_many()
        .col_expr(
            course::Column::WishlistCount,
            Expr::value(saturating_i32(count)),
        )
        .filter(course::Column::Id.eq(course_id))
        .exec(db)
        .await?;

    require_course(db, course_id).await
}

/// Recomputes `review_count` and `average_rating` from the review relation.
///
/// Reviews are keyed by enrollment, so they are joined through the enrollment
/// table to reach the course. The average is rounded to one decimal place and
/// defensively substitutes 0 when the course has no reviews. Both fields are
/// written in one UPDATE.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn update_review_metrics(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<course::Model> {
    require_course(db, course_id).await?;

    let reviews = Review::find()
        .inner_join(Enrollment)
        .filter(enrollment::Column::CourseId.eq(course_id))
        .all(db)
        .await?;

    let review_count = saturating_i32(reviews.len() as u64);
    let average_rating = if reviews.is_empty() {
        0.0
    } else {
        let sum: f64 = reviews.iter().map(|r| r.rating).sum();
        round_rating(sum / reviews.len() as f64)
    };

    Course::update_many()
        .col_expr(course::Column::ReviewCount, Expr::value(review_count))
        .col_expr(course::Column::AverageRating, Expr::value(average_rating))
        .filter(course::Column::Id.eq(course_id))
        .exec(db)
        .await?;

    require_course(db, course_id).await
}

/// Recomputes `popularity_score` from the already-materialized cached fields.
///
/// Reads `current_tutees_count`, `wishlist_count`, `review_count`, and
/// `average_rating` straight off the course row, so the count updaters must
/// have run first for the score to reflect the current relations.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn update_popularity_score(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<course::Model> {
    let course = require_course(db, course_id).await?;

    let score = popularity_score(
        course.current_tutees_count,
        course.wishlist_count,
        course.review_count,
        course.average_rating,
    );

    Course::update_many()
        .col_expr(course::Column::PopularityScore, Expr::value(score))
        .filter(course::Column::Id.eq(course_id))
        .exec(db)
        .await?;

    require_course(db, course_id).await
}

/// Runs a full metrics refresh for one course: counts first, score last.
///
/// This is the pass to run after bulk relation changes (e.g. seeding), and
/// it is what the maintenance binary runs over every course.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn refresh_course_metrics(
    db: &DatabaseConnection,
    course_id: i64,
) -> Result<course::Model> {
    update_tutee_count(db, course_id).await?;
    update_wishlist_count(db, course_id).await?;
    update_review_metrics(db, course_id).await?;
    update_popularity_score(db, course_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::enrollment::{EnrollmentStatus, enroll, toggle_wishlist};
    use crate::core::review::create_review;
    use crate::test_utils::*;
    use sea_orm::Set;

    #[test]
    fn test_popularity_score_formula() {
        // 0.5*4 + 0.3*10 + 0.15*2 + 0.05*4.5 = 2 + 3 + 0.3 + 0.225
        assert!((popularity_score(4, 10, 2, 4.5) - 5.525).abs() < 1e-9);
        assert_eq!(popularity_score(0, 0, 0, 0.0), 0.0);
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(4.25), 4.3);
        assert_eq!(round_rating(4.333_333), 4.3);
        assert_eq!(round_rating(0.0), 0.0);
    }

    #[tokio::test]
    async fn test_update_tutee_count_counts_enrolled_only() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;

        let tutee1 = create_test_account(&db, "tutee1").await?;
        let tutee2 = create_test_account(&db, "tutee2").await?;
        let tutee3 = create_test_account(&db, "tutee3").await?;
        enroll(&db, tutee1.id, course.id).await?;
        enroll(&db, tutee2.id, course.id).await?;
        let done = enroll(&db, tutee3.id, course.id).await?;

        // Mark one participation completed directly
        let mut done: crate::entities::enrollment::ActiveModel = done.into();
        done.status = Set(EnrollmentStatus::Completed.as_str().to_string());
        done.update(&db).await?;

        let updated = update_tutee_count(&db, course.id).await?;
        assert_eq!(updated.current_tutees_count, 2);

        // Idempotent with no intervening relation change
        let again = update_tutee_count(&db, course.id).await?;
        assert_eq!(again.current_tutees_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_tutee_count_missing_course() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_tutee_count(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            crate::errors::Error::NotFound {
                entity: "course",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_review_metrics_scenario() -> Result<()> {
        // Course with 3 enrollments (2 enrolled, 1 completed) and 2 reviews
        // rated 4.0 and 5.0 must yield review_count=2, average_rating=4.5.
        let (db, _, _, course) = setup_with_course().await?;

        let tutee1 = create_test_account(&db, "tutee1").await?;
        let tutee2 = create_test_account(&db, "tutee2").await?;
        let tutee3 = create_test_account(&db, "tutee3").await?;
        let enrollment1 = enroll(&db, tutee1.id, course.id).await?;
        let enrollment2 = enroll(&db, tutee2.id, course.id).await?;
        let enrollment3 = enroll(&db, tutee3.id, course.id).await?;

        let mut completed: crate::entities::enrollment::ActiveModel = enrollment3.into();
        completed.status = Set(EnrollmentStatus::Completed.as_str().to_string());
        completed.update(&db).await?;

        create_review(&db, tutee1.id, enrollment1.id, 4.0, None).await?;
        create_review(&db, tutee2.id, enrollment2.id, 5.0, Some("great".to_string())).await?;

        let updated = update_review_metrics(&db, course.id).await?;
        assert_eq!(updated.review_count, 2);
        assert_eq!(updated.average_rating, 4.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_review_metrics_no_reviews_yields_zero() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;

        let updated = update_review_metrics(&db, course.id).await?;
        assert_eq!(updated.review_count, 0);
        assert_eq!(updated.average_rating, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_review_metrics_rounds_to_one_decimal() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;

        let tutee1 = create_test_account(&db, "tutee1").await?;
        let tutee2 = create_test_account(&db, "tutee2").await?;
        let tutee3 = create_test_account(&db, "tutee3").await?;
        let enrollment1 = enroll(&db, tutee1.id, course.id).await?;
        let enrollment2 = enroll(&db, tutee2.id, course.id).await?;
        let enrollment3 = enroll(&db, tutee3.id, course.id).await?;

        create_review(&db, tutee1.id, enrollment1.id, 4.0, None).await?;
        create_review(&db, tutee2.id, enrollment2.id, 4.0, None).await?;
        create_review(&db, tutee3.id, enrollment3.id, 5.0, None).await?;

        // mean = 13/3 = 4.333..., rounded to 4.3
        let updated = update_review_metrics(&db, course.id).await?;
        assert_eq!(updated.review_count, 3);
        assert_eq!(updated.average_rating, 4.3);
        assert!(updated.average_rating >= 0.0 && updated.average_rating <= 5.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_review_metrics_ignore_other_courses() -> Result<()> {
        let (db, tutor, category, course_a) = setup_with_course().await?;
        let course_b = create_test_course(&db, tutor.id, category.id, "Other Course").await?;

        let tutee = create_test_account(&db, "tutee").await?;
        let enrollment_b = enroll(&db, tutee.id, course_b.id).await?;
        create_review(&db, tutee.id, enrollment_b.id, 5.0, None).await?;

        let updated_a = update_review_metrics(&db, course_a.id).await?;
        assert_eq!(updated_a.review_count, 0);
        assert_eq!(updated_a.average_rating, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_course_metrics_orders_counts_before_score() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;

        let tutee1 = create_test_account(&db, "tutee1").await?;
        let tutee2 = create_test_account(&db, "tutee2").await?;
        let wisher = create_test_account(&db, "wisher").await?;
        let enrollment1 = enroll(&db, tutee1.id, course.id).await?;
        enroll(&db, tutee2.id, course.id).await?;
        toggle_wishlist(&db, wisher.id, course.id).await?;
        create_review(&db, tutee1.id, enrollment1.id, 4.0, None).await?;

        let refreshed = refresh_course_metrics(&db, course.id).await?;
        assert_eq!(refreshed.current_tutees_count, 2);
        assert_eq!(refreshed.wishlist_count, 1);
        assert_eq!(refreshed.review_count, 1);
        assert_eq!(refreshed.average_rating, 4.0);
        assert_eq!(
            refreshed.popularity_score,
            popularity_score(2, 1, 1, 4.0)
        );

        Ok(())
    }
}
