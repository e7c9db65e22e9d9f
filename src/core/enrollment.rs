//! Enrollment and wishlist business logic.
//!
//! These are the write-side mutations of the account/course join relations.
//! Each mutation updates the relation table and then invokes the explicit
//! metric triggers so the course's cached counters and popularity score stay
//! consistent with the relations.

use crate::{
    core::metrics,
    entities::{Course, Enrollment, WishedCourse, enrollment, wished_course},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Participation status of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    /// Actively attending; occupies a seat
    Enrolled,
    /// Participation finished; seat released
    Completed,
}

impl EnrollmentStatus {
    /// The canonical string stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Completed => "completed",
        }
    }
}

/// Enrolls an account into a course and refreshes the course's metrics.
///
/// The course must be recruiting, must have a free seat, and the account must
/// not already hold an enrollment row for it (one row per (user, course) pair
/// is maintained here, not by a database constraint).
///
/// # Errors
/// Returns an error if:
/// - The course does not exist (`NotFound`)
/// - The course is not recruiting, is full, or the account is already
///   enrolled (Conflict)
pub async fn enroll(
    db: &DatabaseConnection,
    account_id: i64,
    course_id: i64,
) -> Result<enrollment::Model> {
    let course = Course::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })?;

    if course.status != crate::core::course::CourseStatus::Recruiting.as_str() {
        return Err(Error::Conflict {
            message: format!("Course {course_id} is not recruiting"),
        });
    }

    let enrolled = Enrollment::find()
        .filter(enrollment::Column::CourseId.eq(course_id))
        .filter(enrollment::Column::Status.eq(EnrollmentStatus::Enrolled.as_str()))
        .count(db)
        .await?;
    if enrolled >= course.max_tutees as u64 {
        return Err(Error::Conflict {
            message: format!("Course {course_id} is already at capacity"),
        });
    }

    let existing = Enrollment::find()
        .filter(enrollment::Column::UserId.eq(account_id))
        .filter(enrollment::Column::CourseId.eq(course_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Conflict {
            message: format!("Account {account_id} already enrolled in course {course_id}"),
        });
    }

    let now = chrono::Utc::now();
    let model = enrollment::ActiveModel {
        user_id: Set(account_id),
        course_id: Set(course_id),
        status: Set(EnrollmentStatus::Enrolled.as_str().to_string()),
        start_date: Set(Some(now.date_naive())),
        end_date: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let result = model.insert(db).await?;

    // Post-enrollment-change trigger point
    metrics::update_tutee_count(db, course_id).await?;
    metrics::update_popularity_score(db, course_id).await?;

    Ok(result)
}

/// Marks an enrollment completed and refreshes the course's metrics.
///
/// Only the enrolled account itself may complete its participation. The seat
/// is released: completed rows no longer count toward `current_tutees_count`.
///
/// # Errors
/// Returns an error if:
/// - The enrollment does not exist (`NotFound`)
/// - The actor does not own the enrollment (Forbidden)
/// - The enrollment is already completed (Conflict)
pub async fn complete_enrollment(
    db: &DatabaseConnection,
    actor_id: i64,
    enrollment_id: i64,
) -> Result<enrollment::Model> {
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

    if enrollment.status == EnrollmentStatus::Completed.as_str() {
        return Err(Error::Conflict {
            message: format!("Enrollment {enrollment_id} is already completed"),
        });
    }

    let course_id = enrollment.course_id;
    let mut model: enrollment::ActiveModel = enrollment.into();
    model.status = Set(EnrollmentStatus::Completed.as_str().to_string());
    model.end_date = Set(Some(chrono::Utc::now().date_naive()));
    let result = model.update(db).await?;

    metrics::update_tutee_count(db, course_id).await?;
    metrics::update_popularity_score(db, course_id).await?;

    Ok(result)
}

/// Toggles the wishlist entry for (account, course), returning the new state.
///
/// Returns `true` when the course is now wished, `false` when the entry was
/// removed. The course's wishlist count and popularity score are refreshed
/// either way.
///
/// # Errors
/// Returns `NotFound` if the course does not exist.
pub async fn toggle_wishlist(
    db: &DatabaseConnection,
    account_id: i64,
    course_id: i64,
) -> Result<bool> {
    Course::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })?;

    let existing = WishedCourse::find()
        .filter(wished_course::Column::UserId.eq(account_id))
        .filter(wished_course::Column::CourseId.eq(course_id))
        .one(db)
        .await?;

    let is_wished = match existing {
        Some(entry) => {
            entry.delete(db).await?;
            false
        }
        None => {
            let model = wished_course::ActiveModel {
                user_id: Set(account_id),
                course_id: Set(course_id),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            model.insert(db).await?;
            true
        }
    };

    // Post-wishlist-change trigger point
    metrics::update_wishlist_count(db, course_id).await?;
    metrics::update_popularity_score(db, course_id).await?;

    Ok(is_wished)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::course::get_course_by_id;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_enroll_updates_cached_metrics() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;
        let tutee = create_test_account(&db, "tutee").await?;

        let enrollment = enroll(&db, tutee.id, course.id).await?;
        assert_eq!(enrollment.status, "enrolled");
        assert_eq!(enrollment.user_id, tutee.id);
        assert!(enrollment.start_date.is_some());
        assert!(enrollment.end_date.is_none());

        let course = get_course_by_id(&db, course.id).await?.unwrap();
        assert_eq!(course.current_tutees_count, 1);
        assert_eq!(
            course.popularity_score,
            crate::core::metrics::popularity_score(1, 0, 0, 0.0)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_enroll_missing_course() -> Result<()> {
        let db = setup_test_db().await?;
        let tutee = create_test_account(&db, "tutee").await?;

        let result = enroll(&db, tutee.id, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "course",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_enroll_twice_conflicts() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;
        let tutee = create_test_account(&db, "tutee").await?;

        enroll(&db, tutee.id, course.id).await?;
        let result = enroll(&db, tutee.id, course.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_enroll_full_course_conflicts() -> Result<()> {
        let (db, tutor, category, _) = setup_with_course().await?;
        let small = crate::core::course::create_course(
            &db,
            tutor.id,
            category.id,
            crate::core::course::NewCourse {
                max_tutees: 1,
                ..default_new_course()
            },
        )
        .await?;

        let tutee1 = create_test_account(&db, "tutee1").await?;
        let tutee2 = create_test_account(&db, "tutee2").await?;

        enroll(&db, tutee1.id, small.id).await?;
        let result = enroll(&db, tutee2.id, small.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_enroll_non_recruiting_conflicts() -> Result<()> {
        let (db, tutor, _, course) = setup_with_course().await?;
        crate::core::course::change_status(&db, tutor.id, course.id, "in_progress").await?;

        let tutee = create_test_account(&db, "tutee").await?;
        let result = enroll(&db, tutee.id, course.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_enrollment_releases_seat() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;
        let tutee = create_test_account(&db, "tutee").await?;

        let enrollment = enroll(&db, tutee.id, course.id).await?;
        let completed = complete_enrollment(&db, tutee.id, enrollment.id).await?;
        assert_eq!(completed.status, "completed");
        assert!(completed.end_date.is_some());

        let course = get_course_by_id(&db, course.id).await?.unwrap();
        assert_eq!(course.current_tutees_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_enrollment_ownership_and_state() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;
        let tutee = create_test_account(&db, "tutee").await?;
        let stranger = create_test_account(&db, "stranger").await?;

        let enrollment = enroll(&db, tutee.id, course.id).await?;

        let forbidden = complete_enrollment(&db, stranger.id, enrollment.id).await;
        assert!(matches!(forbidden.unwrap_err(), Error::Forbidden { .. }));

        complete_enrollment(&db, tutee.id, enrollment.id).await?;
        let twice = complete_enrollment(&db, tutee.id, enrollment.id).await;
        assert!(matches!(twice.unwrap_err(), Error::Conflict { .. }));

        let missing = complete_enrollment(&db, tutee.id, 999).await;
        assert!(matches!(
            missing.unwrap_err(),
            Error::NotFound {
                entity: "enrollment",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_wishlist_roundtrip() -> Result<()> {
        let (db, _, _, course) = setup_with_course().await?;
        let wisher = create_test_account(&db, "wisher").await?;

        // First toggle wishes the course
        let is_wished = toggle_wishlist(&db, wisher.id, course.id).await?;
        assert!(is_wished);
        let after_wish = get_course_by_id(&db, course.id).await?.unwrap();
        assert_eq!(after_wish.wishlist_count, 1);
        assert_eq!(
            after_wish.popularity_score,
            crate::core::metrics::popularity_score(0, 1, 0, 0.0)
        );

        // Second toggle unwishes it and the join row is gone
        let is_wished = toggle_wishlist(&db, wisher.id, course.id).await?;
        assert!(!is_wished);
        let after_unwish = get_course_by_id(&db, course.id).await?.unwrap();
        assert_eq!(after_unwish.wishlist_count, 0);

        let rows = WishedCourse::find()
            .filter(wished_course::Column::UserId.eq(wisher.id))
            .filter(wished_course::Column::CourseId.eq(course.id))
            .all(&db)
            .await?;
        assert!(rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_wishlist_missing_course() -> Result<()> {
        let db = setup_test_db().await?;
        let wisher = create_test_account(&db, "wisher").await?;

        let result = toggle_wishlist(&db, wisher.id, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "course",
                ..
            }
        ));

        Ok(())
    }
}
