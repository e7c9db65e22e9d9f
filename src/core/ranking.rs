//! Course listing and search queries.
//!
//! Builds filtered, sorted result sets over the course table for the list,
//! search, and home-screen endpoints. Sorting reads the cached metric fields
//! maintained by [`crate::core::metrics`] plus timestamps; nothing here
//! recomputes metrics.

use crate::{
    core::course::CourseStatus,
    entities::{Category, Course, account, category, course, enrollment, wished_course},
    errors::{Error, Result},
};
use sea_orm::{Condition, JoinType, QueryOrder, QuerySelect, prelude::*};

/// Maximum number of rows returned by [`search`].
pub const SEARCH_RESULT_CAP: u64 = 30;

/// Sort key for course listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseSort {
    /// Newest first (`created_at` descending); the default
    #[default]
    Latest,
    /// Highest popularity score first, ties broken by recency
    Popular,
    /// Most reviews first, ties broken by recency
    Review,
}

impl CourseSort {
    /// Parses an optional request parameter into a sort key.
    ///
    /// Unknown keys silently default to `Latest` rather than failing, so a
    /// bad `sort` query parameter never breaks a listing page.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("popular") => Self::Popular,
            Some("review") => Self::Review,
            _ => Self::Latest,
        }
    }

    /// Applies this sort's ordering (with tie-breaks) to a course query.
    fn apply(self, query: Select<Course>) -> Select<Course> {
        match self {
            Self::Latest => query.order_by_desc(course::Column::CreatedAt),
            Self::Popular => query
                .order_by_desc(course::Column::PopularityScore)
                .order_by_desc(course::Column::CreatedAt),
            Self::Review => query
                .order_by_desc(course::Column::ReviewCount)
                .order_by_desc(course::Column::CreatedAt),
        }
    }
}

/// Lists active courses in a category with the given sort.
///
/// Active means recruiting or in progress; finished courses are excluded
/// from category listings.
///
/// # Errors
/// Returns `NotFound` if the category does not exist.
pub async fn list_by_category(
    db: &DatabaseConnection,
    category_id: i64,
    sort: CourseSort,
) -> Result<Vec<course::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    let query = Course::find()
        .filter(course::Column::CategoryId.eq(category_id))
        .filter(course::Column::Status.is_in([
            CourseStatus::Recruiting.as_str(),
            CourseStatus::InProgress.as_str(),
        ]));

    sort.apply(query).all(db).await.map_err(Into::into)
}

/// Free-text course search across title, description, tutor name, and
/// category name, capped at [`SEARCH_RESULT_CAP`] rows.
///
/// Matching is case-insensitive substring containment. The tutor and
/// category tables are joined in so their names participate in the match.
///
/// # Errors
/// Returns a Validation error when the query is empty or whitespace-only.
pub async fn search(
    db: &DatabaseConnection,
    query: &str,
    sort: CourseSort,
) -> Result<Vec<course::Model>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::Validation {
            message: "Search query cannot be empty".to_string(),
        });
    }

    let select = Course::find()
        .join(JoinType::InnerJoin, course::Relation::Tutor.def())
        .join(JoinType::InnerJoin, course::Relation::Category.def())
        .filter(
            Condition::any()
                .add(course::Column::Title.contains(query))
                .add(course::Column::Description.contains(query))
                .add(account::Column::Name.contains(query))
                .add(category::Column::Name.contains(query)),
        )
        .limit(SEARCH_RESULT_CAP);

    sort.apply(select).all(db).await.map_err(Into::into)
}

/// Home-screen projection: all courses by view count, most viewed first.
pub async fn popular_courses(
    db: &DatabaseConnection,
    limit: Option<u64>,
) -> Result<Vec<course::Model>> {
    Course::find()
        .order_by_desc(course::Column::ViewCount)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Home-screen projection: recently created courses, newest first.
///
/// When `days` is given, only courses created within the trailing window are
/// returned.
pub async fn new_courses(
    db: &DatabaseConnection,
    days: Option<i64>,
    limit: Option<u64>,
) -> Result<Vec<course::Model>> {
    let mut query = Course::find();

    if let Some(days) = days {
        let threshold = chrono::Utc::now() - chrono::Duration::days(days);
        query = query.filter(course::Column::CreatedAt.gte(threshold));
    }

    query
        .order_by_desc(course::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The account's wished courses, ordered by when each was wished (newest
/// first). The ordering key is the join row's own `created_at`, not the
/// course's.
pub async fn wishlist_courses(
    db: &DatabaseConnection,
    account_id: i64,
    limit: Option<u64>,
) -> Result<Vec<course::Model>> {
    Course::find()
        .join(JoinType::InnerJoin, wished_course::Relation::Course.def().rev())
        .filter(wished_course::Column::UserId.eq(account_id))
        .order_by_desc(wished_course::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The account's currently attended courses, ordered by when each enrollment
/// was created (newest first). Completed participations are not "attending"
/// and are excluded.
pub async fn attending_courses(
    db: &DatabaseConnection,
    account_id: i64,
    limit: Option<u64>,
) -> Result<Vec<course::Model>> {
    Course::find()
        .join(JoinType::InnerJoin, enrollment::Relation::Course.def().rev())
        .filter(enrollment::Column::UserId.eq(account_id))
        .filter(
            enrollment::Column::Status
                .eq(crate::core::enrollment::EnrollmentStatus::Enrolled.as_str()),
        )
        .order_by_desc(enrollment::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
