//! Core business logic - framework-agnostic marketplace operations.
//!
//! Write-side mutations (enroll, wish, review) update the join relations and
//! then invoke the explicit recompute triggers in [`metrics`]; the read side
//! in [`ranking`] answers listing and search requests from the cached fields.

/// Account lookup and creation
pub mod account;
/// Course lifecycle: creation, view counting, status transitions
pub mod course;
/// Enrollment and wishlist relation mutations
pub mod enrollment;
/// Cached course metric recomputation (materialized-view updates)
pub mod metrics;
/// Filtered, sorted course listing and search
pub mod ranking;
/// Review creation keyed by enrollment
pub mod review;
