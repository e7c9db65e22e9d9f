//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod category;
pub mod course;
pub mod enrollment;
pub mod review;
pub mod wished_course;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use course::{Column as CourseColumn, Entity as Course, Model as CourseModel};
pub use enrollment::{Column as EnrollmentColumn, Entity as Enrollment, Model as EnrollmentModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use wished_course::{
    Column as WishedCourseColumn, Entity as WishedCourse, Model as WishedCourseModel,
};
