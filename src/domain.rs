//! Domain models for course enrollment.
//!
//! This module contains the core domain types: students, courses, the
//! enrollment limit, and the [`Registrar`] that owns them and keeps their
//! memberships consistent.

mod config;
pub use config::Config;

/// Courses, their rosters and waitlists.
pub mod course;
pub use course::{Admission, Course, CourseError, CourseId};

/// Enrollment limits.
pub mod limit;
pub use limit::{EnrollmentLimit, LimitError};

/// The arena that owns students and courses.
pub mod registrar;
pub use registrar::{Registrar, RegistrarError, Violation};

/// Students and the courses they are enrolled in.
pub mod student;
pub use student::{EmptyNameError, Student, StudentId};
