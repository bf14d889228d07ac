//! Course Enrollment Registry
//!
//! Students enroll in courses. Courses enforce an enrollment limit and keep
//! an ordered waitlist that drains automatically as seats free up.

pub mod domain;
pub use domain::{
    Admission, Config, Course, CourseError, CourseId, EmptyNameError, EnrollmentLimit, LimitError,
    Registrar, RegistrarError, Student, StudentId, Violation,
};

#[cfg(test)]
pub(crate) mod testing;
