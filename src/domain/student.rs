use std::{collections::HashSet, fmt};

use non_empty_string::NonEmptyString;
use uuid::Uuid;

use crate::domain::CourseId;

/// A stable handle to a [`Student`] owned by a
/// [`Registrar`](crate::Registrar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(Uuid);

impl StudentId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "student:{}", self.0)
    }
}

/// A student at a school.
///
/// The course set only ever holds courses whose roster includes this
/// student. Courses the student is waitlisted for are not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    name: NonEmptyString,
    courses: HashSet<CourseId>,
}

impl Student {
    pub(crate) fn new(name: NonEmptyString) -> Self {
        Self {
            name,
            courses: HashSet::new(),
        }
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns all courses this student is currently enrolled in.
    #[must_use]
    pub const fn courses(&self) -> &HashSet<CourseId> {
        &self.courses
    }

    /// Whether the student is enrolled in (not merely waitlisted for) the
    /// given course.
    #[must_use]
    pub fn is_enrolled_in(&self, course: CourseId) -> bool {
        self.courses.contains(&course)
    }

    pub(crate) fn record_enrollment(&mut self, course: CourseId) -> bool {
        self.courses.insert(course)
    }

    pub(crate) fn forget(&mut self, course: CourseId) -> bool {
        self.courses.remove(&course)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Error returned when a student name or course catalog number is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("name must not be empty")]
pub struct EmptyNameError;

impl TryFrom<String> for Student {
    type Error = EmptyNameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        NonEmptyString::new(name)
            .map(Self::new)
            .map_err(|_| EmptyNameError)
    }
}
