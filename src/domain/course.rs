use std::{
    collections::{HashSet, VecDeque},
    fmt,
};

use non_empty_string::NonEmptyString;
use uuid::Uuid;

use crate::domain::{EmptyNameError, EnrollmentLimit, LimitError, StudentId};

/// A stable handle to a [`Course`] owned by a
/// [`Registrar`](crate::Registrar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseId(Uuid);

impl CourseId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "course:{}", self.0)
    }
}

/// The outcome of asking a course to admit a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The student is on the roster, either newly or already.
    Enrolled,
    /// The course is full; the student is on the waitlist.
    Waitlisted,
}

impl Admission {
    /// Whether the student made it onto the roster.
    #[must_use]
    pub const fn is_enrolled(self) -> bool {
        matches!(self, Self::Enrolled)
    }
}

/// A course that can enroll students.
///
/// The roster is bounded by the enrollment limit. Students who arrive once
/// the course is full queue on the waitlist, oldest first, and are promoted
/// by the owning [`Registrar`](crate::Registrar) as seats free up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    catalog_number: NonEmptyString,
    title: String,
    enrollment_limit: EnrollmentLimit,
    roster: HashSet<StudentId>,
    waitlist: VecDeque<StudentId>,
}

impl Course {
    pub(crate) fn new(
        catalog_number: NonEmptyString,
        title: String,
        enrollment_limit: EnrollmentLimit,
    ) -> Self {
        Self {
            catalog_number,
            title,
            enrollment_limit,
            roster: HashSet::new(),
            waitlist: VecDeque::new(),
        }
    }

    /// The catalog number, e.g. `COMP 127`.
    #[must_use]
    pub fn catalog_number(&self) -> &str {
        self.catalog_number.as_str()
    }

    /// The course title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The maximum number of students who can be enrolled in this course.
    #[must_use]
    pub const fn enrollment_limit(&self) -> EnrollmentLimit {
        self.enrollment_limit
    }

    /// Returns all students currently enrolled in this course.
    #[must_use]
    pub const fn roster(&self) -> &HashSet<StudentId> {
        &self.roster
    }

    /// Returns students waiting to be enrolled, oldest first.
    ///
    /// If any students drop, or if the enrollment limit rises, the course
    /// will automatically enroll students from the front of the waitlist.
    #[must_use]
    pub const fn waitlist(&self) -> &VecDeque<StudentId> {
        &self.waitlist
    }

    /// Returns true if the course has reached its enrollment limit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.enrollment_limit.has_room_for(self.roster.len())
    }

    /// Whether the student is on the roster.
    #[must_use]
    pub fn is_enrolled(&self, student: StudentId) -> bool {
        self.roster.contains(&student)
    }

    /// Whether the student is on the waitlist.
    #[must_use]
    pub fn is_waitlisted(&self, student: StudentId) -> bool {
        self.waitlist.contains(&student)
    }

    /// Zero-based position of the student on the waitlist.
    #[must_use]
    pub fn waitlist_position(&self, student: StudentId) -> Option<usize> {
        self.waitlist.iter().position(|&waiting| waiting == student)
    }

    // Only the registrar admits students, so that the student's own course
    // set is updated whenever the roster is.
    pub(crate) fn admit(&mut self, student: StudentId) -> Admission {
        if self.roster.contains(&student) {
            return Admission::Enrolled;
        }
        if self.is_full() {
            self.add_to_waitlist(student);
            return Admission::Waitlisted;
        }
        self.roster.insert(student);
        Admission::Enrolled
    }

    /// Removes the student from both roster and waitlist.
    ///
    /// Returns `true` if the student was in either. The caller is
    /// responsible for draining the waitlist afterwards.
    pub(crate) fn remove(&mut self, student: StudentId) -> bool {
        let waitlisted = self
            .waitlist_position(student)
            .and_then(|position| self.waitlist.remove(position))
            .is_some();
        let enrolled = self.roster.remove(&student);
        waitlisted || enrolled
    }

    /// Changes the limit without touching the waitlist.
    pub(crate) fn set_enrollment_limit(&mut self, limit: EnrollmentLimit) -> Result<(), LimitError> {
        let class_size = self.roster.len();
        if class_size > limit.get() {
            return Err(LimitError::BelowClassSize { limit, class_size });
        }
        self.enrollment_limit = limit;
        Ok(())
    }

    /// Takes the student at the head of the waitlist, but only if there is a
    /// seat for them.
    pub(crate) fn next_from_waitlist(&mut self) -> Option<StudentId> {
        if self.is_full() {
            None
        } else {
            self.waitlist.pop_front()
        }
    }

    fn add_to_waitlist(&mut self, student: StudentId) {
        if !self.waitlist.contains(&student) {
            self.waitlist.push_back(student);
        }
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut HashSet<StudentId> {
        &mut self.roster
    }

    #[cfg(test)]
    pub(crate) fn waitlist_mut(&mut self) -> &mut VecDeque<StudentId> {
        &mut self.waitlist
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.catalog_number)
    }
}

/// Errors that can occur when adding a course.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseError {
    /// The catalog number was empty.
    #[error("invalid catalog number: {0}")]
    InvalidCatalogNumber(#[from] EmptyNameError),

    /// Another course already uses this catalog number.
    #[error("course {0} already exists")]
    DuplicateCatalogNumber(String),
}
