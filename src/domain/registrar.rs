//! The in-memory registry of students and courses.
//!
//! Students and courses refer to each other only by [`StudentId`] and
//! [`CourseId`]. The [`Registrar`] owns both and is the only place that
//! mutates memberships, so a course's roster and its students' course sets
//! always change together.

use std::collections::{BTreeMap, HashMap};

use non_empty_string::NonEmptyString;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Admission, Config, Course, CourseError, CourseId, EmptyNameError, EnrollmentLimit, LimitError,
    Student, StudentId,
};

mod audit;
pub use audit::Violation;

/// An in-memory registry of students, courses, and enrollments.
///
/// Storage is decomposed:
/// - Students: `HashMap<StudentId, Student>`
/// - Courses: `HashMap<CourseId, Course>`
/// - Catalog lookup: `BTreeMap<String, CourseId>`
#[derive(Debug, Default)]
pub struct Registrar {
    config: Config,

    students: HashMap<StudentId, Student>,

    courses: HashMap<CourseId, Course>,

    /// Forward lookup from catalog number to course.
    catalog: BTreeMap<String, CourseId>,
}

/// Errors that can occur when changing enrollments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    /// The student handle does not belong to this registrar.
    #[error("{0} not found")]
    StudentNotFound(StudentId),
    /// The course handle does not belong to this registrar.
    #[error("{0} not found")]
    CourseNotFound(CourseId),
    /// The requested enrollment limit was rejected.
    #[error(transparent)]
    Limit(#[from] LimitError),
}

impl Registrar {
    /// Creates an empty registrar with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registrar with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration this registrar was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Adds a student who is not yet enrolled in anything.
    ///
    /// Names need not be unique.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyNameError`] if the name is empty.
    pub fn add_student(&mut self, name: impl Into<String>) -> Result<StudentId, EmptyNameError> {
        let student = Student::try_from(name.into())?;
        let id = StudentId::generate();
        tracing::debug!(%id, name = student.name(), "added student");
        self.students.insert(id, student);
        Ok(id)
    }

    /// Adds a course with no students.
    ///
    /// The course starts with the configured default enrollment limit.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::InvalidCatalogNumber`] if the catalog number is
    /// empty, or [`CourseError::DuplicateCatalogNumber`] if another course
    /// already uses it.
    pub fn add_course(
        &mut self,
        catalog_number: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<CourseId, CourseError> {
        let catalog_number = catalog_number.into();
        if self.catalog.contains_key(&catalog_number) {
            return Err(CourseError::DuplicateCatalogNumber(catalog_number));
        }
        let validated =
            NonEmptyString::new(catalog_number.clone()).map_err(|_| EmptyNameError)?;

        let id = CourseId::generate();
        let course = Course::new(
            validated,
            title.into(),
            self.config.default_enrollment_limit(),
        );
        tracing::debug!(%id, %course, limit = %course.enrollment_limit(), "added course");

        self.catalog.insert(catalog_number, id);
        self.courses.insert(id, course);
        Ok(id)
    }

    /// Retrieves a student by handle.
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Retrieves a course by handle.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Finds a course by its catalog number.
    #[must_use]
    pub fn find_course(&self, catalog_number: &str) -> Option<CourseId> {
        self.catalog.get(catalog_number).copied()
    }

    /// Returns an iterator over all students, in no particular order.
    pub fn students(&self) -> impl Iterator<Item = (StudentId, &Student)> + '_ {
        self.students.iter().map(|(&id, student)| (id, student))
    }

    /// Returns an iterator over all courses, ordered by catalog number.
    pub fn courses(&self) -> impl Iterator<Item = (CourseId, &Course)> + '_ {
        self.catalog
            .values()
            .filter_map(|&id| self.courses.get(&id).map(|course| (id, course)))
    }

    /// Enroll a student in a course.
    ///
    /// If the course is full, the student joins the end of its waitlist
    /// instead and [`Admission::Waitlisted`] is returned. Enrolling a student
    /// who is already enrolled or already waitlisted has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::StudentNotFound`] or
    /// [`RegistrarError::CourseNotFound`] if either handle is unknown.
    #[instrument(skip(self))]
    pub fn enroll(
        &mut self,
        student: StudentId,
        course: CourseId,
    ) -> Result<Admission, RegistrarError> {
        let admission = self.admit(student, course)?;
        self.audit();
        Ok(admission)
    }

    /// Drop a student from a course.
    ///
    /// The student leaves the roster or the waitlist, whichever they are on.
    /// Any freed seat is filled from the front of the waitlist. Dropping a
    /// course the student has nothing to do with has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::StudentNotFound`] or
    /// [`RegistrarError::CourseNotFound`] if either handle is unknown.
    #[instrument(skip(self))]
    pub fn drop(&mut self, student: StudentId, course: CourseId) -> Result<(), RegistrarError> {
        let (record, entry) = self.entries_mut(student, course)?;

        record.forget(course);
        if entry.remove(student) {
            tracing::debug!(%student, %course, "dropped");
        }

        self.drain_waitlist(course)?;
        self.audit();
        Ok(())
    }

    /// Change the enrollment limit of a course.
    ///
    /// Raising the limit enrolls students from the front of the waitlist
    /// until the course is full again or the waitlist is empty. The limit
    /// may be lowered as far as the current class size, but no further.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::Negative`] if `limit` is negative, or
    /// [`LimitError::BelowClassSize`] if more students than `limit` are
    /// already enrolled. The course is unchanged in either case.
    ///
    /// Returns [`RegistrarError::CourseNotFound`] if the handle is unknown.
    #[instrument(skip(self))]
    pub fn set_enrollment_limit(
        &mut self,
        course: CourseId,
        limit: i64,
    ) -> Result<(), RegistrarError> {
        let limit = EnrollmentLimit::try_from(limit)?;
        self.apply_limit(course, limit)
    }

    /// Remove the enrollment limit of a course, enrolling everyone on its
    /// waitlist.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::CourseNotFound`] if the handle is unknown.
    #[instrument(skip(self))]
    pub fn clear_enrollment_limit(&mut self, course: CourseId) -> Result<(), RegistrarError> {
        self.apply_limit(course, EnrollmentLimit::UNLIMITED)
    }
}

impl Registrar {
    fn entries_mut(
        &mut self,
        student: StudentId,
        course: CourseId,
    ) -> Result<(&mut Student, &mut Course), RegistrarError> {
        let record = self
            .students
            .get_mut(&student)
            .ok_or(RegistrarError::StudentNotFound(student))?;
        let entry = self
            .courses
            .get_mut(&course)
            .ok_or(RegistrarError::CourseNotFound(course))?;
        Ok((record, entry))
    }

    /// The single admission path. Direct enrollments and waitlist promotions
    /// both come through here, so the student's course set is always updated
    /// alongside the roster.
    fn admit(&mut self, student: StudentId, course: CourseId) -> Result<Admission, RegistrarError> {
        let (record, entry) = self.entries_mut(student, course)?;

        let admission = entry.admit(student);
        match admission {
            Admission::Enrolled => {
                if record.record_enrollment(course) {
                    tracing::debug!(%student, %course, "enrolled");
                }
            }
            Admission::Waitlisted => {
                tracing::debug!(
                    %student,
                    %course,
                    position = ?entry.waitlist_position(student),
                    "course full, waitlisted"
                );
            }
        }
        Ok(admission)
    }

    fn apply_limit(
        &mut self,
        course: CourseId,
        limit: EnrollmentLimit,
    ) -> Result<(), RegistrarError> {
        let entry = self
            .courses
            .get_mut(&course)
            .ok_or(RegistrarError::CourseNotFound(course))?;

        let previous = entry.enrollment_limit();
        entry.set_enrollment_limit(limit)?;
        tracing::info!(%course, %previous, %limit, "enrollment limit changed");

        self.drain_waitlist(course)?;
        self.audit();
        Ok(())
    }

    /// Promote students from the front of the waitlist while there are free
    /// seats.
    fn drain_waitlist(&mut self, course: CourseId) -> Result<(), RegistrarError> {
        loop {
            let entry = self
                .courses
                .get_mut(&course)
                .ok_or(RegistrarError::CourseNotFound(course))?;
            let Some(student) = entry.next_from_waitlist() else {
                return Ok(());
            };
            tracing::debug!(%student, %course, "promoting from waitlist");
            self.admit(student, course)?;
        }
    }

    fn audit(&self) {
        if !self.config.audit_invariants {
            return;
        }
        for violation in self.violations() {
            tracing::error!(%violation, "registrar invariant violated");
        }
    }
}
