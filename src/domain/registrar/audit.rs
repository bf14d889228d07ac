// Consistency checks over the whole registrar.

use std::{collections::HashSet, fmt};

use crate::domain::{CourseId, EnrollmentLimit, Registrar, StudentId};

/// A breach of the membership invariants between students and courses.
///
/// A registrar that is only changed through its public API never reports
/// any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The student lists the course, but the course's roster does not list
    /// the student.
    PhantomEnrollment {
        /// The student.
        student: StudentId,
        /// The course.
        course: CourseId,
    },
    /// The course's roster lists the student, but the student does not list
    /// the course.
    UnrecordedEnrollment {
        /// The student.
        student: StudentId,
        /// The course.
        course: CourseId,
    },
    /// The student appears on the waitlist more than once.
    DuplicateWaitlistEntry {
        /// The student.
        student: StudentId,
        /// The course.
        course: CourseId,
    },
    /// The student is both enrolled in and waitlisted for the course.
    EnrolledAndWaitlisted {
        /// The student.
        student: StudentId,
        /// The course.
        course: CourseId,
    },
    /// The student is waitlisted, but lists the course as enrolled.
    WaitlistedButRecorded {
        /// The student.
        student: StudentId,
        /// The course.
        course: CourseId,
    },
    /// More students are enrolled than the limit allows.
    OverCapacity {
        /// The course.
        course: CourseId,
        /// The course's enrollment limit.
        limit: EnrollmentLimit,
        /// The number of enrolled students.
        class_size: usize,
    },
    /// Seats are free while students wait.
    IdleCapacity {
        /// The course.
        course: CourseId,
        /// The number of waitlisted students.
        waiting: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhantomEnrollment { student, course } => write!(
                f,
                "{student} thinks they are enrolled in {course}, but {course} does not have them on the roster"
            ),
            Self::UnrecordedEnrollment { student, course } => write!(
                f,
                "{course} thinks {student} is enrolled, but {student} doesn't think they're in the class"
            ),
            Self::DuplicateWaitlistEntry { student, course } => {
                write!(f, "{course} waitlist contains {student} more than once")
            }
            Self::EnrolledAndWaitlisted { student, course } => {
                write!(f, "{course} has {student} both registered and waitlisted")
            }
            Self::WaitlistedButRecorded { student, course } => write!(
                f,
                "{course} lists {student} as waitlisted, but {student} thinks they are enrolled"
            ),
            Self::OverCapacity {
                course,
                limit,
                class_size,
            } => write!(
                f,
                "{course} has an enrollment limit of {limit}, but has {class_size} students"
            ),
            Self::IdleCapacity { course, waiting } => write!(
                f,
                "{course} is not full, but has {waiting} students waitlisted"
            ),
        }
    }
}

impl Registrar {
    /// Check every student and course against the membership invariants.
    ///
    /// Returns all violations found, students first, then courses in
    /// catalog order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (student, record) in self.students() {
            for &course in record.courses() {
                let on_roster = self
                    .course(course)
                    .is_some_and(|entry| entry.is_enrolled(student));
                if !on_roster {
                    violations.push(Violation::PhantomEnrollment { student, course });
                }
            }
        }

        for (course, entry) in self.courses() {
            for &student in entry.roster() {
                let recorded = self
                    .student(student)
                    .is_some_and(|record| record.is_enrolled_in(course));
                if !recorded {
                    violations.push(Violation::UnrecordedEnrollment { student, course });
                }
            }

            let mut seen = HashSet::new();
            for &student in entry.waitlist() {
                if !seen.insert(student) {
                    violations.push(Violation::DuplicateWaitlistEntry { student, course });
                    continue;
                }
                if entry.is_enrolled(student) {
                    violations.push(Violation::EnrolledAndWaitlisted { student, course });
                }
                if self
                    .student(student)
                    .is_some_and(|record| record.is_enrolled_in(course))
                {
                    violations.push(Violation::WaitlistedButRecorded { student, course });
                }
            }

            let limit = entry.enrollment_limit();
            let class_size = entry.roster().len();
            if class_size > limit.get() {
                violations.push(Violation::OverCapacity {
                    course,
                    limit,
                    class_size,
                });
            }
            if limit.has_room_for(class_size) && !entry.waitlist().is_empty() {
                violations.push(Violation::IdleCapacity {
                    course,
                    waiting: entry.waitlist().len(),
                });
            }
        }

        violations
    }
}
