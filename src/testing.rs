//! Shared setup for unit tests.

use std::collections::HashSet;

use crate::{CourseId, Registrar, StudentId};

/// A registrar pre-populated with a few students and courses.
///
/// `comp127` has an enrollment limit of 16; the others are unlimited. The
/// registrar is checked for invariant violations when the fixture is
/// dropped, so every test ends with a consistency check.
pub struct Fixture {
    pub registrar: Registrar,
    pub comp127: CourseId,
    pub math6: CourseId,
    pub basket_weaving101: CourseId,
    pub sally: StudentId,
    pub fred: StudentId,
    pub zongo: StudentId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut registrar = Registrar::new();

        let sally = registrar.add_student("Sally").unwrap();
        let fred = registrar.add_student("Fred").unwrap();
        let zongo = registrar.add_student("Zongo Jr.").unwrap();

        let comp127 = registrar.add_course("COMP 127", "Software Fun Fun").unwrap();
        registrar.set_enrollment_limit(comp127, 16).unwrap();

        let math6 = registrar
            .add_course("Math 6", "All About the Number Six")
            .unwrap();
        let basket_weaving101 = registrar
            .add_course("Underwater Basket Weaving 101", "Senior spring semester!")
            .unwrap();

        Self {
            registrar,
            comp127,
            math6,
            basket_weaving101,
            sally,
            fred,
            zongo,
        }
    }

    /// Creates `count` anonymous students and tries to enroll each of them.
    pub fn enroll_multiple_students(&mut self, course: CourseId, count: usize) {
        for n in (1..=count).rev() {
            let student = self
                .registrar
                .add_student(format!("Anonymous student {n}"))
                .unwrap();
            self.registrar.enroll(student, course).unwrap();
        }
    }

    /// Tries to enroll each student in turn.
    pub fn enroll_all(&mut self, students: impl IntoIterator<Item = StudentId>, course: CourseId) {
        for student in students {
            self.registrar.enroll(student, course).unwrap();
        }
    }

    pub fn courses_of(&self, student: StudentId) -> HashSet<CourseId> {
        self.registrar.student(student).unwrap().courses().clone()
    }

    pub fn roster_of(&self, course: CourseId) -> HashSet<StudentId> {
        self.registrar.course(course).unwrap().roster().clone()
    }

    pub fn waitlist_of(&self, course: CourseId) -> Vec<StudentId> {
        self.registrar
            .course(course)
            .unwrap()
            .waitlist()
            .iter()
            .copied()
            .collect()
    }

    pub fn limit_of(&self, course: CourseId) -> crate::EnrollmentLimit {
        self.registrar.course(course).unwrap().enrollment_limit()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let violations = self.registrar.violations();
        assert!(
            violations.is_empty(),
            "registrar invariants violated:\n{}",
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
