//! This bench test simulates a popular course: many students enroll, most of
//! them end up on the waitlist, and then the waitlist drains as the limit is
//! raised and students drop.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use registrar::{CourseId, Registrar, StudentId};

const STUDENTS: usize = 2_000;

/// Registers students and enrolls them all in one course with a small limit.
fn preseed_registrar() -> (Registrar, CourseId, Vec<StudentId>) {
    let mut registrar = Registrar::new();
    let course = registrar.add_course("COMP 127", "Software Fun Fun").unwrap();
    registrar.set_enrollment_limit(course, 100).unwrap();

    let students: Vec<_> = (1..=STUDENTS)
        .map(|n| {
            registrar
                .add_student(format!("Anonymous student {n}"))
                .unwrap()
        })
        .collect();
    for &student in &students {
        registrar.enroll(student, course).unwrap();
    }

    (registrar, course, students)
}

fn enroll_many(c: &mut Criterion) {
    c.bench_function("enroll past limit", |b| {
        b.iter(preseed_registrar);
    });
}

fn drain_waitlist(c: &mut Criterion) {
    c.bench_function("raise limit", |b| {
        b.iter_batched(
            preseed_registrar,
            |(mut registrar, course, _)| {
                registrar.clear_enrollment_limit(course).unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("drop enrolled students", |b| {
        b.iter_batched(
            preseed_registrar,
            |(mut registrar, course, students)| {
                for &student in &students[..100] {
                    registrar.drop(student, course).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, enroll_many, drain_waitlist);
criterion_main!(benches);
