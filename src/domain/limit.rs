use std::fmt;

use serde::{Deserialize, Serialize};

/// The maximum number of students a course may enroll.
///
/// Defaults to [`EnrollmentLimit::UNLIMITED`], a sentinel that places no
/// practical bound on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentLimit(usize);

impl EnrollmentLimit {
    /// No practical bound on the number of enrolled students.
    pub const UNLIMITED: Self = Self(usize::MAX);

    /// Creates a limit of exactly `limit` students.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// The limit as a plain number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether this is the unlimited sentinel.
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        self.0 == usize::MAX
    }

    /// Whether a class of `class_size` students still has a free seat.
    #[must_use]
    pub const fn has_room_for(self, class_size: usize) -> bool {
        class_size < self.0
    }
}

impl Default for EnrollmentLimit {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

impl From<usize> for EnrollmentLimit {
    fn from(limit: usize) -> Self {
        Self(limit)
    }
}

impl TryFrom<i64> for EnrollmentLimit {
    type Error = LimitError;

    /// Values too large for the platform's `usize` saturate to
    /// [`EnrollmentLimit::UNLIMITED`].
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(LimitError::Negative(value));
        }
        Ok(usize::try_from(value).map_or(Self::UNLIMITED, Self))
    }
}

impl fmt::Display for EnrollmentLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            f.write_str("unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// An enrollment limit was rejected.
///
/// The course is left untouched when either of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitError {
    /// Limits cannot be negative.
    #[error("course cannot have negative enrollment limit: {0}")]
    Negative(i64),

    /// Limits cannot drop below the number of students already enrolled.
    #[error("cannot set limit {limit} below class size {class_size}")]
    BelowClassSize {
        /// The rejected limit.
        limit: EnrollmentLimit,
        /// The number of students on the roster.
        class_size: usize,
    },
}
