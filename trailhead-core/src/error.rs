//! Error types raised by the domain model and indices.

use thiserror::Error;

/// Validation failures raised by [`crate::TrailBuilder::build`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrailError {
    /// The trail name was empty or whitespace.
    #[error("trail name must not be blank")]
    BlankName,
    /// A physical measurement was negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidMeasurement {
        /// Name of the offending measurement.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Latitude or longitude fell outside the WGS84 range.
    #[error("coordinate ({latitude}, {longitude}) is outside the valid range")]
    InvalidCoordinate {
        /// Latitude supplied.
        latitude: f64,
        /// Longitude supplied.
        longitude: f64,
    },
}

/// Failures raised when mutating a [`crate::Group`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// Joining would push the group over its capacity.
    #[error("party of {requested} exceeds the {remaining} remaining slots")]
    CapacityExceeded {
        /// Party size requested.
        requested: u32,
        /// Slots still free before the join.
        remaining: u32,
    },
}

/// Validation failures raised when constructing an [`crate::Animal`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimalError {
    /// The animal name was empty or whitespace.
    #[error("animal name must not be blank")]
    BlankName,
    /// An active month fell outside `1..=12`.
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),
    /// An active day fell outside `1..=30`.
    #[error("day {0} is outside 1..=30")]
    InvalidDay(u8),
}

/// Failures raised by [`crate::TrailIndex`] mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A trail with the same identity is already indexed.
    #[error("trail '{name}' is already indexed")]
    DuplicateTrail {
        /// Name of the rejected trail.
        name: String,
    },
}

/// Raised when text does not name a known enum variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    /// Kind of value being parsed, for example `difficulty`.
    pub kind: &'static str,
    /// Text that failed to parse.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
