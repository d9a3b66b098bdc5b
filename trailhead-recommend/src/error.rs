//! Error types raised by the ranking engines.

use thiserror::Error;
use trailhead_core::{GroupError, GroupId};

use crate::group_search::GroupHandle;

/// Failures raised by [`GroupSearchEngine`](crate::GroupSearchEngine).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupSearchError {
    /// A group referenced a trail the engine has not indexed.
    #[error("group '{group}' runs on trail '{trail}', which is not indexed")]
    UnindexedTrail {
        /// Identifier of the rejected group.
        group: GroupId,
        /// Name of the missing trail.
        trail: String,
    },
    /// No group is stored under the handle.
    #[error("no group is registered as {0}")]
    UnknownGroup(GroupHandle),
    /// The group refused the join.
    #[error(transparent)]
    Join(#[from] GroupError),
}

/// Failures raised by [`AnimalTrailScorer`](crate::AnimalTrailScorer).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnimalScoreError {
    /// The month fell outside `1..=12`.
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),
}

/// Validation failures for the tunable configuration structs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A weight, tolerance or threshold was negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Every weight in a blend was zero.
    #[error("{field} weights must not all be zero")]
    ZeroWeights {
        /// Name of the weight set.
        field: &'static str,
    },
    /// A sequence of thresholds narrowed instead of widening.
    #[error("{field} must be in ascending order")]
    Unordered {
        /// Name of the offending sequence.
        field: &'static str,
    },
    /// A distance band awarded a score outside `0.0..=1.0`.
    #[error("distance band score {value} is outside 0..=1")]
    BandScoreOutOfRange {
        /// Score supplied.
        value: f64,
    },
}
