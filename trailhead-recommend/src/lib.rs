//! Ranking engines built on the Trailhead core indexes.
//!
//! - [`GroupSearchEngine`] finds hiking groups by trail conditions and
//!   ranks them with a bounded top-K heap.
//! - [`TrailRecommender`] relaxes a [`UserPreference`] band by band until
//!   enough trails match, then ranks them.
//! - [`AnimalTrailScorer`] ranks trails for the chance of meeting an animal
//!   group in a given month.
//!
//! Every tunable constant lives in [`config`] with a validating
//! constructor path, so the engines never run on nonsensical weights.
//!
//! [`UserPreference`]: trailhead_core::UserPreference

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod animal;
pub mod config;
mod error;
mod group_search;
mod recommender;

pub use animal::{
    AnimalTrailScorer, active_groups_by_month, activity_level, activity_map_by_month,
    match_animals,
};
pub use config::{
    AnimalScoreWeights, DistanceBand, DistanceBands, FinalScoreWeights, GroupScoreWeights,
    NearbyWeights, RecommenderConfig, RelaxationConfig,
};
pub use error::{AnimalScoreError, ConfigError, GroupSearchError};
pub use group_search::{GroupCriteria, GroupHandle, GroupSearchEngine, RankedGroup};
pub use recommender::{
    Relaxation, RelaxationBand, RelaxationStage, ScoredTrail, TrailRecommender,
    intrinsic_quality, preference_match,
};
