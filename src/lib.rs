//! Facade crate for the Trailhead trail engine.
//!
//! This crate re-exports the core domain types and indexes, and exposes the
//! recommendation engines behind the `recommend` feature.

#![forbid(unsafe_code)]

pub use trailhead_core::{
    Animal, AnimalGroup, Difficulty, Feature, Group, GroupId, NameSearchIndex, Participant, Topic,
    Trail, TrailBuilder, TrailFilter, TrailId, TrailIndex, TrailQuery, UserId, UserPreference,
    collections, geography,
};

#[cfg(feature = "recommend")]
pub use trailhead_recommend::{
    AnimalTrailScorer, GroupCriteria, GroupHandle, GroupSearchEngine, RecommenderConfig,
    ScoredTrail, TrailRecommender,
};
