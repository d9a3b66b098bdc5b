//! Core domain types for the Trailhead engine.
//!
//! The crate models hiking trails, hiking groups and trail-side animals, and
//! provides the in-memory structures that index them:
//!
//! - [`collections`] holds the hand-built containers: a growable list, a
//!   chained hash map, an ordered multimap and an optionally bounded heap.
//! - [`TrailIndex`] filters a catalogue by attribute and numeric range.
//! - [`NameSearchIndex`] ranks trails by fuzzy name similarity.
//!
//! Constructors validate their input and return `Result` so invalid trails
//! and animals never reach an index.
//!
//! # Examples
//!
//! ```
//! use trailhead_core::{Difficulty, Topic, Trail, TrailFilter, TrailIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut index = TrailIndex::new();
//! index.add_trail(
//!     Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy)
//!         .length(2.0)
//!         .pet_friendly(true)
//!         .build()?,
//! )?;
//! let filter = TrailFilter {
//!     max_length: Some(3.0),
//!     ..TrailFilter::default()
//! };
//! assert_eq!(index.filter(&filter).len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod animal;
pub mod collections;
mod error;
pub mod geography;
mod group;
mod index;
mod preference;
mod trail;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use animal::{Animal, AnimalGroup, terrain_groups};
pub use error::{AnimalError, GroupError, IndexError, ParseEnumError, TrailError};
pub use group::{Group, GroupId, Participant, UserId};
pub use index::{
    DEFAULT_SEARCH_LIMIT, IndexStats, NameSearchIndex, ScoredId, TrailFilter, TrailIndex,
    TrailQuery, normalize,
};
pub use preference::UserPreference;
pub use trail::{Difficulty, Feature, Topic, Trail, TrailBuilder, TrailId};
