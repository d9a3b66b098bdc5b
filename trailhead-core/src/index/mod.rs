//! Query structures over a trail catalogue.
//!
//! [`TrailIndex`] answers attribute and range filters, [`NameSearchIndex`]
//! ranks trails by name similarity and [`TrailQuery`] turns a keyword string
//! into structured conditions.

mod name_search;
mod query;
mod trail_index;

pub use name_search::{DEFAULT_SEARCH_LIMIT, NameSearchIndex, ScoredId, normalize};
pub use query::TrailQuery;
pub use trail_index::{IndexStats, TrailFilter, TrailIndex};
