//! Hand-written container primitives backing every index in the crate.
//!
//! - [`SeqList`] is a growable array list with an in-place quicksort.
//! - [`ChainMap`] is a separately chained hash map that doubles its bucket
//!   array once the load factor reaches `0.75`.
//! - [`OrderedMap`] is an unbalanced binary search tree that accumulates
//!   duplicate keys into a value list instead of overwriting them.
//! - [`BoundedHeap`] is a comparator-driven binary heap ("smallest on top")
//!   that supports arbitrary-element removal and top-K admission.
//!
//! Lookups on missing keys return `None`; positional access and heap reads
//! on empty structures return [`CollectionError`].

use thiserror::Error;

mod bounded_heap;
mod chain_map;
mod ordered_map;
mod seq_list;

pub use bounded_heap::{BoundedHeap, Comparator};
pub use chain_map::{ChainMap, Iter as ChainMapIter};
pub use ordered_map::{OrderedF64, OrderedMap};
pub use seq_list::SeqList;

/// Errors raised by positional and heap operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// An index lay outside `0..len`.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Number of stored elements.
        len: usize,
    },
    /// A read or removal was attempted on an empty structure.
    #[error("structure is empty")]
    EmptyStructure,
}
