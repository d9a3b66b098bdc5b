//! Fuzzy trail-name search over an inverted token index.
//!
//! Names are normalised (NFKC, lowercase, punctuation collapsed to single
//! spaces) and split into tokens. A query gathers candidates from exact
//! token hits, from indexed tokens that start with a query token and from
//! names containing the whole normalised query, then ranks them:
//!
//! | Match                        | Base score |
//! |------------------------------|-----------:|
//! | name equals query            | 100        |
//! | name starts with query       | 80         |
//! | name contains query          | 60         |
//! | token overlap only           | 0          |
//!
//! plus the Jaccard similarity of the two token sets scaled by 20.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::collections::{ChainMap, SeqList};
use crate::trail::{Trail, TrailId};

/// Results returned when the caller passes a limit of zero.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

const EXACT_SCORE: f64 = 100.0;
const PREFIX_SCORE: f64 = 80.0;
const SUBSTRING_SCORE: f64 = 60.0;
const OVERLAP_WEIGHT: f64 = 20.0;

/// A search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredId {
    /// Identifier handed out by [`NameSearchIndex::add`].
    pub id: TrailId,
    /// Relevance score; higher is better.
    pub score: f64,
}

/// Inverted index from name tokens to trail identifiers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use trailhead_core::{Difficulty, NameSearchIndex, Topic, Trail};
///
/// let mut index = NameSearchIndex::new();
/// let id = index.add(Arc::new(
///     Trail::builder("Blue Hills Skyline", Topic::Mountain, Difficulty::Hard).build().unwrap(),
/// ));
/// let hits = index.search("blue hil", 0);
/// assert_eq!(hits[0].id, id);
/// ```
#[derive(Debug, Default)]
pub struct NameSearchIndex {
    trails: SeqList<Arc<Trail>>,
    names: SeqList<String>,
    tokens: ChainMap<String, HashSet<TrailId>>,
}

impl NameSearchIndex {
    /// Construct an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a trail and return its dense identifier.
    ///
    /// Identifiers are assigned sequentially from zero.
    pub fn add(&mut self, trail: Arc<Trail>) -> TrailId {
        let id = TrailId(self.trails.len());
        let name = normalize(trail.name());
        for token in name.split(' ').filter(|token| !token.is_empty()) {
            self.tokens
                .get_or_insert_with(token.to_owned(), HashSet::new)
                .insert(id);
        }
        self.names.add(name);
        self.trails.add(trail);
        id
    }

    /// Return the trail registered under `id`.
    pub fn get(&self, id: TrailId) -> Option<&Arc<Trail>> {
        self.trails.get(id.0).ok()
    }

    /// Number of indexed trails.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Report whether no trail is indexed.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Rank trails whose names resemble `keyword`.
    ///
    /// Results are sorted by descending score, ties in identifier order, and
    /// truncated to `limit` ([`DEFAULT_SEARCH_LIMIT`] when `limit` is zero).
    /// A keyword that normalises to nothing yields no results.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<ScoredId> {
        let query = normalize(keyword);
        if query.is_empty() {
            return Vec::new();
        }
        let query_tokens: HashSet<&str> = query.split(' ').collect();

        let mut candidates = BTreeSet::new();
        for (token, ids) in self.tokens.iter() {
            if query_tokens
                .iter()
                .any(|wanted| token.as_str() == *wanted || token.starts_with(wanted))
            {
                candidates.extend(ids.iter().copied());
            }
        }
        for (position, name) in self.names.iter().enumerate() {
            if name.contains(&query) {
                candidates.insert(TrailId(position));
            }
        }

        let mut hits: Vec<ScoredId> = candidates
            .into_iter()
            .filter_map(|id| {
                let name = self.names.get(id.0).ok()?;
                Some(ScoredId {
                    id,
                    score: score(name, &query, &query_tokens),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        let limit = if limit == 0 { DEFAULT_SEARCH_LIMIT } else { limit };
        hits.truncate(limit);
        hits
    }
}

/// Normalise text for matching: NFKC, lowercase, and every run of
/// characters that are neither letters nor digits collapsed to one space.
///
/// # Examples
/// ```
/// use trailhead_core::normalize;
///
/// assert_eq!(normalize("  Mt. Monadnock -- WHITE   Dot "), "mt monadnock white dot");
/// assert_eq!(normalize("Ｆｕｌｌｗｉｄｔｈ"), "fullwidth");
/// ```
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.nfkc().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(c);
        } else {
            pending_space = true;
        }
    }
    normalized
}

fn score(name: &str, query: &str, query_tokens: &HashSet<&str>) -> f64 {
    let base = if name == query {
        EXACT_SCORE
    } else if name.starts_with(query) {
        PREFIX_SCORE
    } else if name.contains(query) {
        SUBSTRING_SCORE
    } else {
        0.0
    };
    let name_tokens: HashSet<&str> = name.split(' ').filter(|t| !t.is_empty()).collect();
    base + jaccard(&name_tokens, query_tokens) * OVERLAP_WEIGHT
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}
