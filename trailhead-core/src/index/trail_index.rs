//! Multi-dimensional secondary index over trails.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::collections::{ChainMap, OrderedF64, OrderedMap, SeqList};
use crate::error::IndexError;
use crate::index::query::TrailQuery;
use crate::trail::{Difficulty, Feature, Topic, Trail};

/// Criteria accepted by [`TrailIndex::filter`].
///
/// `None` means "no constraint". Boolean criteria only narrow the result
/// when set to `Some(true)`; `Some(false)` is treated as a wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrailFilter {
    /// Exact difficulty.
    pub difficulty: Option<Difficulty>,
    /// Length at most this many miles.
    pub max_length: Option<f64>,
    /// Pets allowed.
    pub pet_friendly: Option<bool>,
    /// Camping allowed.
    pub camping: Option<bool>,
    /// Exact topic.
    pub topic: Option<Topic>,
    /// Wild animals possible.
    pub wildlife: Option<bool>,
    /// Visit duration at most this many hours.
    pub max_visit_hours: Option<f64>,
}

/// Entry counts per index, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Trails in the primary list.
    pub trails: usize,
    /// Distinct lowercase names.
    pub names: usize,
    /// Distinct length keys.
    pub length_keys: usize,
    /// Distinct visit-hour keys.
    pub visit_hour_keys: usize,
}

/// Primary trail list plus every secondary index derived from it.
///
/// Every mutation touches all indices together, so a trail is either
/// reachable through all of them or through none.
///
/// # Examples
/// ```
/// use trailhead_core::{Difficulty, Topic, Trail, TrailFilter, TrailIndex};
///
/// let mut index = TrailIndex::new();
/// index
///     .add_trail(Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy).length(2.0).build().unwrap())
///     .unwrap();
/// index
///     .add_trail(Trail::builder("Summit", Topic::Mountain, Difficulty::Hard).length(9.0).build().unwrap())
///     .unwrap();
///
/// let easy_short = index.filter(&TrailFilter {
///     difficulty: Some(Difficulty::Easy),
///     max_length: Some(3.0),
///     ..TrailFilter::default()
/// });
/// assert_eq!(easy_short.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TrailIndex {
    trails: SeqList<Arc<Trail>>,
    members: ChainMap<Arc<Trail>, ()>,
    by_name: ChainMap<String, Arc<Trail>>,
    by_difficulty: ChainMap<Difficulty, SeqList<Arc<Trail>>>,
    by_topic: ChainMap<Topic, SeqList<Arc<Trail>>>,
    by_feature: ChainMap<Feature, SeqList<Arc<Trail>>>,
    by_length: OrderedMap<OrderedF64, Arc<Trail>>,
    by_visit_hours: OrderedMap<OrderedF64, Arc<Trail>>,
}

impl TrailIndex {
    /// Construct an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `trails`, skipping duplicates with a warning.
    pub fn from_trails<I, T>(trails: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Trail>>,
    {
        let mut index = Self::new();
        for trail in trails {
            if let Err(err) = index.add_trail(trail) {
                warn!("skipping trail during bulk load: {err}");
            }
        }
        index
    }

    /// Insert a trail into the primary list and every secondary index.
    ///
    /// Returns the shared handle stored by the index.
    ///
    /// # Errors
    /// Returns [`IndexError::DuplicateTrail`] when a trail with the same
    /// identity is already indexed; no index is modified in that case.
    pub fn add_trail(&mut self, trail: impl Into<Arc<Trail>>) -> Result<Arc<Trail>, IndexError> {
        let trail = trail.into();
        if self.members.contains_key(&trail) {
            return Err(IndexError::DuplicateTrail {
                name: trail.name().to_owned(),
            });
        }
        self.members.put(Arc::clone(&trail), ());
        self.trails.add(Arc::clone(&trail));

        let name_key = trail.name().to_lowercase();
        if let Some(previous) = self.by_name.put(name_key, Arc::clone(&trail)) {
            warn!(
                "name '{}' now resolves to the trail in '{}' instead of '{}'",
                trail.name(),
                trail.park(),
                previous.park()
            );
        }
        self.by_difficulty
            .get_or_insert_with(trail.difficulty(), SeqList::new)
            .add(Arc::clone(&trail));
        self.by_topic
            .get_or_insert_with(trail.topic(), SeqList::new)
            .add(Arc::clone(&trail));
        for feature in trail.features() {
            self.by_feature
                .get_or_insert_with(feature, SeqList::new)
                .add(Arc::clone(&trail));
        }
        self.by_length
            .put(OrderedF64::new(trail.length()), Arc::clone(&trail));
        self.by_visit_hours
            .put(OrderedF64::new(trail.visit_hours()), Arc::clone(&trail));
        Ok(trail)
    }

    /// Remove a trail from the primary list and every secondary index.
    ///
    /// Returns `false` when the trail was not indexed.
    pub fn remove_trail(&mut self, trail: &Trail) -> bool {
        let Some(stored) = self.trails.iter().find(|t| Trail::eq(t, trail)).cloned() else {
            return false;
        };
        self.members.remove(&stored);
        self.trails.remove(&stored);

        let name_key = stored.name().to_lowercase();
        if self.by_name.get(&name_key).is_some_and(|t| *t == stored) {
            self.by_name.remove(&name_key);
            let fallback = self
                .trails
                .iter()
                .rev()
                .find(|t| t.name().to_lowercase() == name_key)
                .cloned();
            if let Some(other) = fallback {
                self.by_name.put(name_key, other);
            }
        }
        remove_from_bucket(&mut self.by_difficulty, &stored.difficulty(), &stored);
        remove_from_bucket(&mut self.by_topic, &stored.topic(), &stored);
        for feature in stored.features() {
            remove_from_bucket(&mut self.by_feature, &feature, &stored);
        }
        self.by_length
            .remove_value(&OrderedF64::new(stored.length()), |t| *t == stored);
        self.by_visit_hours
            .remove_value(&OrderedF64::new(stored.visit_hours()), |t| *t == stored);
        true
    }

    /// Every indexed trail in insertion order.
    pub fn all(&self) -> &SeqList<Arc<Trail>> {
        &self.trails
    }

    /// Number of indexed trails.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Report whether no trail is indexed.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Report whether a trail with the same identity is indexed.
    pub fn contains(&self, trail: &Trail) -> bool {
        self.members.contains_key(trail)
    }

    /// Trail most recently indexed under `name` (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<Trail>> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Trails of one difficulty, or `None` when there are none.
    pub fn by_difficulty(&self, difficulty: Difficulty) -> Option<&SeqList<Arc<Trail>>> {
        self.by_difficulty.get(&difficulty).filter(|list| !list.is_empty())
    }

    /// Trails of one topic, or `None` when there are none.
    pub fn by_topic(&self, topic: Topic) -> Option<&SeqList<Arc<Trail>>> {
        self.by_topic.get(&topic).filter(|list| !list.is_empty())
    }

    /// Trails carrying `feature`, or `None` when there are none.
    pub fn with_feature(&self, feature: Feature) -> Option<&SeqList<Arc<Trail>>> {
        self.by_feature.get(&feature).filter(|list| !list.is_empty())
    }

    /// Trails no longer than `max_length` miles, shortest first.
    pub fn within_length(&self, max_length: f64) -> Vec<&Arc<Trail>> {
        self.by_length.values_up_to(&OrderedF64::new(max_length))
    }

    /// Trails whose length lies in `min..=max` miles, shortest first.
    pub fn length_between(&self, min: f64, max: f64) -> Vec<&Arc<Trail>> {
        self.by_length
            .get_range(&OrderedF64::new(min), &OrderedF64::new(max))
    }

    /// Trails visited in at most `max_hours`, quickest first.
    pub fn within_visit_hours(&self, max_hours: f64) -> Vec<&Arc<Trail>> {
        self.by_visit_hours.values_up_to(&OrderedF64::new(max_hours))
    }

    /// Intersect the sub-index result of every specified criterion.
    ///
    /// The result carries no order; sort explicitly when one is needed.
    pub fn filter(&self, criteria: &TrailFilter) -> HashSet<Arc<Trail>> {
        let mut candidates: HashSet<Arc<Trail>> = self.trails.iter().cloned().collect();
        let mut narrow = |subset: Vec<&Arc<Trail>>| {
            let keep: HashSet<&Arc<Trail>> = subset.into_iter().collect();
            candidates.retain(|trail| keep.contains(trail));
        };
        if let Some(difficulty) = criteria.difficulty {
            narrow(listed(self.by_difficulty(difficulty)));
        }
        if let Some(max_length) = criteria.max_length {
            narrow(self.within_length(max_length));
        }
        if let Some(max_hours) = criteria.max_visit_hours {
            narrow(self.within_visit_hours(max_hours));
        }
        if criteria.pet_friendly == Some(true) {
            narrow(listed(self.with_feature(Feature::PetFriendly)));
        }
        if criteria.camping == Some(true) {
            narrow(listed(self.with_feature(Feature::Camping)));
        }
        if let Some(topic) = criteria.topic {
            narrow(listed(self.by_topic(topic)));
        }
        if criteria.wildlife == Some(true) {
            narrow(listed(self.with_feature(Feature::Wildlife)));
        }
        candidates
    }

    /// Trails matching a free-form keyword query, in insertion order.
    ///
    /// See [`TrailQuery::parse`] for the accepted syntax. Blank text yields
    /// no trails.
    pub fn fuzzy(&self, text: &str) -> Vec<Arc<Trail>> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let query = TrailQuery::parse(text);
        self.trails
            .iter()
            .filter(|trail| query.matches(trail))
            .cloned()
            .collect()
    }

    /// Up to `limit` trails of at most five miles, shortest and then
    /// easiest first.
    pub fn group_friendly(&self, limit: usize) -> Vec<Arc<Trail>> {
        let mut picks: SeqList<Arc<Trail>> = self.within_length(5.0).into_iter().cloned().collect();
        picks.sort_by(|a, b| {
            a.length()
                .total_cmp(&b.length())
                .then_with(|| a.difficulty().cmp(&b.difficulty()))
        });
        picks.into_iter().take(limit).collect()
    }

    /// Up to `limit` forest or river trails of at most four miles.
    pub fn wildlife_picks(&self, limit: usize) -> Vec<Arc<Trail>> {
        [Topic::Forest, Topic::River]
            .into_iter()
            .filter_map(|topic| self.by_topic(topic))
            .flat_map(SeqList::iter)
            .filter(|trail| trail.length() <= 4.0)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Entry counts per index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            trails: self.trails.len(),
            names: self.by_name.len(),
            length_keys: self.by_length.key_count(),
            visit_hour_keys: self.by_visit_hours.key_count(),
        }
    }
}

fn listed(list: Option<&SeqList<Arc<Trail>>>) -> Vec<&Arc<Trail>> {
    list.map(|list| list.iter().collect()).unwrap_or_default()
}

fn remove_from_bucket<K>(
    map: &mut ChainMap<K, SeqList<Arc<Trail>>>,
    key: &K,
    trail: &Arc<Trail>,
) where
    K: std::hash::Hash + Eq,
{
    let emptied = map.get_mut(key).is_some_and(|list| {
        list.remove(trail);
        list.is_empty()
    });
    if emptied {
        map.remove(key);
    }
}
