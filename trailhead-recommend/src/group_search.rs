//! Group discovery over an engine-owned trail condition index.
//!
//! The engine keeps its own equality pools (topic, difficulty, pets) and a
//! visit-duration tree rather than sharing a
//! [`TrailIndex`](trailhead_core::TrailIndex), and owns every indexed
//! [`Group`] in an arena addressed by [`GroupHandle`]. Advanced search
//! narrows trails by pool intersection and range, then ranks the groups on
//! the surviving trails with a bounded top-K heap.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use trailhead_core::collections::{BoundedHeap, ChainMap, OrderedF64, OrderedMap, SeqList};
use trailhead_core::{
    Difficulty, Group, GroupId, NameSearchIndex, Topic, Trail, TrailId, UserId,
};

use crate::config::GroupScoreWeights;
use crate::error::GroupSearchError;

/// Opaque reference to a group stored by a [`GroupSearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupHandle(usize);

impl GroupHandle {
    /// Arena slot of the group.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group #{}", self.0)
    }
}

/// Conditions for [`GroupSearchEngine::advanced_search`]; `None` and
/// `false` mean "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupCriteria {
    /// Required trail topic.
    pub topic: Option<Topic>,
    /// Hardest acceptable difficulty.
    pub max_difficulty: Option<Difficulty>,
    /// Only trails that allow pets.
    pub need_pet_friendly: bool,
    /// Longest acceptable visit, in hours.
    pub max_visit_hours: Option<f64>,
    /// Size of the party that wants to join.
    pub join_as_party_size: Option<u32>,
}

/// A group returned by a search together with its ranking score.
#[derive(Debug, Clone, Copy)]
pub struct RankedGroup<'a> {
    /// Handle for [`GroupSearchEngine::join`].
    pub handle: GroupHandle,
    /// The group itself.
    pub group: &'a Group,
    /// Ranking score; higher is better.
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
struct Scored {
    handle: GroupHandle,
    score: f64,
}

/// Indexes trails and groups and answers group searches.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use time::macros::datetime;
/// use trailhead_core::{Difficulty, Group, GroupId, Topic, Trail};
/// use trailhead_recommend::{GroupCriteria, GroupSearchEngine};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let trail = Arc::new(Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy).build()?);
/// let mut engine = GroupSearchEngine::new();
/// engine.index_trail(Arc::clone(&trail));
/// let handle = engine.index_group(Group::new(
///     GroupId("g1".into()),
///     trail,
///     "Sunrise loop",
///     datetime!(2025-06-01 06:00),
///     4,
/// ))?;
///
/// let criteria = GroupCriteria { topic: Some(Topic::Lake), ..GroupCriteria::default() };
/// let hits = engine.advanced_search(&criteria, 5);
/// assert_eq!(hits[0].handle, handle);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GroupSearchEngine {
    weights: GroupScoreWeights,
    names: NameSearchIndex,
    trail_ids: ChainMap<Arc<Trail>, TrailId>,
    by_topic: ChainMap<Topic, HashSet<TrailId>>,
    by_difficulty: ChainMap<Difficulty, HashSet<TrailId>>,
    pet_friendly: HashSet<TrailId>,
    by_visit_hours: OrderedMap<OrderedF64, TrailId>,
    groups: SeqList<Group>,
    group_handles: ChainMap<GroupId, GroupHandle>,
    groups_by_trail: ChainMap<TrailId, SeqList<GroupHandle>>,
}

impl GroupSearchEngine {
    /// Construct an empty engine with the default ranking weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty engine with custom ranking weights.
    #[must_use]
    pub fn with_weights(weights: GroupScoreWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Ranking weights in use.
    #[must_use]
    pub const fn weights(&self) -> &GroupScoreWeights {
        &self.weights
    }

    /// Index a trail and return its identifier.
    ///
    /// Re-indexing a trail with the same identity returns the identifier
    /// handed out the first time and changes nothing.
    pub fn index_trail(&mut self, trail: Arc<Trail>) -> TrailId {
        if let Some(existing) = self.trail_ids.get(&trail) {
            return *existing;
        }
        let id = self.names.add(Arc::clone(&trail));
        self.by_topic
            .get_or_insert_with(trail.topic(), HashSet::new)
            .insert(id);
        self.by_difficulty
            .get_or_insert_with(trail.difficulty(), HashSet::new)
            .insert(id);
        if trail.is_pet_friendly() {
            self.pet_friendly.insert(id);
        }
        self.by_visit_hours
            .put(OrderedF64::new(trail.visit_hours()), id);
        self.trail_ids.put(trail, id);
        id
    }

    /// Index every trail in `trails`.
    pub fn index_trails<I, T>(&mut self, trails: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Trail>>,
    {
        for trail in trails {
            self.index_trail(trail.into());
        }
    }

    /// Take ownership of a group and attach it to its trail.
    ///
    /// A group whose identifier is already registered is not stored again;
    /// the existing handle is returned instead.
    ///
    /// # Errors
    /// Returns [`GroupSearchError::UnindexedTrail`] when the group's trail
    /// has not been indexed with [`GroupSearchEngine::index_trail`].
    pub fn index_group(&mut self, group: Group) -> Result<GroupHandle, GroupSearchError> {
        if let Some(existing) = self.group_handles.get(group.id()) {
            return Ok(*existing);
        }
        let Some(trail_id) = self.trail_id(group.trail()) else {
            return Err(GroupSearchError::UnindexedTrail {
                group: group.id().clone(),
                trail: group.trail().name().to_owned(),
            });
        };
        let handle = GroupHandle(self.groups.len());
        self.group_handles.put(group.id().clone(), handle);
        self.groups_by_trail
            .get_or_insert_with(trail_id, SeqList::new)
            .add(handle);
        self.groups.add(group);
        Ok(handle)
    }

    /// Index every group in `groups`, skipping those whose trail is unknown.
    ///
    /// Returns the handles of the indexed groups in input order.
    pub fn index_groups<I>(&mut self, groups: I) -> Vec<GroupHandle>
    where
        I: IntoIterator<Item = Group>,
    {
        let mut handles = Vec::new();
        for group in groups {
            match self.index_group(group) {
                Ok(handle) => handles.push(handle),
                Err(err) => warn!("skipping group during bulk indexing: {err}"),
            }
        }
        handles
    }

    /// Identifier of an indexed trail.
    #[must_use]
    pub fn trail_id(&self, trail: &Trail) -> Option<TrailId> {
        self.trail_ids.get(trail).copied()
    }

    /// Trail registered under `id`.
    #[must_use]
    pub fn trail(&self, id: TrailId) -> Option<&Arc<Trail>> {
        self.names.get(id)
    }

    /// Group stored under `handle`.
    #[must_use]
    pub fn group(&self, handle: GroupHandle) -> Option<&Group> {
        self.groups.get(handle.0).ok()
    }

    /// Number of indexed trails.
    #[must_use]
    pub fn trail_count(&self) -> usize {
        self.names.len()
    }

    /// Number of stored groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups attached to a trail, in indexing order.
    pub fn groups_for_trail(&self, id: TrailId) -> impl Iterator<Item = (GroupHandle, &Group)> {
        self.groups_by_trail
            .get(&id)
            .into_iter()
            .flat_map(SeqList::iter)
            .filter_map(|handle| Some((*handle, self.group(*handle)?)))
    }

    /// Trails satisfying every given equality condition.
    ///
    /// `max_difficulty` admits every difficulty up to and including the
    /// given one. With no condition every indexed trail qualifies. Pools
    /// are intersected starting from the smallest.
    #[must_use]
    pub fn candidates(
        &self,
        topic: Option<Topic>,
        max_difficulty: Option<Difficulty>,
        need_pet_friendly: bool,
    ) -> BTreeSet<TrailId> {
        let empty = HashSet::new();
        let mut up_to_difficulty = HashSet::new();
        let mut pools: Vec<&HashSet<TrailId>> = Vec::with_capacity(3);
        if let Some(wanted) = topic {
            pools.push(self.by_topic.get(&wanted).unwrap_or(&empty));
        }
        if let Some(max) = max_difficulty {
            for difficulty in Difficulty::ALL.into_iter().filter(|d| *d <= max) {
                if let Some(ids) = self.by_difficulty.get(&difficulty) {
                    up_to_difficulty.extend(ids.iter().copied());
                }
            }
            pools.push(&up_to_difficulty);
        }
        if need_pet_friendly {
            pools.push(&self.pet_friendly);
        }

        pools.sort_by_key(|pool| pool.len());
        let Some((smallest, rest)) = pools.split_first() else {
            return (0..self.names.len()).map(TrailId).collect();
        };
        smallest
            .iter()
            .filter(|id| rest.iter().all(|pool| pool.contains(*id)))
            .copied()
            .collect()
    }

    /// Rank the groups on trails matching `criteria`.
    ///
    /// Groups that cannot take `join_as_party_size` are skipped. With a
    /// `top_k` of zero every surviving group is returned; otherwise at most
    /// `top_k`. Results are sorted by descending score and the order of
    /// equal scores is unspecified.
    #[must_use]
    pub fn advanced_search(&self, criteria: &GroupCriteria, top_k: usize) -> Vec<RankedGroup<'_>> {
        let mut pool = self.candidates(
            criteria.topic,
            criteria.max_difficulty,
            criteria.need_pet_friendly,
        );
        if let Some(max_hours) = criteria.max_visit_hours {
            let within: HashSet<TrailId> = self
                .by_visit_hours
                .get_range(&OrderedF64::new(0.0), &OrderedF64::new(max_hours))
                .into_iter()
                .copied()
                .collect();
            pool.retain(|id| within.contains(id));
        }
        debug!("advanced search narrowed to {} trails", pool.len());

        let by_score = |a: &Scored, b: &Scored| a.score.total_cmp(&b.score);
        let mut heap = if top_k == 0 {
            BoundedHeap::new(by_score)
        } else {
            BoundedHeap::with_bound(top_k, by_score)
        };
        for id in pool {
            for (handle, group) in self.groups_for_trail(id) {
                if criteria
                    .join_as_party_size
                    .is_some_and(|party| !group.can_join(party))
                {
                    continue;
                }
                let score = self.score(group, criteria.join_as_party_size);
                heap.offer(Scored { handle, score });
            }
        }

        let mut ranked = heap.into_sorted_vec();
        ranked.reverse();
        ranked
            .into_iter()
            .filter_map(|scored| {
                Some(RankedGroup {
                    handle: scored.handle,
                    group: self.group(scored.handle)?,
                    score: scored.score,
                })
            })
            .collect()
    }

    /// Groups on the trails whose names best match `keyword`.
    ///
    /// Trails are taken in relevance order, at most `trail_limit` of them
    /// (50 when zero), and each result carries its trail's relevance score.
    #[must_use]
    pub fn search_groups_by_trail_keyword(
        &self,
        keyword: &str,
        trail_limit: usize,
    ) -> Vec<RankedGroup<'_>> {
        self.names
            .search(keyword, trail_limit)
            .into_iter()
            .flat_map(|hit| {
                self.groups_for_trail(hit.id)
                    .map(move |(handle, group)| RankedGroup {
                        handle,
                        group,
                        score: hit.score,
                    })
            })
            .collect()
    }

    /// Report whether a party of `party_size` fits in the group.
    ///
    /// # Errors
    /// Returns [`GroupSearchError::UnknownGroup`] for a stale handle.
    pub fn can_join(&self, handle: GroupHandle, party_size: u32) -> Result<bool, GroupSearchError> {
        self.group(handle)
            .map(|group| group.can_join(party_size))
            .ok_or(GroupSearchError::UnknownGroup(handle))
    }

    /// Add a participant to a stored group.
    ///
    /// # Errors
    /// Returns [`GroupSearchError::UnknownGroup`] for a stale handle and
    /// [`GroupSearchError::Join`] when the party does not fit; the group is
    /// unchanged in both cases.
    pub fn join(
        &mut self,
        handle: GroupHandle,
        user: UserId,
        party_size: u32,
    ) -> Result<(), GroupSearchError> {
        let group = self
            .groups
            .get_mut(handle.0)
            .map_err(|_| GroupSearchError::UnknownGroup(handle))?;
        group.join(user, party_size)?;
        Ok(())
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "group ranking blends weighted floating point terms"
    )]
    fn score(&self, group: &Group, party_size: Option<u32>) -> f64 {
        let trail = group.trail();
        let weights = &self.weights;
        let slots = f64::from(group.remaining_slots()).ln_1p() * weights.remaining_slots;
        let difficulty = weights.difficulty / (1.0 + f64::from(trail.difficulty().rank()));
        let duration = weights.visit_hours / (1.0 + trail.visit_hours());
        let bonus = if party_size.is_some_and(|size| group.can_join(size)) {
            weights.party_fits_bonus
        } else {
            0.0
        };
        slots + difficulty + duration + bonus
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for group indexing and ranking.

    use rstest::{fixture, rstest};
    use time::macros::datetime;
    use trailhead_core::test_support::scenario_trails;

    use super::*;

    fn group(id: &str, trail: &Arc<Trail>, capacity: u32) -> Group {
        Group::new(
            GroupId(id.to_owned()),
            Arc::clone(trail),
            format!("Outing {id}"),
            datetime!(2025-07-04 08:00),
            capacity,
        )
    }

    #[fixture]
    fn engine() -> GroupSearchEngine {
        let mut engine = GroupSearchEngine::new();
        let trails: Vec<Arc<Trail>> = scenario_trails().into_iter().map(Arc::new).collect();
        engine.index_trails(trails.iter().cloned());
        let [pond, ridge, summit] = trails.as_slice() else {
            panic!("scenario has three trails");
        };
        let handles = engine.index_groups([
            group("pond-small", pond, 2),
            group("pond-big", pond, 12),
            group("ridge", ridge, 6),
            group("summit", summit, 8),
        ]);
        assert_eq!(handles.len(), 4);
        engine
    }

    #[rstest]
    fn reindexing_a_trail_returns_the_same_id(mut engine: GroupSearchEngine) {
        let pond = Arc::clone(engine.trail(TrailId(0)).expect("indexed trail"));
        let again = Arc::new(Trail::clone(&pond));
        assert_eq!(engine.index_trail(again), TrailId(0));
        assert_eq!(engine.trail_count(), 3);
        assert_eq!(engine.candidates(Some(Topic::Lake), None, false).len(), 1);
    }

    #[rstest]
    fn reindexing_a_group_returns_the_same_handle(mut engine: GroupSearchEngine) {
        let ridge = Arc::clone(engine.trail(TrailId(1)).expect("indexed trail"));
        let handle = engine
            .index_group(group("ridge", &ridge, 99))
            .expect("known trail");
        assert_eq!(handle, GroupHandle(2));
        assert_eq!(engine.group_count(), 4);
    }

    #[rstest]
    fn groups_on_unknown_trails_are_rejected(mut engine: GroupSearchEngine) {
        let stray = Arc::new(
            Trail::builder("Stray", Topic::Beach, Difficulty::Easy)
                .build()
                .expect("valid trail"),
        );
        let err = engine
            .index_group(group("stray", &stray, 3))
            .expect_err("trail is not indexed");
        assert!(matches!(err, GroupSearchError::UnindexedTrail { .. }));
    }

    #[rstest]
    #[case(None, None, false, 3)]
    #[case(Some(Topic::Mountain), None, false, 2)]
    #[case(None, Some(Difficulty::Moderate), false, 2)]
    #[case(Some(Topic::Mountain), Some(Difficulty::Moderate), true, 1)]
    #[case(Some(Topic::Beach), None, false, 0)]
    fn candidates_intersect_specified_pools(
        engine: GroupSearchEngine,
        #[case] topic: Option<Topic>,
        #[case] max_difficulty: Option<Difficulty>,
        #[case] need_pet: bool,
        #[case] expected: usize,
    ) {
        assert_eq!(
            engine.candidates(topic, max_difficulty, need_pet).len(),
            expected
        );
    }

    #[rstest]
    fn advanced_search_is_bounded_and_descending(engine: GroupSearchEngine) {
        let hits = engine.advanced_search(&GroupCriteria::default(), 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
        assert_eq!(hits[0].group.id().0, "pond-big");

        let everything = engine.advanced_search(&GroupCriteria::default(), 0);
        assert_eq!(everything.len(), 4);
        assert!(everything.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[rstest]
    fn party_size_and_visit_hours_narrow_results(engine: GroupSearchEngine) {
        let criteria = GroupCriteria {
            max_visit_hours: Some(3.0),
            join_as_party_size: Some(3),
            ..GroupCriteria::default()
        };
        let ids: Vec<&str> = engine
            .advanced_search(&criteria, 0)
            .iter()
            .map(|hit| hit.group.id().0.as_str())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"pond-big"));
        assert!(ids.contains(&"ridge"));
    }

    #[rstest]
    fn visit_hour_ceiling_keeps_negative_zero_trails(mut engine: GroupSearchEngine) {
        let boardwalk = Arc::new(
            Trail::builder("Boardwalk", Topic::Lake, Difficulty::Easy)
                .visit_hours(-0.0)
                .build()
                .expect("valid trail"),
        );
        engine.index_trail(Arc::clone(&boardwalk));
        engine
            .index_group(group("boardwalk", &boardwalk, 5))
            .expect("known trail");
        let criteria = GroupCriteria {
            max_visit_hours: Some(10.0),
            ..GroupCriteria::default()
        };
        let hits = engine.advanced_search(&criteria, 0);
        assert_eq!(hits.len(), 5);
        assert!(hits.iter().any(|hit| hit.group.id().0 == "boardwalk"));
    }

    #[rstest]
    fn score_matches_formula(engine: GroupSearchEngine) {
        let hits = engine.advanced_search(
            &GroupCriteria {
                topic: Some(Topic::Mountain),
                max_difficulty: Some(Difficulty::Moderate),
                join_as_party_size: Some(2),
                ..GroupCriteria::default()
            },
            1,
        );
        let expected = 7.0_f64.ln() * 20.0 + 30.0 / 2.0 + 30.0 / 4.0 + 10.0;
        assert!((hits[0].score - expected).abs() < 1e-9);
    }

    #[rstest]
    fn keyword_search_lists_groups_of_matching_trails(engine: GroupSearchEngine) {
        let hits = engine.search_groups_by_trail_keyword("pond", 0);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|hit| hit.group.trail().name() == "Pond Loop"));
        assert!(engine.search_groups_by_trail_keyword("glacier", 0).is_empty());
    }

    #[rstest]
    fn joins_respect_capacity(mut engine: GroupSearchEngine) {
        let handle = GroupHandle(0);
        engine
            .join(handle, UserId("ana".to_owned()), 2)
            .expect("party fits");
        assert_eq!(engine.can_join(handle, 1), Ok(false));
        let err = engine
            .join(handle, UserId("bo".to_owned()), 1)
            .expect_err("group is full");
        assert!(matches!(err, GroupSearchError::Join(_)));
        assert_eq!(
            engine.join(GroupHandle(42), UserId("cy".to_owned()), 1),
            Err(GroupSearchError::UnknownGroup(GroupHandle(42)))
        );
    }
}
