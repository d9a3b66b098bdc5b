//! Hiking groups and their participants.
//!
//! A [`Group`] holds a shared handle to its [`Trail`] and a participant
//! list guarded by a single mutator, [`Group::join`], which keeps the sum
//! of party sizes within capacity.

use std::sync::Arc;

use time::PrimitiveDateTime;

use crate::collections::SeqList;
use crate::error::GroupError;
use crate::trail::Trail;

/// Externally generated group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub String);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a user joining a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub String);

/// One join entry: a user and the number of people they bring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    user: UserId,
    party_size: u32,
}

impl Participant {
    /// Record a participant; the party size is clamped to at least one.
    pub fn new(user: UserId, party_size: u32) -> Self {
        Self {
            user,
            party_size: party_size.max(1),
        }
    }

    /// The joining user.
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// People covered by this entry.
    pub fn party_size(&self) -> u32 {
        self.party_size
    }
}

/// A scheduled outing on one trail.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use time::macros::datetime;
/// use trailhead_core::{Difficulty, Group, GroupId, Topic, Trail, UserId};
///
/// let trail = Arc::new(Trail::builder("Ridge", Topic::Mountain, Difficulty::Hard).build().unwrap());
/// let mut group = Group::new(GroupId("g1".into()), trail, "Dawn hike", datetime!(2025-06-01 06:00), 4);
/// group.join(UserId("ana".into()), 3).unwrap();
/// assert!(!group.can_join(2));
/// assert_eq!(group.remaining_slots(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    trail: Arc<Trail>,
    title: String,
    start_time: PrimitiveDateTime,
    capacity: u32,
    participants: SeqList<Participant>,
}

impl Group {
    /// Create an empty group; the capacity is clamped to at least one.
    pub fn new(
        id: GroupId,
        trail: Arc<Trail>,
        title: impl Into<String>,
        start_time: PrimitiveDateTime,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            trail,
            title: title.into(),
            start_time,
            capacity: capacity.max(1),
            participants: SeqList::new(),
        }
    }

    /// Group identifier.
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    /// Shared handle to the trail.
    pub fn trail(&self) -> &Arc<Trail> {
        &self.trail
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Scheduled start.
    pub fn start_time(&self) -> PrimitiveDateTime {
        self.start_time
    }

    /// Maximum number of people.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Join entries in arrival order.
    pub fn participants(&self) -> &SeqList<Participant> {
        &self.participants
    }

    /// Sum of party sizes.
    pub fn current_size(&self) -> u32 {
        self.participants.iter().map(Participant::party_size).sum()
    }

    /// Free places left.
    pub fn remaining_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.current_size())
    }

    /// Report whether no places are left.
    pub fn is_full(&self) -> bool {
        self.current_size() >= self.capacity
    }

    /// Report whether a party of `party_size` (clamped to at least one)
    /// would fit.
    pub fn can_join(&self, party_size: u32) -> bool {
        party_size.max(1) <= self.remaining_slots()
    }

    /// Add a participant.
    ///
    /// # Errors
    /// Returns [`GroupError::CapacityExceeded`] and leaves the group
    /// unchanged when the party does not fit.
    pub fn join(&mut self, user: UserId, party_size: u32) -> Result<(), GroupError> {
        let requested = party_size.max(1);
        let remaining = self.remaining_slots();
        if requested > remaining {
            return Err(GroupError::CapacityExceeded {
                requested,
                remaining,
            });
        }
        self.participants.add(Participant::new(user, requested));
        Ok(())
    }
}
