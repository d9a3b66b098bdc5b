//! What a user is looking for in a trail.

use geo::Coord;

use crate::geography::BOSTON;
use crate::trail::{Difficulty, Topic};

/// Trail preferences used by the recommender.
///
/// `None` fields are wildcards: they neither filter nor score. The boolean
/// wishes only add to a trail's score when the trail has the feature.
///
/// # Examples
/// ```
/// use trailhead_core::{Difficulty, Topic, UserPreference};
///
/// let pref = UserPreference::default().with_pet_friendly(true);
/// assert_eq!(pref.target_length, Some(5.0));
/// assert_eq!(pref.difficulty, Some(Difficulty::Moderate));
/// assert_eq!(pref.topic, Some(Topic::Mountain));
/// assert!(pref.pet_friendly);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserPreference {
    /// Desired length in miles.
    pub target_length: Option<f64>,
    /// Desired difficulty.
    pub difficulty: Option<Difficulty>,
    /// Desired landscape.
    pub topic: Option<Topic>,
    /// Wants a pet-friendly trail.
    pub pet_friendly: bool,
    /// Wants camping.
    pub camping: bool,
    /// Wants a chance of wildlife.
    pub wildlife: bool,
    /// Where the user starts from (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            target_length: Some(5.0),
            difficulty: Some(Difficulty::Moderate),
            topic: Some(Topic::Mountain),
            pet_friendly: false,
            camping: false,
            wildlife: false,
            location: BOSTON,
        }
    }
}

impl UserPreference {
    /// A preference with every criterion unset, located in Boston.
    pub fn unconstrained() -> Self {
        Self {
            target_length: None,
            difficulty: None,
            topic: None,
            ..Self::default()
        }
    }

    /// Set the target length.
    #[must_use]
    pub fn with_target_length(mut self, miles: Option<f64>) -> Self {
        self.target_length = miles;
        self
    }

    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the topic.
    #[must_use]
    pub fn with_topic(mut self, topic: Option<Topic>) -> Self {
        self.topic = topic;
        self
    }

    /// Set the pet wish.
    #[must_use]
    pub fn with_pet_friendly(mut self, wanted: bool) -> Self {
        self.pet_friendly = wanted;
        self
    }

    /// Set the camping wish.
    #[must_use]
    pub fn with_camping(mut self, wanted: bool) -> Self {
        self.camping = wanted;
        self
    }

    /// Set the wildlife wish.
    #[must_use]
    pub fn with_wildlife(mut self, wanted: bool) -> Self {
        self.wildlife = wanted;
        self
    }

    /// Set the starting location.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = location;
        self
    }

    /// Report whether the location is the `(0, 0)` placeholder used when
    /// no position is known.
    pub fn has_unknown_location(&self) -> bool {
        self.location.x == 0.0 && self.location.y == 0.0
    }
}
