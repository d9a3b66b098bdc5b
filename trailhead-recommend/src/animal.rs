//! Ranking trails for the chance of meeting a given animal group.
//!
//! A trail's score combines how well its terrain suits the group, how
//! active the group is in the month, how its difficulty suits the group's
//! habits, and a penalty when predators share the terrain.

use std::collections::BTreeMap;
use std::sync::Arc;

use trailhead_core::{Animal, AnimalGroup, Topic, Trail, terrain_groups};

use crate::config::AnimalScoreWeights;
use crate::error::{AnimalScoreError, ConfigError};
use crate::recommender::ScoredTrail;

/// Scores trails for an animal group in a given month.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use trailhead_core::{AnimalGroup, Difficulty, Topic, Trail};
/// use trailhead_recommend::AnimalTrailScorer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let trails = [
///     Arc::new(Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy).build()?),
///     Arc::new(Trail::builder("Summit", Topic::Mountain, Difficulty::Hard).build()?),
/// ];
/// let ranked = AnimalTrailScorer::new().recommend_trails_for_animal(AnimalGroup::Fish, 5, &trails)?;
/// assert_eq!(ranked[0].trail.name(), "Pond Loop");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimalTrailScorer {
    weights: AnimalScoreWeights,
}

impl AnimalTrailScorer {
    /// Scorer with the default coefficients.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer with custom coefficients.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a negative or non-finite
    /// coefficient.
    pub fn with_weights(weights: AnimalScoreWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Coefficients in use.
    #[must_use]
    pub const fn weights(&self) -> &AnimalScoreWeights {
        &self.weights
    }

    /// Score `trail` for `group` in `month`.
    ///
    /// # Errors
    /// Returns [`AnimalScoreError::InvalidMonth`] when `month` is outside
    /// `1..=12`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the animal score is a weighted sum of floating point terms"
    )]
    pub fn score(&self, group: AnimalGroup, month: u8, trail: &Trail) -> Result<f64, AnimalScoreError> {
        let season = f64::from(activity_level(group, month)?);
        let terrain = trail.topic();
        let ecology = if terrain_groups(terrain).contains(&group) {
            self.weights.associated
        } else {
            self.weights.unassociated
        };
        let risk = if group != AnimalGroup::Predator
            && terrain_groups(terrain).contains(&AnimalGroup::Predator)
        {
            self.weights.predator_risk
        } else {
            0.0
        };
        Ok(self.weights.ecology * ecology + self.weights.season * season
            + difficulty_affinity(group, trail)
            - risk)
    }

    /// Rank `trails` for `group` in `month`, best first.
    ///
    /// Trails with equal scores keep their input order.
    ///
    /// # Errors
    /// Returns [`AnimalScoreError::InvalidMonth`] when `month` is outside
    /// `1..=12`.
    pub fn recommend_trails_for_animal(
        &self,
        group: AnimalGroup,
        month: u8,
        trails: &[Arc<Trail>],
    ) -> Result<Vec<ScoredTrail>, AnimalScoreError> {
        let mut scored = trails
            .iter()
            .map(|trail| {
                Ok(ScoredTrail {
                    trail: Arc::clone(trail),
                    score: self.score(group, month, trail)?,
                })
            })
            .collect::<Result<Vec<_>, AnimalScoreError>>()?;
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }
}

// Easy 1, moderate 2, hard 3; ground hunters like harder routes, birds and
// insects easier ones.
#[expect(
    clippy::float_arithmetic,
    reason = "difficulty affinity scales the difficulty base"
)]
fn difficulty_affinity(group: AnimalGroup, trail: &Trail) -> f64 {
    let base = f64::from(trail.difficulty().rank()) + 1.0;
    match group {
        AnimalGroup::Predator | AnimalGroup::Mammal => base * 1.2,
        AnimalGroup::Bird | AnimalGroup::Insect => 4.0 - base,
        _ => base,
    }
}

/// Seasonal activity (0 to 3) of `group` in `month`.
///
/// # Errors
/// Returns [`AnimalScoreError::InvalidMonth`] when `month` is outside
/// `1..=12`.
pub fn activity_level(group: AnimalGroup, month: u8) -> Result<u8, AnimalScoreError> {
    group
        .activity_level(month)
        .ok_or(AnimalScoreError::InvalidMonth(month))
}

/// Groups living in `terrain` that are active at all in `month`.
///
/// # Errors
/// Returns [`AnimalScoreError::InvalidMonth`] when `month` is outside
/// `1..=12`.
pub fn active_groups_by_month(terrain: Topic, month: u8) -> Result<Vec<AnimalGroup>, AnimalScoreError> {
    let mut active = Vec::new();
    for group in terrain_groups(terrain) {
        if activity_level(*group, month)? > 0 {
            active.push(*group);
        }
    }
    Ok(active)
}

/// Activity in `month` of every group living in `terrain`, dormant ones
/// included.
///
/// # Errors
/// Returns [`AnimalScoreError::InvalidMonth`] when `month` is outside
/// `1..=12`.
pub fn activity_map_by_month(
    terrain: Topic,
    month: u8,
) -> Result<BTreeMap<AnimalGroup, u8>, AnimalScoreError> {
    terrain_groups(terrain)
        .iter()
        .map(|group| Ok((*group, activity_level(*group, month)?)))
        .collect()
}

/// Animals from `animals` that might be met on `trail`, in input order.
///
/// Candidate groups come from the trail's topic, plus birds when birds
/// have been spotted and mammals and predators when wild animals are
/// possible.
#[must_use]
pub fn match_animals<'a>(trail: &Trail, animals: &'a [Animal]) -> Vec<&'a Animal> {
    use AnimalGroup::{Amphibian, Bird, Fish, Insect, Mammal, Marine, Predator};

    let mut groups: Vec<AnimalGroup> = match trail.topic() {
        Topic::Mountain => vec![Mammal, Predator, Bird],
        Topic::Forest => vec![Mammal, Bird, Insect],
        Topic::Lake => vec![Fish, Bird],
        Topic::River => vec![Amphibian, Fish],
        Topic::Beach => vec![Marine, Bird],
    };
    if trail.is_bird_spotted() {
        groups.push(Bird);
    }
    if trail.is_wild_animal_possible() {
        groups.extend([Predator, Mammal]);
    }
    animals
        .iter()
        .filter(|animal| groups.contains(&animal.group()))
        .collect()
}
