//! Preference-driven trail recommendation with progressive relaxation.
//!
//! A request walks an ordered list of [`RelaxationBand`]s, each admitting a
//! superset of the previous one, and stops at the first band that yields
//! enough trails. The survivors are then ranked by a weighted blend of
//! preference match, distance from the user and intrinsic trail quality.

use std::sync::Arc;

use log::debug;
use trailhead_core::collections::{BoundedHeap, SeqList};
use trailhead_core::geography::haversine_miles;
use trailhead_core::{Trail, TrailIndex, UserPreference};

use crate::config::RecommenderConfig;
use crate::error::ConfigError;

const LENGTH_TIERS: ([f64; 3], [f64; 4]) = ([2.0, 5.0, 8.0], [0.2, 0.4, 0.6, 0.8]);
const VISIT_HOUR_TIERS: ([f64; 3], [f64; 4]) = ([2.0, 4.0, 6.0], [0.2, 0.4, 0.6, 0.8]);
const ELEVATION_TIERS: ([f64; 3], [f64; 4]) = ([500.0, 1500.0, 3000.0], [1.0, 0.8, 0.6, 0.4]);

/// Step of the relaxation sequence, from strictest to loosest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelaxationStage {
    /// Every condition must match exactly.
    Strict,
    /// The wildlife wish is dropped.
    IgnoreWildlife,
    /// Wildlife and camping wishes are dropped.
    IgnoreCamping,
    /// Every feature wish is dropped.
    IgnoreFeatures,
    /// Feature wishes dropped and the length tolerance widened.
    WidenLength,
    /// Difficulty may differ by a number of ranks; length is loose.
    WidenDifficulty,
    /// Every trail qualifies.
    Everything,
}

/// One step of the relaxation sequence with its tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationBand {
    /// Which conditions the band enforces.
    pub stage: RelaxationStage,
    /// Largest accepted distance, in miles, between trail and target length.
    pub length_tolerance: f64,
    /// Largest accepted difficulty-rank distance.
    pub difficulty_tolerance: u8,
}

impl RelaxationBand {
    /// The band admitting every trail.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            stage: RelaxationStage::Everything,
            length_tolerance: f64::INFINITY,
            difficulty_tolerance: u8::MAX,
        }
    }

    /// Report whether the band lets `trail` through for `preference`.
    ///
    /// Feature wishes that are still enforced must equal the trail's flag
    /// exactly, so a `false` wish excludes trails offering the feature.
    #[must_use]
    pub fn admits(&self, trail: &Trail, preference: &UserPreference) -> bool {
        use RelaxationStage::{
            Everything, IgnoreCamping, IgnoreFeatures, IgnoreWildlife, WidenDifficulty,
        };

        if self.stage == Everything {
            return true;
        }
        let topic_ok = preference.topic.is_none_or(|topic| trail.topic() == topic);
        let length_ok = target_length(preference)
            .is_none_or(|target| within(trail.length(), target, self.length_tolerance));
        if self.stage == WidenDifficulty {
            let difficulty_ok = preference.difficulty.is_none_or(|wanted| {
                trail.difficulty().rank_distance(wanted) <= self.difficulty_tolerance
            });
            return topic_ok && difficulty_ok && length_ok;
        }

        let difficulty_ok = preference
            .difficulty
            .is_none_or(|wanted| trail.difficulty() == wanted);
        let pet_ok = self.stage >= IgnoreFeatures || trail.is_pet_friendly() == preference.pet_friendly;
        let camp_ok = self.stage >= IgnoreCamping || trail.is_camping_allowed() == preference.camping;
        let wildlife_ok =
            self.stage >= IgnoreWildlife || trail.is_wild_animal_possible() == preference.wildlife;
        difficulty_ok && topic_ok && length_ok && pet_ok && camp_ok && wildlife_ok
    }
}

/// Outcome of [`TrailRecommender::progressive_filter`].
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// The band that produced `trails`.
    pub band: RelaxationBand,
    /// Trails admitted by the band, in catalogue order.
    pub trails: Vec<Arc<Trail>>,
}

/// A trail paired with the score that ranked it.
#[derive(Debug, Clone)]
pub struct ScoredTrail {
    /// The ranked trail.
    pub trail: Arc<Trail>,
    /// Ranking score; higher is better.
    pub score: f64,
}

/// Recommends trails from a catalogue snapshot.
///
/// # Examples
/// ```
/// use trailhead_core::{Difficulty, Topic, Trail, TrailIndex, UserPreference};
/// use trailhead_recommend::TrailRecommender;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let index = TrailIndex::from_trails([
///     Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy).length(2.0).build()?,
///     Trail::builder("Ridge Run", Topic::Mountain, Difficulty::Moderate).length(5.0).build()?,
/// ]);
/// let recommender = TrailRecommender::new(&index);
/// let picks = recommender.recommend(&UserPreference::default(), 1);
/// assert_eq!(picks[0].trail.name(), "Ridge Run");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrailRecommender {
    trails: SeqList<Arc<Trail>>,
    config: RecommenderConfig,
}

impl TrailRecommender {
    /// Snapshot the trails currently held by `index`.
    #[must_use]
    pub fn new(index: &TrailIndex) -> Self {
        Self::from_trails(index.all().iter().cloned())
    }

    /// Build a recommender over an explicit trail list.
    #[must_use]
    pub fn from_trails<I, T>(trails: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Trail>>,
    {
        Self {
            trails: trails.into_iter().map(Into::into).collect(),
            config: RecommenderConfig::default(),
        }
    }

    /// Replace the tuning constants.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] reported by
    /// [`RecommenderConfig::validate`].
    pub fn with_config(mut self, config: RecommenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Tuning constants in use.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Number of trails in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Report whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// The filtering bands tried before falling back to every trail.
    #[must_use]
    pub fn bands(&self) -> Vec<RelaxationBand> {
        let relaxation = &self.config.relaxation;
        let strict = relaxation.strict_length_tolerance;
        let mut bands: Vec<RelaxationBand> = [
            RelaxationStage::Strict,
            RelaxationStage::IgnoreWildlife,
            RelaxationStage::IgnoreCamping,
            RelaxationStage::IgnoreFeatures,
        ]
        .into_iter()
        .map(|stage| RelaxationBand {
            stage,
            length_tolerance: strict,
            difficulty_tolerance: 0,
        })
        .collect();
        bands.extend(relaxation.length_tolerances.iter().map(|tolerance| RelaxationBand {
            stage: RelaxationStage::WidenLength,
            length_tolerance: *tolerance,
            difficulty_tolerance: 0,
        }));
        bands.extend(
            relaxation
                .difficulty_tolerances
                .iter()
                .map(|tolerance| RelaxationBand {
                    stage: RelaxationStage::WidenDifficulty,
                    length_tolerance: relaxation.difficulty_length_tolerance,
                    difficulty_tolerance: *tolerance,
                }),
        );
        bands
    }

    /// Trails of the snapshot admitted by `band`.
    #[must_use]
    pub fn band_matches(&self, band: &RelaxationBand, preference: &UserPreference) -> Vec<Arc<Trail>> {
        self.trails
            .iter()
            .filter(|trail| band.admits(trail, preference))
            .cloned()
            .collect()
    }

    /// Trails matching every condition exactly within the strict length
    /// tolerance.
    #[must_use]
    pub fn strict_filter(&self, preference: &UserPreference) -> Vec<Arc<Trail>> {
        let band = RelaxationBand {
            stage: RelaxationStage::Strict,
            length_tolerance: self.config.relaxation.strict_length_tolerance,
            difficulty_tolerance: 0,
        };
        self.band_matches(&band, preference)
    }

    /// Loosen conditions band by band until at least `top_k` trails match.
    ///
    /// When no band produces enough trails the whole snapshot is returned
    /// under [`RelaxationStage::Everything`].
    #[must_use]
    pub fn progressive_filter(&self, preference: &UserPreference, top_k: usize) -> Relaxation {
        for band in self.bands() {
            let trails = self.band_matches(&band, preference);
            if trails.len() >= top_k {
                debug!(
                    "relaxation satisfied by {:?} band with {} trails",
                    band.stage,
                    trails.len()
                );
                return Relaxation { band, trails };
            }
        }
        debug!("no relaxation band reached {top_k} trails; using the whole catalogue");
        Relaxation {
            band: RelaxationBand::everything(),
            trails: self.trails.to_vec(),
        }
    }

    /// Relax, then rank the survivors by [`TrailRecommender::final_score`].
    ///
    /// Returns at most `top_k` trails, best first; nothing when `top_k` is
    /// zero.
    #[must_use]
    pub fn recommend(&self, preference: &UserPreference, top_k: usize) -> Vec<ScoredTrail> {
        if top_k == 0 {
            return Vec::new();
        }
        let relaxation = self.progressive_filter(preference, top_k);
        self.rank(relaxation.trails, preference, top_k)
    }

    /// Rank the strict matches when there are enough of them, otherwise
    /// fall back to progressive relaxation.
    #[must_use]
    pub fn personal_recommend(&self, preference: &UserPreference, top_k: usize) -> Vec<ScoredTrail> {
        if top_k == 0 {
            return Vec::new();
        }
        let strict = self.strict_filter(preference);
        if strict.len() >= top_k {
            debug!("strict filter alone produced {} trails", strict.len());
            return self.rank(strict, preference, top_k);
        }
        self.recommend(preference, top_k)
    }

    /// Favour trails close to the user, ranked by
    /// [`TrailRecommender::nearby_score`].
    ///
    /// A preference located exactly at `(0, 0)` is treated as having no
    /// location and delegates to [`TrailRecommender::personal_recommend`].
    #[must_use]
    pub fn nearby_popular_recommend(
        &self,
        preference: &UserPreference,
        top_k: usize,
    ) -> Vec<ScoredTrail> {
        if preference.has_unknown_location() {
            return self.personal_recommend(preference, top_k);
        }
        if top_k == 0 {
            return Vec::new();
        }
        let target = self.config.nearby.candidate_target(top_k);
        let candidates = self.progressive_filter(preference, target).trails;
        let max_preference = candidates
            .iter()
            .map(|trail| preference_match(trail, preference))
            .fold(0.0, f64::max);

        let mut heap = BoundedHeap::with_bound(top_k, |a: &ScoredTrail, b: &ScoredTrail| {
            a.score.total_cmp(&b.score)
        });
        for trail in candidates {
            let score = self.nearby_score(&trail, preference, max_preference);
            let _rejected = heap.offer(ScoredTrail { trail, score });
        }
        let mut ranked = heap.into_sorted_vec();
        ranked.reverse();
        ranked
    }

    /// Band score of the great-circle distance between user and trail.
    #[must_use]
    pub fn distance_band(&self, trail: &Trail, preference: &UserPreference) -> f64 {
        self.config
            .distance
            .score(haversine_miles(preference.location, trail.location()))
    }

    /// Weighted blend of preference match, distance band and intrinsic
    /// quality.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "final ranking is a weighted sum of floating point scores"
    )]
    pub fn final_score(&self, trail: &Trail, preference: &UserPreference) -> f64 {
        let weights = &self.config.weights;
        weights.preference * preference_match(trail, preference)
            + weights.distance * self.distance_band(trail, preference)
            + weights.intrinsic * intrinsic_quality(trail)
    }

    /// Distance-led score with preference normalised by `max_preference`.
    ///
    /// A non-positive `max_preference` contributes no preference term.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "nearby ranking is a weighted sum of floating point scores"
    )]
    pub fn nearby_score(&self, trail: &Trail, preference: &UserPreference, max_preference: f64) -> f64 {
        let weights = &self.config.nearby;
        let normalised = if max_preference > 0.0 {
            preference_match(trail, preference) / max_preference
        } else {
            0.0
        };
        weights.distance * self.distance_band(trail, preference) + weights.preference * normalised
    }

    fn rank(&self, trails: Vec<Arc<Trail>>, preference: &UserPreference, top_k: usize) -> Vec<ScoredTrail> {
        let mut scored: SeqList<ScoredTrail> = trails
            .into_iter()
            .map(|trail| ScoredTrail {
                score: self.final_score(&trail, preference),
                trail,
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.into_iter().take(top_k).collect()
    }
}

/// How well `trail` matches `preference`, from 0 to 6.2.
///
/// Length closeness contributes up to 3 when a positive target is set,
/// difficulty closeness 2 for an exact match and 1 for a neighbouring rank,
/// a matching topic 1.2, and each wished-for feature the trail offers 0.6
/// (pets, camping) or 0.8 (wildlife).
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "preference match accumulates floating point bonuses"
)]
pub fn preference_match(trail: &Trail, preference: &UserPreference) -> f64 {
    let mut score = 0.0;
    if let Some(target) = target_length(preference) {
        let gap = (trail.length() - target).abs();
        score += (1.0 - gap / 10.0).max(0.0) * 3.0;
    }
    if let Some(wanted) = preference.difficulty {
        score += match trail.difficulty().rank_distance(wanted) {
            0 => 2.0,
            1 => 1.0,
            _ => 0.0,
        };
    }
    if preference.topic == Some(trail.topic()) {
        score += 1.2;
    }
    if preference.pet_friendly && trail.is_pet_friendly() {
        score += 0.6;
    }
    if preference.camping && trail.is_camping_allowed() {
        score += 0.6;
    }
    if preference.wildlife && trail.is_wild_animal_possible() {
        score += 0.8;
    }
    score
}

/// Convenience of a trail regardless of the user, from 0.2 to 0.8.
///
/// Averages tiered scores for length, visit duration and elevation gain;
/// longer and slower trails score higher, steeper ones lower.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "intrinsic quality averages three tier scores"
)]
pub fn intrinsic_quality(trail: &Trail) -> f64 {
    let total = tier(trail.length(), LENGTH_TIERS)
        + tier(trail.visit_hours(), VISIT_HOUR_TIERS)
        + tier(trail.elevation_gain(), ELEVATION_TIERS);
    total / 3.0
}

fn tier(value: f64, (limits, scores): ([f64; 3], [f64; 4])) -> f64 {
    let [.., beyond] = scores;
    limits
        .into_iter()
        .zip(scores)
        .find(|(limit, _)| value < *limit)
        .map_or(beyond, |(_, score)| score)
}

fn target_length(preference: &UserPreference) -> Option<f64> {
    preference.target_length.filter(|miles| *miles > 0.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "length tolerance compares an absolute difference"
)]
fn within(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}
