//! Tunable constants for trail recommendation, group ranking and animal
//! scoring.
//!
//! The defaults reproduce the thresholds the rankings were calibrated
//! with. Every struct validates itself so a deserialised configuration
//! cannot carry negative weights or narrowing tolerance bands.

use crate::error::ConfigError;

/// Tolerances walked by
/// [`TrailRecommender::progressive_filter`](crate::TrailRecommender::progressive_filter).
///
/// Each successive band must admit at least the trails of the previous
/// one, so tolerances only ever widen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelaxationConfig {
    /// Length tolerance, in miles, while feature wishes are still honoured.
    pub strict_length_tolerance: f64,
    /// Length tolerances tried once every feature wish is dropped.
    pub length_tolerances: Vec<f64>,
    /// Difficulty-rank distances tried after the length tolerances.
    pub difficulty_tolerances: Vec<u8>,
    /// Length tolerance applied alongside the difficulty tolerances.
    pub difficulty_length_tolerance: f64,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            strict_length_tolerance: 0.5,
            length_tolerances: vec![1.0, 2.0, 3.0, 5.0],
            difficulty_tolerances: vec![0, 1, 2],
            difficulty_length_tolerance: 5.0,
        }
    }
}

impl RelaxationConfig {
    /// Check that every tolerance is usable and that the bands widen.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a negative or non-finite
    /// tolerance and [`ConfigError::Unordered`] when a later band would be
    /// narrower than an earlier one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("strict_length_tolerance", self.strict_length_tolerance)?;
        for tolerance in &self.length_tolerances {
            non_negative("length_tolerances", *tolerance)?;
        }
        non_negative(
            "difficulty_length_tolerance",
            self.difficulty_length_tolerance,
        )?;

        let mut lengths = Vec::with_capacity(self.length_tolerances.len() + 2);
        lengths.push(self.strict_length_tolerance);
        lengths.extend_from_slice(&self.length_tolerances);
        lengths.push(self.difficulty_length_tolerance);
        if !lengths.windows(2).all(|pair| matches!(pair, [a, b] if a <= b)) {
            return Err(ConfigError::Unordered {
                field: "length_tolerances",
            });
        }
        if !self
            .difficulty_tolerances
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a <= b))
        {
            return Err(ConfigError::Unordered {
                field: "difficulty_tolerances",
            });
        }
        Ok(())
    }
}

/// Weights of the three factors in a trail's final recommendation score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinalScoreWeights {
    /// Multiplier for the preference match.
    pub preference: f64,
    /// Multiplier for the distance band.
    pub distance: f64,
    /// Multiplier for the intrinsic quality.
    pub intrinsic: f64,
}

impl Default for FinalScoreWeights {
    fn default() -> Self {
        Self {
            preference: 0.45,
            distance: 0.35,
            intrinsic: 0.20,
        }
    }
}

impl FinalScoreWeights {
    /// Check that the weights are non-negative and not all zero.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] or [`ConfigError::ZeroWeights`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("final.preference", self.preference)?;
        non_negative("final.distance", self.distance)?;
        non_negative("final.intrinsic", self.intrinsic)?;
        non_zero_total("final", &[self.preference, self.distance, self.intrinsic])
    }
}

/// Blend and candidate sizing for the nearby-popular recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NearbyWeights {
    /// Multiplier for the distance band.
    pub distance: f64,
    /// Multiplier for the normalised preference match.
    pub preference: f64,
    /// Candidates gathered per requested result.
    pub candidate_multiplier: usize,
    /// Smallest candidate pool gathered regardless of the request.
    pub min_candidates: usize,
}

impl Default for NearbyWeights {
    fn default() -> Self {
        Self {
            distance: 0.8,
            preference: 0.2,
            candidate_multiplier: 2,
            min_candidates: 10,
        }
    }
}

impl NearbyWeights {
    /// Check that the weights are non-negative and not all zero.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] or [`ConfigError::ZeroWeights`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("nearby.distance", self.distance)?;
        non_negative("nearby.preference", self.preference)?;
        non_zero_total("nearby", &[self.distance, self.preference])
    }

    /// Number of candidates to gather for `top_k` results.
    #[must_use]
    pub fn candidate_target(&self, top_k: usize) -> usize {
        top_k
            .saturating_mul(self.candidate_multiplier)
            .max(self.min_candidates)
    }
}

/// One step of the distance scoring ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceBand {
    /// Inclusive upper bound of the band, in miles.
    pub max_miles: f64,
    /// Score awarded inside the band.
    pub score: f64,
}

/// Bucketed scoring of the distance between user and trail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DistanceBands {
    /// Bands in ascending order of `max_miles`.
    pub bands: Vec<DistanceBand>,
    /// Score beyond the last band.
    pub beyond: f64,
}

impl Default for DistanceBands {
    fn default() -> Self {
        let band = |max_miles, score| DistanceBand { max_miles, score };
        Self {
            bands: vec![
                band(30.0, 1.0),
                band(60.0, 0.8),
                band(120.0, 0.6),
                band(200.0, 0.4),
            ],
            beyond: 0.2,
        }
    }
}

impl DistanceBands {
    /// Score for a distance in miles.
    ///
    /// # Examples
    /// ```
    /// use trailhead_recommend::DistanceBands;
    ///
    /// let bands = DistanceBands::default();
    /// assert_eq!(bands.score(30.0), 1.0);
    /// assert_eq!(bands.score(30.1), 0.8);
    /// assert_eq!(bands.score(500.0), 0.2);
    /// ```
    #[must_use]
    pub fn score(&self, miles: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| miles <= band.max_miles)
            .map_or(self.beyond, |band| band.score)
    }

    /// Check that bands ascend and scores lie in `0.0..=1.0`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unusable bound,
    /// [`ConfigError::Unordered`] for descending bands and
    /// [`ConfigError::BandScoreOutOfRange`] for an out-of-range score.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for band in &self.bands {
            non_negative("distance.max_miles", band.max_miles)?;
            unit_score(band.score)?;
        }
        unit_score(self.beyond)?;
        if self
            .bands
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.max_miles < b.max_miles))
        {
            Ok(())
        } else {
            Err(ConfigError::Unordered {
                field: "distance.bands",
            })
        }
    }
}

/// Full configuration of a [`TrailRecommender`](crate::TrailRecommender).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommenderConfig {
    /// Relaxation tolerances.
    pub relaxation: RelaxationConfig,
    /// Final score blend.
    pub weights: FinalScoreWeights,
    /// Nearby-popular blend.
    pub nearby: NearbyWeights,
    /// Distance scoring ladder.
    pub distance: DistanceBands,
}

impl RecommenderConfig {
    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] raised by a section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relaxation.validate()?;
        self.weights.validate()?;
        self.nearby.validate()?;
        self.distance.validate()
    }
}

/// Coefficients of the group ranking formula
/// `ln(1 + remaining) × remaining_slots + difficulty / (1 + rank)
/// + visit_hours / (1 + hours) + party_fits_bonus`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroupScoreWeights {
    /// Multiplier for the logarithm of free places.
    pub remaining_slots: f64,
    /// Numerator of the difficulty term.
    pub difficulty: f64,
    /// Numerator of the visit-duration term.
    pub visit_hours: f64,
    /// Bonus when the requested party fits.
    pub party_fits_bonus: f64,
}

impl Default for GroupScoreWeights {
    fn default() -> Self {
        Self {
            remaining_slots: 20.0,
            difficulty: 30.0,
            visit_hours: 30.0,
            party_fits_bonus: 10.0,
        }
    }
}

impl GroupScoreWeights {
    /// Check that every coefficient is non-negative.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unusable coefficient.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("group.remaining_slots", self.remaining_slots)?;
        non_negative("group.difficulty", self.difficulty)?;
        non_negative("group.visit_hours", self.visit_hours)?;
        non_negative("group.party_fits_bonus", self.party_fits_bonus)
    }
}

/// Coefficients of the animal-to-trail score
/// `eco × ecology + season × activity + difficulty − risk`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimalScoreWeights {
    /// Ecology score when the group lives in the trail's terrain.
    pub associated: f64,
    /// Ecology score otherwise.
    pub unassociated: f64,
    /// Multiplier for the ecology score.
    pub ecology: f64,
    /// Multiplier for the seasonal activity level.
    pub season: f64,
    /// Penalty for non-predators on terrain that hosts predators.
    pub predator_risk: f64,
}

impl Default for AnimalScoreWeights {
    fn default() -> Self {
        Self {
            associated: 3.0,
            unassociated: 0.5,
            ecology: 1.5,
            season: 1.2,
            predator_risk: 1.5,
        }
    }
}

impl AnimalScoreWeights {
    /// Check that every coefficient is non-negative.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an unusable coefficient.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("animal.associated", self.associated)?;
        non_negative("animal.unassociated", self.unassociated)?;
        non_negative("animal.ecology", self.ecology)?;
        non_negative("animal.season", self.season)?;
        non_negative("animal.predator_risk", self.predator_risk)
    }
}

const fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn unit_score(value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BandScoreOutOfRange { value })
    }
}

fn non_zero_total(field: &'static str, weights: &[f64]) -> Result<(), ConfigError> {
    if weights.iter().any(|weight| *weight > 0.0) {
        Ok(())
    } else {
        Err(ConfigError::ZeroWeights { field })
    }
}
