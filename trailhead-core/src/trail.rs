//! Trail records and their categorical attributes.
//!
//! A [`Trail`] is created once through [`TrailBuilder`] and never mutated.
//! Equality and hashing use the identity tuple (name, park, state,
//! zipcode); [`Trail::catalog_cmp`] provides the (difficulty rank, length)
//! catalogue order.
//!
//! # Examples
//! ```
//! use trailhead_core::{Difficulty, Topic, Trail};
//!
//! let trail = Trail::builder("Pond Loop", Topic::Lake, Difficulty::Easy)
//!     .park("Walden")
//!     .length(2.0)
//!     .build()
//!     .expect("valid trail");
//! assert_eq!(trail.difficulty().rank(), 0);
//! assert_eq!(Topic::Lake.to_string(), "lake");
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use geo::Coord;

use crate::error::{ParseEnumError, TrailError};

/// Dense identifier handed out by indices that track trails by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailId(pub usize);

/// Trail difficulty with an integer rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Rank 0.
    Easy,
    /// Rank 1.
    Moderate,
    /// Rank 2.
    Hard,
}

impl Difficulty {
    /// Every difficulty in rank order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Moderate, Self::Hard];

    /// Integer rank used for closeness and tolerance checks.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Moderate => 1,
            Self::Hard => 2,
        }
    }

    /// Return the difficulty holding `rank`, if any.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|difficulty| difficulty.rank() == rank)
    }

    /// Absolute rank distance between two difficulties.
    pub fn rank_distance(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Return the difficulty as a lowercase `&str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseEnumError::new("difficulty", s)),
        }
    }
}

/// Landscape a trail runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topic {
    /// Summits and ridges.
    Mountain,
    /// Lakes and ponds.
    Lake,
    /// Rivers and streams.
    River,
    /// Coastline.
    Beach,
    /// Woodland.
    Forest,
}

impl Topic {
    /// Every topic.
    pub const ALL: [Self; 5] = [
        Self::Mountain,
        Self::Lake,
        Self::River,
        Self::Beach,
        Self::Forest,
    ];

    /// Return the topic as a lowercase `&str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mountain => "mountain",
            Self::Lake => "lake",
            Self::River => "river",
            Self::Beach => "beach",
            Self::Forest => "forest",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("topic", s))
    }
}

/// Boolean trail features that can be indexed and filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Feature {
    /// Dogs and other pets are allowed.
    PetFriendly,
    /// Camping is permitted.
    Camping,
    /// Birds are commonly spotted.
    Bird,
    /// Wild animals may be encountered.
    Wildlife,
    /// The trail is often icy.
    Icy,
}

impl Feature {
    /// Every feature.
    pub const ALL: [Self; 5] = [
        Self::PetFriendly,
        Self::Camping,
        Self::Bird,
        Self::Wildlife,
        Self::Icy,
    ];

    /// Return the feature as a snake-case `&str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PetFriendly => "pet_friendly",
            Self::Camping => "camping",
            Self::Bird => "bird",
            Self::Wildlife => "wildlife",
            Self::Icy => "icy",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("feature", s))
    }
}

/// Immutable trail record.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`; trails
/// built without a location sit at `(0, 0)`.
#[derive(Debug, Clone)]
pub struct Trail {
    name: String,
    park: String,
    state: String,
    zipcode: String,
    address: String,
    park_area: String,
    alert: String,
    topic: Topic,
    difficulty: Difficulty,
    length: f64,
    visit_hours: f64,
    elevation_gain: f64,
    location: Coord<f64>,
    pet_friendly: bool,
    camping_allowed: bool,
    bird_spotted: bool,
    wild_animal_possible: bool,
    icy: bool,
}

impl Trail {
    /// Start building a trail with its required categorical attributes.
    pub fn builder(name: impl Into<String>, topic: Topic, difficulty: Difficulty) -> TrailBuilder {
        TrailBuilder::new(name, topic, difficulty)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Park the trail belongs to.
    pub fn park(&self) -> &str {
        &self.park
    }

    /// State or province.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Postal code.
    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    /// Street address or area description.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Section of the park.
    pub fn park_area(&self) -> &str {
        &self.park_area
    }

    /// Hazard or maintenance notice, empty when none.
    pub fn alert(&self) -> &str {
        &self.alert
    }

    /// Landscape category.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Difficulty category.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Length in miles.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Typical visit duration in hours.
    pub fn visit_hours(&self) -> f64 {
        self.visit_hours
    }

    /// Elevation gain in feet.
    pub fn elevation_gain(&self) -> f64 {
        self.elevation_gain
    }

    /// Trailhead location.
    pub fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Pets allowed.
    pub fn is_pet_friendly(&self) -> bool {
        self.pet_friendly
    }

    /// Camping permitted.
    pub fn is_camping_allowed(&self) -> bool {
        self.camping_allowed
    }

    /// Birds commonly spotted.
    pub fn is_bird_spotted(&self) -> bool {
        self.bird_spotted
    }

    /// Wild animals may be encountered.
    pub fn is_wild_animal_possible(&self) -> bool {
        self.wild_animal_possible
    }

    /// Often icy.
    pub fn is_icy(&self) -> bool {
        self.icy
    }

    /// Report whether the trail carries `feature`.
    pub fn has_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::PetFriendly => self.pet_friendly,
            Feature::Camping => self.camping_allowed,
            Feature::Bird => self.bird_spotted,
            Feature::Wildlife => self.wild_animal_possible,
            Feature::Icy => self.icy,
        }
    }

    /// Iterate over the features this trail carries.
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.has_feature(*feature))
    }

    /// Catalogue order: difficulty rank first, then length.
    ///
    /// # Examples
    /// ```
    /// use std::cmp::Ordering;
    /// use trailhead_core::{Difficulty, Topic, Trail};
    ///
    /// let easy = Trail::builder("A", Topic::Lake, Difficulty::Easy).length(9.0).build().unwrap();
    /// let hard = Trail::builder("B", Topic::Lake, Difficulty::Hard).length(1.0).build().unwrap();
    /// assert_eq!(easy.catalog_cmp(&hard), Ordering::Less);
    /// ```
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        self.difficulty
            .rank()
            .cmp(&other.difficulty.rank())
            .then_with(|| self.length.total_cmp(&other.length))
    }
}

impl PartialEq for Trail {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.park == other.park
            && self.state == other.state
            && self.zipcode == other.zipcode
    }
}

impl Eq for Trail {}

impl Hash for Trail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.park.hash(state);
        self.state.hash(state);
        self.zipcode.hash(state);
    }
}

impl std::fmt::Display for Trail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - {:.1} mi, {}, elev {:.0} ft, visit {:.1} h",
            self.name, self.difficulty, self.length, self.topic, self.elevation_gain, self.visit_hours
        )
    }
}

/// Validating builder for [`Trail`].
#[derive(Debug, Clone)]
pub struct TrailBuilder {
    trail: Trail,
}

impl TrailBuilder {
    /// Start a builder with every optional attribute empty or zero.
    pub fn new(name: impl Into<String>, topic: Topic, difficulty: Difficulty) -> Self {
        Self {
            trail: Trail {
                name: name.into(),
                park: String::new(),
                state: String::new(),
                zipcode: String::new(),
                address: String::new(),
                park_area: String::new(),
                alert: String::new(),
                topic,
                difficulty,
                length: 0.0,
                visit_hours: 0.0,
                elevation_gain: 0.0,
                location: Coord { x: 0.0, y: 0.0 },
                pet_friendly: false,
                camping_allowed: false,
                bird_spotted: false,
                wild_animal_possible: false,
                icy: false,
            },
        }
    }

    /// Set the park.
    pub fn park(mut self, park: impl Into<String>) -> Self {
        self.trail.park = park.into();
        self
    }

    /// Set the state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.trail.state = state.into();
        self
    }

    /// Set the postal code.
    pub fn zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.trail.zipcode = zipcode.into();
        self
    }

    /// Set the address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.trail.address = address.into();
        self
    }

    /// Set the park area.
    pub fn park_area(mut self, park_area: impl Into<String>) -> Self {
        self.trail.park_area = park_area.into();
        self
    }

    /// Set the alert text.
    pub fn alert(mut self, alert: impl Into<String>) -> Self {
        self.trail.alert = alert.into();
        self
    }

    /// Set the length in miles.
    pub fn length(mut self, miles: f64) -> Self {
        self.trail.length = miles;
        self
    }

    /// Set the visit duration in hours.
    pub fn visit_hours(mut self, hours: f64) -> Self {
        self.trail.visit_hours = hours;
        self
    }

    /// Set the elevation gain in feet.
    pub fn elevation_gain(mut self, feet: f64) -> Self {
        self.trail.elevation_gain = feet;
        self
    }

    /// Set the trailhead location (`x = longitude`, `y = latitude`).
    pub fn location(mut self, location: Coord<f64>) -> Self {
        self.trail.location = location;
        self
    }

    /// Set or clear a feature flag.
    pub fn feature(mut self, feature: Feature, present: bool) -> Self {
        let flag = match feature {
            Feature::PetFriendly => &mut self.trail.pet_friendly,
            Feature::Camping => &mut self.trail.camping_allowed,
            Feature::Bird => &mut self.trail.bird_spotted,
            Feature::Wildlife => &mut self.trail.wild_animal_possible,
            Feature::Icy => &mut self.trail.icy,
        };
        *flag = present;
        self
    }

    /// Shorthand for [`TrailBuilder::feature`] with [`Feature::PetFriendly`].
    pub fn pet_friendly(self, present: bool) -> Self {
        self.feature(Feature::PetFriendly, present)
    }

    /// Shorthand for [`TrailBuilder::feature`] with [`Feature::Camping`].
    pub fn camping(self, present: bool) -> Self {
        self.feature(Feature::Camping, present)
    }

    /// Shorthand for [`TrailBuilder::feature`] with [`Feature::Bird`].
    pub fn bird_spotted(self, present: bool) -> Self {
        self.feature(Feature::Bird, present)
    }

    /// Shorthand for [`TrailBuilder::feature`] with [`Feature::Wildlife`].
    pub fn wildlife(self, present: bool) -> Self {
        self.feature(Feature::Wildlife, present)
    }

    /// Shorthand for [`TrailBuilder::feature`] with [`Feature::Icy`].
    pub fn icy(self, present: bool) -> Self {
        self.feature(Feature::Icy, present)
    }

    /// Validate and produce the trail.
    ///
    /// # Errors
    /// Returns [`TrailError`] when the name is blank, a measurement is
    /// negative or not finite, or the location is outside WGS84 bounds.
    pub fn build(self) -> Result<Trail, TrailError> {
        let trail = self.trail;
        if trail.name.trim().is_empty() {
            return Err(TrailError::BlankName);
        }
        for (field, value) in [
            ("length", trail.length),
            ("visit_hours", trail.visit_hours),
            ("elevation_gain", trail.elevation_gain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TrailError::InvalidMeasurement { field, value });
            }
        }
        let Coord { x: longitude, y: latitude } = trail.location;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(TrailError::InvalidCoordinate { latitude, longitude });
        }
        Ok(trail)
    }
}
