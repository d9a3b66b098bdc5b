//! Wildlife records plus the static ecology tables used to score them.
//!
//! Terrain is expressed with [`Topic`]: every trail topic names the terrain
//! of the same name.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::collections::SeqList;
use crate::error::{AnimalError, ParseEnumError};
use crate::trail::Topic;

/// Broad ecological grouping of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnimalGroup {
    /// Land mammals.
    Mammal,
    /// Birds.
    Bird,
    /// Reptiles.
    Reptile,
    /// Amphibians.
    Amphibian,
    /// Freshwater fish.
    Fish,
    /// Insects.
    Insect,
    /// Coastal and marine life.
    Marine,
    /// Large predators.
    Predator,
}

// Activity 0..=3 per month, January first.
const BIRD_SEASON: [u8; 12] = [1, 1, 2, 3, 3, 3, 2, 2, 2, 1, 1, 1];
const INSECT_SEASON: [u8; 12] = [0, 0, 1, 2, 3, 3, 3, 3, 2, 1, 0, 0];
const YEAR_ROUND_SEASON: [u8; 12] = [2; 12];
const AMPHIBIAN_SEASON: [u8; 12] = [0, 1, 2, 3, 3, 2, 2, 1, 0, 0, 0, 0];
const REPTILE_SEASON: [u8; 12] = [0, 0, 1, 2, 3, 3, 3, 2, 1, 0, 0, 0];
const FISH_SEASON: [u8; 12] = [1, 1, 2, 3, 3, 3, 2, 2, 1, 1, 1, 1];
const MARINE_SEASON: [u8; 12] = [1, 1, 1, 2, 3, 3, 3, 3, 2, 2, 1, 1];

impl AnimalGroup {
    /// Every group.
    pub const ALL: [Self; 8] = [
        Self::Mammal,
        Self::Bird,
        Self::Reptile,
        Self::Amphibian,
        Self::Fish,
        Self::Insect,
        Self::Marine,
        Self::Predator,
    ];

    /// Return the group as a lowercase `&str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mammal => "mammal",
            Self::Bird => "bird",
            Self::Reptile => "reptile",
            Self::Amphibian => "amphibian",
            Self::Fish => "fish",
            Self::Insect => "insect",
            Self::Marine => "marine",
            Self::Predator => "predator",
        }
    }

    /// Terrain the group is most often found in.
    pub fn default_terrain(self) -> Topic {
        match self {
            Self::Mammal | Self::Bird | Self::Reptile | Self::Insect => Topic::Forest,
            Self::Amphibian => Topic::River,
            Self::Fish => Topic::Lake,
            Self::Marine => Topic::Beach,
            Self::Predator => Topic::Mountain,
        }
    }

    /// Seasonal activity (0 dormant to 3 peak) in `month`.
    ///
    /// Returns `None` when `month` is outside `1..=12`.
    ///
    /// # Examples
    /// ```
    /// use trailhead_core::AnimalGroup;
    ///
    /// assert_eq!(AnimalGroup::Insect.activity_level(1), Some(0));
    /// assert_eq!(AnimalGroup::Insect.activity_level(7), Some(3));
    /// assert_eq!(AnimalGroup::Insect.activity_level(13), None);
    /// ```
    pub fn activity_level(self, month: u8) -> Option<u8> {
        let table = match self {
            Self::Bird => &BIRD_SEASON,
            Self::Insect => &INSECT_SEASON,
            Self::Mammal | Self::Predator => &YEAR_ROUND_SEASON,
            Self::Amphibian => &AMPHIBIAN_SEASON,
            Self::Reptile => &REPTILE_SEASON,
            Self::Fish => &FISH_SEASON,
            Self::Marine => &MARINE_SEASON,
        };
        table.get(usize::from(month).checked_sub(1)?).copied()
    }
}

impl std::fmt::Display for AnimalGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalGroup {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| ParseEnumError::new("animal group", s))
    }
}

/// Animal groups ecologically associated with a terrain.
pub fn terrain_groups(terrain: Topic) -> &'static [AnimalGroup] {
    use AnimalGroup::{Amphibian, Bird, Fish, Insect, Mammal, Marine, Predator};
    match terrain {
        Topic::Forest => &[Bird, Mammal, Insect],
        Topic::Mountain => &[Mammal, Predator, Bird],
        Topic::River => &[Fish, Amphibian, Bird, Mammal, Insect],
        Topic::Lake => &[Fish, Bird, Insect, Amphibian],
        Topic::Beach => &[Marine, Bird, Insect],
    }
}

/// A species record with its seasonal activity window.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    id: u32,
    name: String,
    group: AnimalGroup,
    habitat: String,
    description: String,
    preferred_terrain: Topic,
    active_months: BTreeSet<u8>,
    active_days: BTreeSet<u8>,
    recent_sightings: SeqList<String>,
}

impl Animal {
    /// Create an animal with no activity window.
    ///
    /// The preferred terrain starts as the group's default terrain.
    ///
    /// # Errors
    /// Returns [`AnimalError::BlankName`] when `name` is blank.
    pub fn new(id: u32, name: impl Into<String>, group: AnimalGroup) -> Result<Self, AnimalError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AnimalError::BlankName);
        }
        Ok(Self {
            id,
            name,
            group,
            habitat: String::new(),
            description: String::new(),
            preferred_terrain: group.default_terrain(),
            active_months: BTreeSet::new(),
            active_days: BTreeSet::new(),
            recent_sightings: SeqList::new(),
        })
    }

    /// Set the habitat text.
    #[must_use]
    pub fn with_habitat(mut self, habitat: impl Into<String>) -> Self {
        self.habitat = habitat.into();
        self
    }

    /// Set the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Override the preferred terrain.
    #[must_use]
    pub fn with_preferred_terrain(mut self, terrain: Topic) -> Self {
        self.preferred_terrain = terrain;
        self
    }

    /// Set the months (1..=12) the animal is active in.
    ///
    /// # Errors
    /// Returns [`AnimalError::InvalidMonth`] for the first month outside range.
    pub fn with_active_months<I>(mut self, months: I) -> Result<Self, AnimalError>
    where
        I: IntoIterator<Item = u8>,
    {
        self.active_months = collect_in_range(months, 12, AnimalError::InvalidMonth)?;
        Ok(self)
    }

    /// Set the days of the month (1..=30) the animal is typically seen on.
    ///
    /// # Errors
    /// Returns [`AnimalError::InvalidDay`] for the first day outside range.
    pub fn with_active_days<I>(mut self, days: I) -> Result<Self, AnimalError>
    where
        I: IntoIterator<Item = u8>,
    {
        self.active_days = collect_in_range(days, 30, AnimalError::InvalidDay)?;
        Ok(self)
    }

    /// Set the recent sighting locations, most recent first.
    #[must_use]
    pub fn with_recent_sightings<I, S>(mut self, spots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recent_sightings = spots.into_iter().map(Into::into).collect();
        self
    }

    /// Identifier.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Common name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ecological group.
    pub fn group(&self) -> AnimalGroup {
        self.group
    }

    /// Habitat text.
    pub fn habitat(&self) -> &str {
        &self.habitat
    }

    /// Description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Preferred terrain.
    pub fn preferred_terrain(&self) -> Topic {
        self.preferred_terrain
    }

    /// Active months in ascending order.
    pub fn active_months(&self) -> impl Iterator<Item = u8> + '_ {
        self.active_months.iter().copied()
    }

    /// Active days in ascending order.
    pub fn active_days(&self) -> impl Iterator<Item = u8> + '_ {
        self.active_days.iter().copied()
    }

    /// Recent sighting locations.
    pub fn recent_sightings(&self) -> &SeqList<String> {
        &self.recent_sightings
    }

    /// Report whether the animal is active in `month`.
    pub fn is_active_in(&self, month: u8) -> bool {
        self.active_months.contains(&month)
    }

    /// Report whether the animal is active on `day` of `month`.
    ///
    /// An animal without recorded days counts as active every day of its
    /// active months.
    pub fn is_active_on(&self, month: u8, day: u8) -> bool {
        self.is_active_in(month) && (self.active_days.is_empty() || self.active_days.contains(&day))
    }
}

impl std::fmt::Display for Animal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.group)
    }
}

fn collect_in_range<I>(values: I, max: u8, error: fn(u8) -> AnimalError) -> Result<BTreeSet<u8>, AnimalError>
where
    I: IntoIterator<Item = u8>,
{
    values
        .into_iter()
        .map(|value| {
            if (1..=max).contains(&value) {
                Ok(value)
            } else {
                Err(error(value))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AnimalGroup::Bird, 4, 3)]
    #[case(AnimalGroup::Amphibian, 12, 0)]
    #[case(AnimalGroup::Predator, 1, 2)]
    #[case(AnimalGroup::Marine, 9, 2)]
    fn seasonality_table_lookups(#[case] group: AnimalGroup, #[case] month: u8, #[case] level: u8) {
        assert_eq!(group.activity_level(month), Some(level));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn seasonality_rejects_bad_months(#[case] month: u8) {
        assert_eq!(AnimalGroup::Fish.activity_level(month), None);
    }

    #[rstest]
    fn terrain_groups_cover_every_topic() {
        for topic in Topic::ALL {
            assert!(!terrain_groups(topic).is_empty());
        }
        assert!(terrain_groups(Topic::Mountain).contains(&AnimalGroup::Predator));
        assert!(!terrain_groups(Topic::Lake).contains(&AnimalGroup::Predator));
    }

    #[rstest]
    fn activity_window_checks() {
        let heron = Animal::new(1, "Heron", AnimalGroup::Bird)
            .and_then(|a| a.with_active_months([4, 5, 6]))
            .and_then(|a| a.with_active_days([1, 15]))
            .expect("valid animal");
        assert!(heron.is_active_in(5));
        assert!(!heron.is_active_in(1));
        assert!(heron.is_active_on(5, 15));
        assert!(!heron.is_active_on(5, 16));
        assert_eq!(heron.preferred_terrain(), Topic::Forest);
    }

    #[rstest]
    fn empty_day_list_means_every_day() {
        let frog = Animal::new(2, "Frog", AnimalGroup::Amphibian)
            .and_then(|a| a.with_active_months([5]))
            .expect("valid animal");
        assert!(frog.is_active_on(5, 29));
    }

    #[rstest]
    fn invalid_months_and_days_are_rejected() {
        let base = Animal::new(3, "Moth", AnimalGroup::Insect).expect("valid animal");
        assert_eq!(
            base.clone().with_active_months([3, 13]).err(),
            Some(AnimalError::InvalidMonth(13))
        );
        assert_eq!(base.with_active_days([31]).err(), Some(AnimalError::InvalidDay(31)));
        assert_eq!(Animal::new(4, " ", AnimalGroup::Fish).err(), Some(AnimalError::BlankName));
    }
}
