//! Loading the JSON trail and animal dataset shared by every command.

use std::io::BufReader;
use std::sync::Arc;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use geo::Coord;
use serde::{Deserialize, Serialize};
use trailhead_core::{Animal, AnimalGroup, Difficulty, Topic, Trail, TrailIndex};

use crate::CliError;

/// One trail as written in the dataset file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct TrailRecord {
    pub(crate) name: String,
    pub(crate) topic: Topic,
    pub(crate) difficulty: Difficulty,
    #[serde(default)]
    pub(crate) park: String,
    #[serde(default)]
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) length: f64,
    #[serde(default)]
    pub(crate) visit_hours: f64,
    #[serde(default)]
    pub(crate) elevation_gain: f64,
    #[serde(default)]
    pub(crate) lat: f64,
    #[serde(default)]
    pub(crate) lon: f64,
    #[serde(default)]
    pub(crate) pet_friendly: bool,
    #[serde(default)]
    pub(crate) camping: bool,
    #[serde(default)]
    pub(crate) bird_spotted: bool,
    #[serde(default)]
    pub(crate) wildlife: bool,
    #[serde(default)]
    pub(crate) icy: bool,
}

impl TryFrom<TrailRecord> for Trail {
    type Error = CliError;

    fn try_from(record: TrailRecord) -> Result<Self, Self::Error> {
        Self::builder(record.name.clone(), record.topic, record.difficulty)
            .park(record.park)
            .state(record.state)
            .length(record.length)
            .visit_hours(record.visit_hours)
            .elevation_gain(record.elevation_gain)
            .location(Coord {
                x: record.lon,
                y: record.lat,
            })
            .pet_friendly(record.pet_friendly)
            .camping(record.camping)
            .bird_spotted(record.bird_spotted)
            .wildlife(record.wildlife)
            .icy(record.icy)
            .build()
            .map_err(|source| CliError::InvalidTrail {
                name: record.name,
                source,
            })
    }
}

/// One animal as written in the dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct AnimalRecord {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) group: AnimalGroup,
    #[serde(default)]
    pub(crate) habitat: String,
    #[serde(default)]
    pub(crate) active_months: Vec<u8>,
}

impl TryFrom<AnimalRecord> for Animal {
    type Error = CliError;

    fn try_from(record: AnimalRecord) -> Result<Self, Self::Error> {
        let invalid = |source| CliError::InvalidAnimal {
            name: record.name.clone(),
            source,
        };
        Self::new(record.id, record.name.clone(), record.group)
            .and_then(|animal| animal.with_active_months(record.active_months.iter().copied()))
            .map(|animal| animal.with_habitat(record.habitat.clone()))
            .map_err(invalid)
    }
}

/// Raw dataset file contents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct DatasetFile {
    pub(crate) trails: Vec<TrailRecord>,
    pub(crate) animals: Vec<AnimalRecord>,
}

/// Validated dataset ready for querying.
#[derive(Debug)]
pub(crate) struct Catalogue {
    pub(crate) index: TrailIndex,
    pub(crate) animals: Vec<Animal>,
}

impl Catalogue {
    /// Trails in catalogue order.
    pub(crate) fn trails(&self) -> Vec<Arc<Trail>> {
        self.index.all().to_vec()
    }
}

impl TryFrom<DatasetFile> for Catalogue {
    type Error = CliError;

    fn try_from(file: DatasetFile) -> Result<Self, Self::Error> {
        let trails = file
            .trails
            .into_iter()
            .map(Trail::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let animals = file
            .animals
            .into_iter()
            .map(Animal::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            index: TrailIndex::from_trails(trails),
            animals,
        })
    }
}

/// Open, decode and validate the dataset at `path`.
pub(crate) fn load_catalogue(path: &Utf8Path) -> Result<Catalogue, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CliError::MissingDataset {
                path: path.to_path_buf(),
            }
        } else {
            CliError::OpenDataset {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let metadata = file.metadata().map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(CliError::DatasetNotFile {
            path: path.to_path_buf(),
        });
    }
    let raw: DatasetFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseDataset {
            path: path.to_path_buf(),
            source,
        })?;
    Catalogue::try_from(raw)
}
