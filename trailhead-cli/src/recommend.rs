//! Recommend command implementation for the Trailhead CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use trailhead_core::{Difficulty, Topic, UserPreference};
use trailhead_recommend::TrailRecommender;

use crate::dataset::{Catalogue, load_catalogue};
use crate::output::{RankedTrail, write_json};
use crate::{ARG_DATASET, CliError, ENV_RECOMMEND_DATASET};

const DEFAULT_TOP_K: usize = 5;

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend trails for a set of preferences. Constraints are \
                 relaxed step by step until enough trails qualify. With \
                 --nearby, trails close to --lat/--lon (Boston by default) \
                 are favoured.",
    about = "Recommend trails for a set of preferences"
)]
#[ortho_config(prefix = "TRAILHEAD")]
pub(crate) struct RecommendArgs {
    /// Path to the JSON trail dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Desired trail length in miles.
    #[arg(long, value_name = "miles")]
    #[serde(default)]
    pub(crate) target_length: Option<f64>,
    /// Desired difficulty (easy, moderate, hard).
    #[arg(long, value_name = "level")]
    #[serde(default)]
    pub(crate) difficulty: Option<Difficulty>,
    /// Desired topic (lake, beach, forest, mountain, river).
    #[arg(long, value_name = "topic")]
    #[serde(default)]
    pub(crate) topic: Option<Topic>,
    /// Prefer pet-friendly trails.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) pet: bool,
    /// Prefer trails that allow camping.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) camping: bool,
    /// Prefer trails with a chance of wildlife.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) wildlife: bool,
    /// Number of trails to recommend.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Weight trails by distance from the starting point.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) nearby: bool,
    /// Latitude of the starting point.
    #[arg(long, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the starting point.
    #[arg(long, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) preference: UserPreference,
    pub(crate) top_k: usize,
    pub(crate) nearby: bool,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_RECOMMEND_DATASET,
        })?;
        let mut preference = UserPreference::unconstrained()
            .with_target_length(args.target_length)
            .with_difficulty(args.difficulty)
            .with_topic(args.topic)
            .with_pet_friendly(args.pet)
            .with_camping(args.camping)
            .with_wildlife(args.wildlife);
        match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => {
                preference = preference.with_location(Coord { x: lon, y: lat });
            }
            (None, None) => {}
            _ => return Err(CliError::IncompleteLocation),
        }
        Ok(Self {
            dataset,
            preference,
            top_k: args.top_k.unwrap_or(DEFAULT_TOP_K),
            nearby: args.nearby,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = load_catalogue(&config.dataset)?;
    write_json(writer, &recommend_trails(&catalogue, &config))
}

/// Recommended trails, best first.
pub(crate) fn recommend_trails(catalogue: &Catalogue, config: &RecommendConfig) -> Vec<RankedTrail> {
    let recommender = TrailRecommender::new(&catalogue.index);
    let picks = if config.nearby {
        recommender.nearby_popular_recommend(&config.preference, config.top_k)
    } else {
        recommender.personal_recommend(&config.preference, config.top_k)
    };
    picks
        .iter()
        .map(|pick| RankedTrail::new(pick.trail.name(), pick.score))
        .collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
