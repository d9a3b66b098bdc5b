//! Filter command implementation for the Trailhead CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;
use trailhead_core::{Difficulty, Topic, Trail, TrailFilter};

use crate::dataset::{Catalogue, load_catalogue};
use crate::output::write_json;
use crate::{ARG_DATASET, CliError, ENV_FILTER_DATASET};

/// CLI arguments for the `filter` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List every trail in the dataset that satisfies all of the \
                 given constraints. Boolean flags only narrow the result when \
                 set; omitting one leaves that attribute unconstrained.",
    about = "List trails matching attribute filters"
)]
#[ortho_config(prefix = "TRAILHEAD")]
pub(crate) struct FilterArgs {
    /// Path to the JSON trail dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Keep only trails of this difficulty (easy, moderate, hard).
    #[arg(long, value_name = "level")]
    #[serde(default)]
    pub(crate) difficulty: Option<Difficulty>,
    /// Keep only trails of this topic (lake, beach, forest, mountain, river).
    #[arg(long, value_name = "topic")]
    #[serde(default)]
    pub(crate) topic: Option<Topic>,
    /// Keep only trails at most this many miles long.
    #[arg(long, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_length: Option<f64>,
    /// Keep only trails visited in at most this many hours.
    #[arg(long, value_name = "hours")]
    #[serde(default)]
    pub(crate) max_visit_hours: Option<f64>,
    /// Keep only pet-friendly trails.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) pet: bool,
    /// Keep only trails that allow camping.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) camping: bool,
    /// Keep only trails with a chance of wildlife.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) wildlife: bool,
}

impl FilterArgs {
    pub(crate) fn into_config(self) -> Result<FilterConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FilterConfig::try_from(merged)
    }
}

/// Resolved `filter` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) filter: TrailFilter,
}

impl TryFrom<FilterArgs> for FilterConfig {
    type Error = CliError;

    fn try_from(args: FilterArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_FILTER_DATASET,
        })?;
        let wanted = |flag: bool| flag.then_some(true);
        Ok(Self {
            dataset,
            filter: TrailFilter {
                difficulty: args.difficulty,
                max_length: args.max_length,
                pet_friendly: wanted(args.pet),
                camping: wanted(args.camping),
                topic: args.topic,
                wildlife: wanted(args.wildlife),
                max_visit_hours: args.max_visit_hours,
            },
        })
    }
}

pub(crate) fn run_filter_with(args: FilterArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = load_catalogue(&config.dataset)?;
    write_json(writer, &filter_names(&catalogue, &config.filter))
}

/// Names of matching trails in catalogue order.
pub(crate) fn filter_names(catalogue: &Catalogue, filter: &TrailFilter) -> Vec<String> {
    let mut matches: Vec<Arc<Trail>> = catalogue.index.filter(filter).into_iter().collect();
    matches.sort_by(|left, right| left.catalog_cmp(right));
    matches
        .iter()
        .map(|trail| trail.name().to_owned())
        .collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<FilterConfig, CliError> {
    let merged = FilterArgs::merge_from_layers(layers).map_err(CliError::from)?;
    FilterConfig::try_from(merged)
}
