//! Animal command implementation for the Trailhead CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use trailhead_core::AnimalGroup;
use trailhead_recommend::{AnimalTrailScorer, match_animals};

use crate::dataset::{Catalogue, load_catalogue};
use crate::output::{RankedTrail, write_json};
use crate::{
    ARG_ANIMAL_GROUP, ARG_ANIMAL_MONTH, ARG_DATASET, CliError, ENV_ANIMAL_DATASET,
    ENV_ANIMAL_GROUP, ENV_ANIMAL_MONTH,
};

/// CLI arguments for the `animal` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank every trail by the chance of meeting an animal group \
                 in a given month. Each trail lists the dataset animals of \
                 that group that might be met there.",
    about = "Rank trails for meeting an animal group"
)]
#[ortho_config(prefix = "TRAILHEAD")]
pub(crate) struct AnimalArgs {
    /// Path to the JSON trail dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Animal group (mammal, bird, reptile, amphibian, fish, insect, marine, predator).
    #[arg(long = ARG_ANIMAL_GROUP, value_name = "group")]
    #[serde(default)]
    pub(crate) group: Option<AnimalGroup>,
    /// Month of the visit, 1 for January through 12 for December.
    #[arg(long = ARG_ANIMAL_MONTH, value_name = "month")]
    #[serde(default)]
    pub(crate) month: Option<u8>,
    /// Number of trails to print; all of them when omitted or zero.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
}

impl AnimalArgs {
    pub(crate) fn into_config(self) -> Result<AnimalConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnimalConfig::try_from(merged)
    }
}

/// Resolved `animal` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnimalConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) group: AnimalGroup,
    pub(crate) month: u8,
    pub(crate) top_k: Option<usize>,
}

impl TryFrom<AnimalArgs> for AnimalConfig {
    type Error = CliError;

    fn try_from(args: AnimalArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_ANIMAL_DATASET,
        })?;
        let group = args.group.ok_or(CliError::MissingArgument {
            field: ARG_ANIMAL_GROUP,
            env: ENV_ANIMAL_GROUP,
        })?;
        let month = args.month.ok_or(CliError::MissingArgument {
            field: ARG_ANIMAL_MONTH,
            env: ENV_ANIMAL_MONTH,
        })?;
        Ok(Self {
            dataset,
            group,
            month,
            top_k: args.top_k.filter(|count| *count > 0),
        })
    }
}

pub(crate) fn run_animal_with(args: AnimalArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = load_catalogue(&config.dataset)?;
    write_json(writer, &rank_for_animal(&catalogue, &config)?)
}

/// Trails ranked for `config.group` in `config.month`, best first.
pub(crate) fn rank_for_animal(
    catalogue: &Catalogue,
    config: &AnimalConfig,
) -> Result<Vec<RankedTrail>, CliError> {
    let scorer = AnimalTrailScorer::new();
    let mut ranked = scorer.recommend_trails_for_animal(
        config.group,
        config.month,
        &catalogue.trails(),
    )?;
    if let Some(count) = config.top_k {
        ranked.truncate(count);
    }
    Ok(ranked
        .iter()
        .map(|pick| {
            let mut entry = RankedTrail::new(pick.trail.name(), pick.score);
            entry.animals = match_animals(&pick.trail, &catalogue.animals)
                .into_iter()
                .filter(|animal| animal.group() == config.group)
                .map(|animal| animal.name().to_owned())
                .collect();
            entry
        })
        .collect())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AnimalConfig, CliError> {
    let merged = AnimalArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AnimalConfig::try_from(merged)
}
