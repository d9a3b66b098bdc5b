//! Name search command implementation for the Trailhead CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use trailhead_core::{DEFAULT_SEARCH_LIMIT, NameSearchIndex};

use crate::dataset::{Catalogue, load_catalogue};
use crate::output::{RankedTrail, write_json};
use crate::{ARG_DATASET, ARG_SEARCH_KEYWORD, CliError, ENV_SEARCH_DATASET, ENV_SEARCH_KEYWORD};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank trails by how closely their names match a keyword. \
                 Exact names score highest, then prefixes, substrings and \
                 shared words.",
    about = "Search trails by name"
)]
#[ortho_config(prefix = "TRAILHEAD")]
pub(crate) struct SearchArgs {
    /// Keyword to look for in trail names.
    #[arg(value_name = "keyword")]
    #[serde(default)]
    pub(crate) keyword: Option<String>,
    /// Path to the JSON trail dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Maximum number of hits to print.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) keyword: String,
    pub(crate) limit: usize,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let keyword = args.keyword.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH_KEYWORD,
            env: ENV_SEARCH_KEYWORD,
        })?;
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_SEARCH_DATASET,
        })?;
        Ok(Self {
            dataset,
            keyword,
            limit: args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        })
    }
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = load_catalogue(&config.dataset)?;
    write_json(writer, &search_names(&catalogue, &config.keyword, config.limit))
}

/// Trails ranked by name similarity, best first.
pub(crate) fn search_names(catalogue: &Catalogue, keyword: &str, limit: usize) -> Vec<RankedTrail> {
    let mut names = NameSearchIndex::new();
    for trail in catalogue.trails() {
        names.add(trail);
    }
    names
        .search(keyword, limit)
        .into_iter()
        .filter_map(|hit| {
            names
                .get(hit.id)
                .map(|trail| RankedTrail::new(trail.name(), hit.score))
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
