//! Command-line interface for querying a Trailhead trail dataset.
//!
//! Every command loads a JSON dataset of trails and animals, runs one query
//! against the in-memory indexes and prints the answer as pretty JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod animal;
mod dataset;
mod error;
mod filter;
mod output;
mod recommend;
mod search;

pub use error::CliError;

use animal::AnimalArgs;
use filter::FilterArgs;
use recommend::RecommendArgs;
use search::SearchArgs;

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_SEARCH_KEYWORD: &str = "keyword";
pub(crate) const ARG_ANIMAL_GROUP: &str = "group";
pub(crate) const ARG_ANIMAL_MONTH: &str = "month";
pub(crate) const ENV_FILTER_DATASET: &str = "TRAILHEAD_CMDS_FILTER_DATASET";
pub(crate) const ENV_SEARCH_DATASET: &str = "TRAILHEAD_CMDS_SEARCH_DATASET";
pub(crate) const ENV_SEARCH_KEYWORD: &str = "TRAILHEAD_CMDS_SEARCH_KEYWORD";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "TRAILHEAD_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_ANIMAL_DATASET: &str = "TRAILHEAD_CMDS_ANIMAL_DATASET";
pub(crate) const ENV_ANIMAL_GROUP: &str = "TRAILHEAD_CMDS_ANIMAL_GROUP";
pub(crate) const ENV_ANIMAL_MONTH: &str = "TRAILHEAD_CMDS_ANIMAL_MONTH";

/// Run the Trailhead CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// dataset cannot be loaded, or the answer cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Filter(args) => filter::run_filter_with(args, writer),
        Command::Search(args) => search::run_search_with(args, writer),
        Command::Recommend(args) => recommend::run_recommend_with(args, writer),
        Command::Animal(args) => animal::run_animal_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "trailhead",
    about = "Query a hiking trail dataset from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List trails matching attribute filters.
    Filter(FilterArgs),
    /// Rank trails by name similarity to a keyword.
    Search(SearchArgs),
    /// Recommend trails for a set of preferences.
    Recommend(RecommendArgs),
    /// Rank trails for meeting an animal group in a month.
    Animal(AnimalArgs),
}

#[cfg(test)]
mod tests;
