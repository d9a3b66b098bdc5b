//! Error types emitted by the Trailhead CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use trailhead_core::{AnimalError, TrailError};
use trailhead_recommend::AnimalScoreError;

/// Errors emitted by the Trailhead CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one of latitude and longitude was given.
    #[error("--lat and --lon must be given together")]
    IncompleteLocation,
    /// The dataset path does not exist.
    #[error("dataset path {path:?} does not exist")]
    MissingDataset {
        /// Path that was looked up.
        path: Utf8PathBuf,
    },
    /// The dataset path exists but is not a regular file.
    #[error("dataset path {path:?} exists but is not a file")]
    DatasetNotFile {
        /// Path that was looked up.
        path: Utf8PathBuf,
    },
    /// Opening or inspecting the dataset failed.
    #[error("failed to open dataset at {path:?}: {source}")]
    OpenDataset {
        /// Path that was opened.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Dataset JSON could not be decoded.
    #[error("failed to parse dataset JSON at {path:?}: {source}")]
    ParseDataset {
        /// Path that was parsed.
        path: Utf8PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A trail record failed validation.
    #[error("trail record '{name}' is invalid: {source}")]
    InvalidTrail {
        /// Name given in the record.
        name: String,
        /// Validation failure.
        #[source]
        source: TrailError,
    },
    /// An animal record failed validation.
    #[error("animal record '{name}' is invalid: {source}")]
    InvalidAnimal {
        /// Name given in the record.
        name: String,
        /// Validation failure.
        #[source]
        source: AnimalError,
    },
    /// Animal scoring rejected the request.
    #[error(transparent)]
    AnimalScore(#[from] AnimalScoreError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
