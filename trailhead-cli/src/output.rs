//! JSON rendering of command answers.

use std::io::Write;

use serde::Serialize;

use crate::CliError;

/// A trail name with the score that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RankedTrail {
    pub(crate) name: String,
    pub(crate) score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) animals: Vec<String>,
}

impl RankedTrail {
    pub(crate) fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            animals: Vec::new(),
        }
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
