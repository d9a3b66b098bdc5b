//! Shared test harness modules for the Trailhead CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod dataset_unit;
mod helpers;
mod steps;
mod unit;
