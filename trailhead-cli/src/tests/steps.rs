//! Behaviour-driven step definitions driving whole command invocations.

use super::helpers::{DatasetDir, output_json, ranked_names};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct CommandWorld {
    dir: DatasetDir,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            dir: DatasetDir::new(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, extra: &[&str]) {
        let mut argv = vec!["trailhead".to_owned()];
        argv.extend(extra.iter().map(|arg| (*arg).to_owned()));
        argv.extend([format!("--{ARG_DATASET}"), self.dir.path().into_string()]);
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::from)
            .and_then(|cli| {
                let mut buffer = self.stdout.borrow_mut();
                dispatch(cli.command, &mut *buffer)
            });
        self.result.replace(Some(outcome));
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn printed_names(&self) -> Vec<String> {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success");
        let output = output_json(&self.stdout.borrow());
        if output.get(0).is_some_and(serde_json::Value::is_string) {
            serde_json::from_value(output).expect("names are strings")
        } else {
            ranked_names(&output)
        }
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("the scenario dataset exists on disk")]
fn scenario_dataset_exists(#[from(world)] world: &CommandWorld) {
    world.dir.write_scenario();
}

#[given("no dataset exists on disk")]
fn no_dataset_exists(#[from(world)] world: &CommandWorld) {
    let _ = world;
}

#[when("I run the filter command for mountain trails")]
fn run_filter_for_mountains(#[from(world)] world: &CommandWorld) {
    world.run(&["filter", "--topic", "mountain"]);
}

#[when("I run the filter command for volcano trails")]
fn run_filter_for_volcanoes(#[from(world)] world: &CommandWorld) {
    world.run(&["filter", "--topic", "volcano"]);
}

#[when("I ask for one moderate five mile mountain trail")]
fn run_recommend_for_ridge(#[from(world)] world: &CommandWorld) {
    world.run(&[
        "recommend",
        "--target-length",
        "5",
        "--difficulty",
        "moderate",
        "--topic",
        "mountain",
        "--top-k",
        "1",
    ]);
}

#[then("the command prints Ridge Run then Summit Scramble")]
fn prints_mountain_trails(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.printed_names(), ["Ridge Run", "Summit Scramble"]);
}

#[then("the command prints only Ridge Run")]
fn prints_only_the_ridge(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.printed_names(), ["Ridge Run"]);
}

#[then("the command fails because the dataset is missing")]
fn fails_on_missing_dataset(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::MissingDataset { .. } => {}
        other => panic!("expected MissingDataset, found {other:?}"),
    }
}

#[then("the command fails during argument parsing")]
fn fails_during_parsing(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::ArgumentParsing(_) => {}
        other => panic!("expected ArgumentParsing, found {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/trailhead_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(filter_lists_mountains, "listing mountain trails");
register_command_scenario!(recommend_picks_the_ridge, "recommending a moderate mountain trail");
register_command_scenario!(missing_dataset_is_rejected, "rejecting a missing dataset");
register_command_scenario!(unknown_topic_is_rejected, "rejecting an unknown topic");
