//! Focused unit tests covering command configuration and output.

use super::helpers::{DatasetDir, output_json, ranked_names};
use super::*;
use animal::{AnimalArgs, AnimalConfig, run_animal_with};
use filter::{FilterArgs, FilterConfig, run_filter_with};
use geo::Coord;
use recommend::{RecommendArgs, RecommendConfig, run_recommend_with};
use rstest::rstest;
use search::{SearchArgs, SearchConfig, run_search_with};
use trailhead_core::geography::BOSTON;
use trailhead_core::{AnimalGroup, Difficulty, Topic, UserPreference};

fn expect_missing(err: CliError, expected_field: &str, expected_env: &str) {
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_filter_without_dataset_errors() {
    let err = FilterConfig::try_from(FilterArgs::default()).expect_err("dataset is required");
    expect_missing(err, ARG_DATASET, ENV_FILTER_DATASET);
}

#[rstest]
fn filter_flags_only_narrow_when_set() {
    let args = FilterArgs {
        dataset: Some("trails.json".into()),
        pet: true,
        ..FilterArgs::default()
    };
    let config = FilterConfig::try_from(args).expect("config should build");
    assert_eq!(config.filter.pet_friendly, Some(true));
    assert_eq!(config.filter.camping, None);
    assert_eq!(config.filter.wildlife, None);
}

#[rstest]
#[case(None, Some("trails.json"), ARG_SEARCH_KEYWORD, ENV_SEARCH_KEYWORD)]
#[case(Some("ridge"), None, ARG_DATASET, ENV_SEARCH_DATASET)]
fn converting_search_without_required_fields_errors(
    #[case] keyword: Option<&str>,
    #[case] dataset: Option<&str>,
    #[case] field: &'static str,
    #[case] env: &'static str,
) {
    let args = SearchArgs {
        keyword: keyword.map(str::to_owned),
        dataset: dataset.map(Into::into),
        limit: None,
    };
    let err = SearchConfig::try_from(args).expect_err("missing field should error");
    expect_missing(err, field, env);
}

#[rstest]
#[case(None, Some(5), ARG_ANIMAL_GROUP, ENV_ANIMAL_GROUP)]
#[case(Some(AnimalGroup::Bird), None, ARG_ANIMAL_MONTH, ENV_ANIMAL_MONTH)]
fn converting_animal_without_required_fields_errors(
    #[case] group: Option<AnimalGroup>,
    #[case] month: Option<u8>,
    #[case] field: &'static str,
    #[case] env: &'static str,
) {
    let args = AnimalArgs {
        dataset: Some("trails.json".into()),
        group,
        month,
        top_k: None,
    };
    let err = AnimalConfig::try_from(args).expect_err("missing field should error");
    expect_missing(err, field, env);
}

#[rstest]
fn recommend_defaults_to_an_open_preference_in_boston() {
    let args = RecommendArgs {
        dataset: Some("trails.json".into()),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(config.preference, UserPreference::unconstrained());
    assert_eq!(config.preference.location, BOSTON);
    assert_eq!(config.top_k, 5);
    assert!(!config.nearby);
}

#[rstest]
fn recommend_reads_longitude_and_latitude() {
    let args = RecommendArgs {
        dataset: Some("trails.json".into()),
        lat: Some(44.0),
        lon: Some(-71.5),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(config.preference.location, Coord { x: -71.5, y: 44.0 });
}

#[rstest]
#[case(Some(42.0), None)]
#[case(None, Some(-71.0))]
fn recommend_rejects_half_a_location(#[case] lat: Option<f64>, #[case] lon: Option<f64>) {
    let args = RecommendArgs {
        dataset: Some("trails.json".into()),
        lat,
        lon,
        ..RecommendArgs::default()
    };
    let err = RecommendConfig::try_from(args).expect_err("half a location is invalid");
    match err {
        CliError::IncompleteLocation => {}
        other => panic!("expected IncompleteLocation, found {other:?}"),
    }
}

#[rstest]
fn filter_prints_matching_names_in_catalogue_order() {
    let dir = DatasetDir::new();
    let args = FilterArgs {
        dataset: Some(dir.write_scenario()),
        topic: Some(Topic::Mountain),
        ..FilterArgs::default()
    };
    let mut buffer = Vec::new();
    run_filter_with(args, &mut buffer).expect("filter should succeed");
    let names: Vec<String> =
        serde_json::from_value(output_json(&buffer)).expect("filter prints names");
    assert_eq!(names, ["Ridge Run", "Summit Scramble"]);
}

#[rstest]
fn filter_combines_constraints() {
    let dir = DatasetDir::new();
    let args = FilterArgs {
        dataset: Some(dir.write_scenario()),
        pet: true,
        max_length: Some(3.0),
        ..FilterArgs::default()
    };
    let mut buffer = Vec::new();
    run_filter_with(args, &mut buffer).expect("filter should succeed");
    let names: Vec<String> =
        serde_json::from_value(output_json(&buffer)).expect("filter prints names");
    assert_eq!(names, ["Pond Loop"]);
}

#[rstest]
fn search_ranks_the_named_trail_first() {
    let dir = DatasetDir::new();
    let args = SearchArgs {
        keyword: Some("ridge".to_owned()),
        dataset: Some(dir.write_scenario()),
        limit: None,
    };
    let mut buffer = Vec::new();
    run_search_with(args, &mut buffer).expect("search should succeed");
    let output = output_json(&buffer);
    assert_eq!(ranked_names(&output), ["Ridge Run"]);
    assert!(output[0]["score"].as_f64().expect("score") > 0.0);
}

#[rstest]
fn recommend_prints_the_best_match() {
    let dir = DatasetDir::new();
    let args = RecommendArgs {
        dataset: Some(dir.write_scenario()),
        target_length: Some(5.0),
        difficulty: Some(Difficulty::Moderate),
        topic: Some(Topic::Mountain),
        top_k: Some(1),
        ..RecommendArgs::default()
    };
    let mut buffer = Vec::new();
    run_recommend_with(args, &mut buffer).expect("recommend should succeed");
    assert_eq!(ranked_names(&output_json(&buffer)), ["Ridge Run"]);
}

#[rstest]
fn nearby_recommendation_puts_the_far_summit_last() {
    let dir = DatasetDir::new();
    let args = RecommendArgs {
        dataset: Some(dir.write_scenario()),
        top_k: Some(3),
        nearby: true,
        ..RecommendArgs::default()
    };
    let mut buffer = Vec::new();
    run_recommend_with(args, &mut buffer).expect("recommend should succeed");
    let names = ranked_names(&output_json(&buffer));
    assert_eq!(names.len(), 3);
    assert_eq!(names.last().map(String::as_str), Some("Summit Scramble"));
}

#[rstest]
fn animal_ranking_lists_the_animals_of_the_group() {
    let dir = DatasetDir::new();
    let args = AnimalArgs {
        dataset: Some(dir.write_scenario()),
        group: Some(AnimalGroup::Bird),
        month: Some(6),
        top_k: None,
    };
    let mut buffer = Vec::new();
    run_animal_with(args, &mut buffer).expect("animal ranking should succeed");
    let output = output_json(&buffer);
    assert_eq!(
        ranked_names(&output),
        ["Pond Loop", "Ridge Run", "Summit Scramble"]
    );
    assert_eq!(output[0]["animals"], serde_json::json!(["Common Loon"]));
}

#[rstest]
fn animal_ranking_honours_top_k() {
    let dir = DatasetDir::new();
    let args = AnimalArgs {
        dataset: Some(dir.write_scenario()),
        group: Some(AnimalGroup::Bird),
        month: Some(6),
        top_k: Some(1),
    };
    let mut buffer = Vec::new();
    run_animal_with(args, &mut buffer).expect("animal ranking should succeed");
    assert_eq!(ranked_names(&output_json(&buffer)), ["Pond Loop"]);
}

#[rstest]
fn animal_ranking_rejects_an_impossible_month() {
    let dir = DatasetDir::new();
    let args = AnimalArgs {
        dataset: Some(dir.write_scenario()),
        group: Some(AnimalGroup::Bird),
        month: Some(13),
        top_k: None,
    };
    let mut buffer = Vec::new();
    let err = run_animal_with(args, &mut buffer).expect_err("month 13 is invalid");
    match err {
        CliError::AnimalScore(_) => {}
        other => panic!("expected AnimalScore, found {other:?}"),
    }
    assert!(buffer.is_empty());
}
