//! Unit tests for dataset loading and record validation.

use super::helpers::{DatasetDir, write_utf8};
use super::*;
use dataset::load_catalogue;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn scenario_dataset_loads_trails_and_animals() {
    let dir = DatasetDir::new();
    let catalogue = load_catalogue(&dir.write_scenario()).expect("dataset should load");
    assert_eq!(catalogue.index.len(), 3);
    assert_eq!(catalogue.animals.len(), 4);
    let ridge = catalogue
        .index
        .get_by_name("Ridge Run")
        .expect("ridge is indexed");
    assert!(ridge.is_pet_friendly());
    assert!(ridge.is_wild_animal_possible());
    assert!(!ridge.is_camping_allowed());
}

#[rstest]
fn optional_record_fields_take_defaults() {
    let dir = DatasetDir::new();
    let path = dir.write(&json!({
        "trails": [{ "name": "Bare Path", "topic": "forest", "difficulty": "easy" }]
    }));
    let catalogue = load_catalogue(&path).expect("dataset should load");
    let trails = catalogue.trails();
    let [trail] = trails.as_slice() else {
        panic!("expected one trail, found {}", trails.len());
    };
    assert_eq!(trail.length(), 0.0);
    assert!(!trail.is_pet_friendly());
    assert!(catalogue.animals.is_empty());
}

#[rstest]
fn duplicate_trails_are_loaded_once() {
    let dir = DatasetDir::new();
    let path = dir.write(&json!({
        "trails": [
            { "name": "Pond Loop", "topic": "lake", "difficulty": "easy", "length": 2.0 },
            { "name": "Pond Loop", "topic": "lake", "difficulty": "easy", "length": 2.0 }
        ]
    }));
    let catalogue = load_catalogue(&path).expect("dataset should load");
    assert_eq!(catalogue.index.len(), 1);
}

#[rstest]
fn missing_dataset_is_reported() {
    let dir = DatasetDir::new();
    let err = load_catalogue(&dir.path()).expect_err("no file was written");
    match err {
        CliError::MissingDataset { path } => assert_eq!(path, dir.path()),
        other => panic!("expected MissingDataset, found {other:?}"),
    }
}

#[rstest]
fn directory_dataset_is_rejected() {
    let dir = DatasetDir::new();
    let err = load_catalogue(dir.root()).expect_err("directories are not datasets");
    match err {
        CliError::DatasetNotFile { .. } => {}
        other => panic!("expected DatasetNotFile, found {other:?}"),
    }
}

#[rstest]
fn malformed_json_is_reported() {
    let dir = DatasetDir::new();
    write_utf8(&dir.path(), b"{ not valid json");
    let err = load_catalogue(&dir.path()).expect_err("malformed JSON");
    match err {
        CliError::ParseDataset { .. } => {}
        other => panic!("expected ParseDataset, found {other:?}"),
    }
}

#[rstest]
fn invalid_trail_records_name_the_trail() {
    let dir = DatasetDir::new();
    let path = dir.write(&json!({
        "trails": [{ "name": "Backwards", "topic": "river", "difficulty": "easy", "length": -1.0 }]
    }));
    let err = load_catalogue(&path).expect_err("negative length is invalid");
    match err {
        CliError::InvalidTrail { name, .. } => assert_eq!(name, "Backwards"),
        other => panic!("expected InvalidTrail, found {other:?}"),
    }
}

#[rstest]
fn invalid_animal_records_name_the_animal() {
    let dir = DatasetDir::new();
    let path = dir.write(&json!({
        "animals": [{ "id": 9, "name": "Snow Goose", "group": "bird", "active_months": [13] }]
    }));
    let err = load_catalogue(&path).expect_err("month 13 is invalid");
    match err {
        CliError::InvalidAnimal { name, .. } => assert_eq!(name, "Snow Goose"),
        other => panic!("expected InvalidAnimal, found {other:?}"),
    }
}
