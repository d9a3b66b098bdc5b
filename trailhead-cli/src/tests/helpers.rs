//! Test helpers for writing dataset files into a scratch directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Scratch directory holding a dataset file.
pub(super) struct DatasetDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DatasetDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn path(&self) -> Utf8PathBuf {
        self.root.join("trails.json")
    }

    /// Write `payload` as the dataset file and return its path.
    pub(super) fn write(&self, payload: &Value) -> Utf8PathBuf {
        let path = self.path();
        let text = serde_json::to_string_pretty(payload).expect("serialise dataset");
        write_utf8(&path, text.as_bytes());
        path
    }

    /// Write the three-trail scenario dataset and return its path.
    pub(super) fn write_scenario(&self) -> Utf8PathBuf {
        self.write(&scenario_dataset())
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// An easy lake loop, a moderate mountain trail and a hard summit, with a
/// handful of animals.
pub(super) fn scenario_dataset() -> Value {
    json!({
        "trails": [
            {
                "name": "Pond Loop",
                "topic": "lake",
                "difficulty": "easy",
                "length": 2.0,
                "visit_hours": 1.0,
                "elevation_gain": 40.0,
                "lat": 42.44,
                "lon": -71.34,
                "pet_friendly": true,
                "bird_spotted": true
            },
            {
                "name": "Ridge Run",
                "topic": "mountain",
                "difficulty": "moderate",
                "length": 5.0,
                "visit_hours": 3.0,
                "elevation_gain": 1200.0,
                "lat": 42.21,
                "lon": -71.11,
                "pet_friendly": true,
                "wildlife": true
            },
            {
                "name": "Summit Scramble",
                "topic": "mountain",
                "difficulty": "hard",
                "length": 9.0,
                "visit_hours": 6.5,
                "elevation_gain": 3200.0,
                "lat": 44.27,
                "lon": -71.30,
                "camping": true,
                "wildlife": true,
                "icy": true
            }
        ],
        "animals": [
            { "id": 1, "name": "Common Loon", "group": "bird", "habitat": "lakes", "active_months": [4, 5, 6, 7, 8, 9] },
            { "id": 2, "name": "Moose", "group": "mammal", "habitat": "boreal forest" },
            { "id": 3, "name": "Brook Trout", "group": "fish", "habitat": "cold streams" },
            { "id": 4, "name": "Black Bear", "group": "predator", "habitat": "mixed forest" }
        ]
    })
}

/// Decode command output as JSON.
pub(super) fn output_json(buffer: &[u8]) -> Value {
    let text = std::str::from_utf8(buffer).expect("stdout utf-8");
    serde_json::from_str(text).expect("output should be JSON")
}

/// Trail names from a JSON array of `{name, score}` objects.
pub(super) fn ranked_names(output: &Value) -> Vec<String> {
    output
        .as_array()
        .expect("ranked output is an array")
        .iter()
        .map(|entry| entry["name"].as_str().expect("name is a string").to_owned())
        .collect()
}
