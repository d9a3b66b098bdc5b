//! Trail fixtures shared by unit, behaviour and downstream crate tests.

use geo::Coord;

use crate::trail::{Difficulty, Topic, Trail, TrailBuilder};

/// Builder pre-filled with a name, category and length.
pub fn trail_builder(name: &str, topic: Topic, difficulty: Difficulty, length: f64) -> TrailBuilder {
    Trail::builder(name, topic, difficulty).length(length)
}

/// Minimal trail with only a name, category and length.
///
/// # Panics
/// Panics when `length` is negative or not finite.
pub fn trail(name: &str, topic: Topic, difficulty: Difficulty, length: f64) -> Trail {
    trail_builder(name, topic, difficulty, length)
        .build()
        .expect("fixture trail is valid")
}

/// The three-trail scenario: an easy two-mile lake loop, a moderate
/// five-mile mountain trail and a hard nine-mile mountain trail.
pub fn scenario_trails() -> Vec<Trail> {
    vec![
        trail_builder("Pond Loop", Topic::Lake, Difficulty::Easy, 2.0)
            .visit_hours(1.0)
            .elevation_gain(40.0)
            .location(Coord { x: -71.34, y: 42.44 })
            .pet_friendly(true)
            .bird_spotted(true)
            .build()
            .expect("fixture trail is valid"),
        trail_builder("Ridge Run", Topic::Mountain, Difficulty::Moderate, 5.0)
            .visit_hours(3.0)
            .elevation_gain(1200.0)
            .location(Coord { x: -71.11, y: 42.21 })
            .pet_friendly(true)
            .wildlife(true)
            .build()
            .expect("fixture trail is valid"),
        trail_builder("Summit Scramble", Topic::Mountain, Difficulty::Hard, 9.0)
            .visit_hours(6.5)
            .elevation_gain(3200.0)
            .location(Coord { x: -71.30, y: 44.27 })
            .camping(true)
            .wildlife(true)
            .icy(true)
            .build()
            .expect("fixture trail is valid"),
    ]
}

/// A small New England catalogue spanning every topic and difficulty.
pub fn sample_trails() -> Vec<Trail> {
    let rows: [(&str, &str, Topic, Difficulty, f64, f64, f64, f64, f64, [bool; 4]); 10] = [
        ("Walden Pond Path", "Walden Pond", Topic::Lake, Difficulty::Easy, 1.7, 1.0, 30.0, 42.439, -71.338, [true, false, true, false]),
        ("Skyline Trail", "Blue Hills Reservation", Topic::Mountain, Difficulty::Hard, 9.0, 6.0, 2100.0, 42.212, -71.114, [false, false, true, true]),
        ("Great Blue Hill Loop", "Blue Hills Reservation", Topic::Mountain, Difficulty::Moderate, 3.1, 2.5, 600.0, 42.212, -71.118, [true, false, true, true]),
        ("Charles River Esplanade", "Esplanade", Topic::River, Difficulty::Easy, 3.0, 1.5, 10.0, 42.355, -71.075, [true, false, true, false]),
        ("Middlesex Fells Reservoir", "Middlesex Fells", Topic::Forest, Difficulty::Moderate, 4.5, 2.5, 450.0, 42.446, -71.107, [true, false, true, true]),
        ("Crane Beach Dunes", "Castle Neck", Topic::Beach, Difficulty::Easy, 5.5, 3.0, 80.0, 42.684, -70.765, [false, false, true, false]),
        ("Mount Monadnock White Dot", "Monadnock State Park", Topic::Mountain, Difficulty::Hard, 3.9, 4.0, 1800.0, 42.861, -72.108, [false, true, true, true]),
        ("Franconia Ridge Loop", "Franconia Notch", Topic::Mountain, Difficulty::Hard, 8.6, 7.5, 3800.0, 44.160, -71.644, [false, true, false, true]),
        ("Lost Pond Trail", "Pinkham Notch", Topic::Lake, Difficulty::Moderate, 1.8, 1.5, 200.0, 44.256, -71.252, [true, true, true, false]),
        ("Quabbin Forest Walk", "Quabbin Reservoir", Topic::Forest, Difficulty::Easy, 2.2, 1.5, 150.0, 42.288, -72.334, [true, false, true, true]),
    ];
    rows.into_iter()
        .map(
            |(name, park, topic, difficulty, length, hours, elevation, lat, lon, [pet, camp, bird, wild])| {
                trail_builder(name, topic, difficulty, length)
                    .park(park)
                    .state(if lat > 42.7 && lon < -71.0 { "NH" } else { "MA" })
                    .visit_hours(hours)
                    .elevation_gain(elevation)
                    .location(Coord { x: lon, y: lat })
                    .pet_friendly(pet)
                    .camping(camp)
                    .bird_spotted(bird)
                    .wildlife(wild)
                    .build()
                    .expect("fixture trail is valid")
            },
        )
        .collect()
}
