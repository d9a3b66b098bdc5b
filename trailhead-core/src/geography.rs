//! Great-circle distance and static coordinate tables.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
//! tables are fixed lookups, not a geocoder.

use geo::Coord;

use crate::trail::Topic;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Downtown Boston, the default user location.
pub const BOSTON: Coord<f64> = Coord {
    x: -71.0589,
    y: 42.3601,
};

/// Map framing for a terrain: where to centre and how far to zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainView {
    /// Centre of the terrain's showcase region.
    pub centre: Coord<f64>,
    /// Web-map zoom level.
    pub zoom: u8,
}

/// Haversine distance in miles between two coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailhead_core::geography::{haversine_miles, BOSTON};
///
/// assert_eq!(haversine_miles(BOSTON, BOSTON), 0.0);
/// let common = Coord { x: -71.065, y: 42.355 };
/// assert!(haversine_miles(BOSTON, common) < 1.0);
/// ```
pub fn haversine_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_d_lat = (b.y - a.y).to_radians() / 2.0;
    let half_d_lon = (b.x - a.x).to_radians() / 2.0;
    let h = half_d_lat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_d_lon.sin().powi(2);
    EARTH_RADIUS_MILES * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Showcase framing for `terrain`.
pub fn terrain_view(terrain: Topic) -> TerrainView {
    let (lat, lon, zoom) = match terrain {
        Topic::Forest => (42.520, -71.350, 11),
        Topic::Lake => (43.800, -71.200, 11),
        Topic::River => (42.450, -71.100, 12),
        Topic::Mountain => (44.160, -71.500, 10),
        Topic::Beach => (42.410, -70.990, 12),
    };
    TerrainView {
        centre: Coord { x: lon, y: lat },
        zoom,
    }
}

const SPOTS: [(&str, f64, f64); 5] = [
    ("Blue Hills Reservation", 42.216, -71.114),
    ("Middlesex Fells", 42.466, -71.120),
    ("Horn Pond", 42.45, -71.15),
    ("Boston Common", 42.355, -71.065),
    ("Mystic River", 42.40, -71.10),
];

/// Coordinates of a named wildlife spot, matched case-insensitively.
///
/// Returns `None` for names not in the table.
pub fn spot_location(name: &str) -> Option<Coord<f64>> {
    let wanted = name.trim();
    SPOTS
        .iter()
        .find(|(spot, _, _)| spot.eq_ignore_ascii_case(wanted))
        .map(|&(_, lat, lon)| Coord { x: lon, y: lat })
}
