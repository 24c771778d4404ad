use geo::Point;
use serde::{Deserialize, Serialize};

/// Decimal places kept in output coordinates.
pub const COORDINATE_PRECISION: usize = 6;

/// Rounds on the exact decimal expansion, so `2.6750005` stays `2.675`.
fn round_to_precision(value: f64) -> f64 {
    format!("{:.*}", COORDINATE_PRECISION, value)
        .parse()
        .unwrap_or(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// Build from a `(lon, lat)` point, rounding both components.
    pub fn from_point_rounded(point: Point<f64>) -> Self {
        Self {
            longitude: round_to_precision(point.x()),
            latitude: round_to_precision(point.y()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO alpha-2 code, or the source name when no code could be resolved.
    pub country_code: String,
    pub country_name: String,
    pub coordinates: Coordinates,
}

/// The output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryCoordinates {
    pub countries: Vec<CountryRecord>,
}
