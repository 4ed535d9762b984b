use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One coordinate of a measurement, in WGS84 degrees. Values are stored
/// as-is; nothing enforces the usual latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl PointLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Encodes a point sequence as `lat,lon|lat,lon|...` for interchange with
/// external consumers such as the static-map thumbnail renderer. Float
/// `Display` output is shortest-round-trip, so `decode_points` restores the
/// sequence exactly.
pub fn encode_points(points: &[PointLocation]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.latitude, point.longitude))
        .collect::<Vec<_>>()
        .join("|")
}

/// Decodes a `lat,lon|lat,lon|...` string. The parse is permissive: empty
/// segments are skipped, and a missing or unparsable coordinate becomes 0.0.
pub fn decode_points(text: &str) -> Vec<PointLocation> {
    text.split('|')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut coordinates = pair.split(',');
            let latitude = coordinates
                .next()
                .and_then(|token| token.parse().ok())
                .unwrap_or(0.0);
            let longitude = coordinates
                .next()
                .and_then(|token| token.parse().ok())
                .unwrap_or(0.0);
            PointLocation::new(latitude, longitude)
        })
        .collect()
}
