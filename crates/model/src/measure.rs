use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo,
    id::{HasId, Id},
};

use crate::{
    group::Group,
    point::{self, PointLocation},
};

/// The figure a measurement describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MeasureKind {
    Distance,
    Circle,
    Poi,
    Area,
}

impl MeasureKind {
    /// Storage tag, kept compatible with existing data sets.
    pub fn tag(&self) -> &'static str {
        match self {
            MeasureKind::Distance => "DISTANCE",
            MeasureKind::Circle => "CIRCLE",
            MeasureKind::Poi => "POI",
            MeasureKind::Area => "AREA",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "DISTANCE" => Some(MeasureKind::Distance),
            "CIRCLE" => Some(MeasureKind::Circle),
            "POI" => Some(MeasureKind::Poi),
            "AREA" => Some(MeasureKind::Area),
            _ => None,
        }
    }

    /// Fewest points for which the kind produces a meaningful figure.
    pub fn min_points(&self) -> usize {
        match self {
            MeasureKind::Distance => 2,
            MeasureKind::Circle => 2,
            MeasureKind::Poi => 1,
            MeasureKind::Area => 3,
        }
    }
}

/// The metrics derived from a measure's points. All values are zero where a
/// kind has no use for them or where the point count is below the kind's
/// minimum. Distances are meters, areas square meters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub area: f64,
    pub perimeter: f64,
    pub distance: f64,
    pub radius: f64,
}

impl Metrics {
    /// Derives every metric from scratch. Degenerate input never fails, it
    /// zeroes all metrics instead.
    pub fn compute(kind: MeasureKind, points: &[PointLocation]) -> Self {
        match kind {
            MeasureKind::Distance => Self::for_distance(points),
            MeasureKind::Circle => Self::for_circle(points),
            MeasureKind::Area => Self::for_area(points),
            MeasureKind::Poi => Self::default(),
        }
    }

    fn for_distance(points: &[PointLocation]) -> Self {
        Self {
            distance: geo::path_length(&coordinates_of(points)),
            ..Self::default()
        }
    }

    fn for_circle(points: &[PointLocation]) -> Self {
        // points[0] is the center, points[1] marks the rim; any further
        // points are ignored.
        let (Some(center), Some(rim)) = (points.first(), points.get(1)) else {
            return Self::default();
        };
        let radius = geo::haversine_distance(
            center.latitude,
            center.longitude,
            rim.latitude,
            rim.longitude,
        );
        // Planar formulas; the error grows with the radius.
        Self {
            radius,
            area: PI * radius * radius,
            perimeter: 2.0 * PI * radius,
            ..Self::default()
        }
    }

    fn for_area(points: &[PointLocation]) -> Self {
        let coordinates = coordinates_of(points);
        Self {
            area: geo::ring_area(&coordinates),
            perimeter: geo::ring_perimeter(&coordinates),
            ..Self::default()
        }
    }
}

fn coordinates_of(points: &[PointLocation]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|point| (point.latitude, point.longitude))
        .collect()
}

/// A stored measurement: an ordered point sequence, the kind of figure the
/// points describe, and the metrics derived from both. The metrics are
/// cached on the record and rederived on every mutation, so they are never
/// stale relative to `points` and `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub name: String,
    pub kind: MeasureKind,
    pub group_id: Id<Group>,
    pub points: Vec<PointLocation>,
    #[serde(flatten)]
    pub metrics: Metrics,
    pub updated_at: DateTime<Utc>,
}

impl HasId for Measure {
    type IdType = String;
}

impl Measure {
    /// Builds a measure and derives its metrics before returning it. Input
    /// validation is the editor's job, not this constructor's.
    pub fn new(
        name: String,
        group_id: Id<Group>,
        kind: MeasureKind,
        points: Vec<PointLocation>,
    ) -> Self {
        let mut measure = Self {
            name,
            kind,
            group_id,
            points,
            metrics: Metrics::default(),
            updated_at: Utc::now(),
        };
        measure.recompute();
        measure
    }

    /// Replaces the point sequence and rederives the metrics.
    pub fn set_points(&mut self, points: Vec<PointLocation>) {
        self.points = points;
        self.recompute();
    }

    /// Rederives all four metrics from the current kind and points. The set
    /// is replaced in a single assignment, so no partial update is ever
    /// observable.
    pub fn recompute(&mut self) {
        self.metrics = Metrics::compute(self.kind, &self.points);
    }

    /// The interchange form of the point sequence.
    pub fn encoded_points(&self) -> String {
        point::encode_points(&self.points)
    }

    /// Whether renderers should fill the figure or only stroke it.
    pub fn needs_fill(&self) -> bool {
        matches!(self.kind, MeasureKind::Area | MeasureKind::Circle)
    }

    /// Human-readable summary of the derived metrics, one line per value.
    pub fn describe(&self) -> String {
        match self.kind {
            MeasureKind::Area => format!(
                "Area: {:.3} [m²]\nPerimeter: {:.3} [m]",
                self.metrics.area, self.metrics.perimeter
            ),
            MeasureKind::Distance => {
                format!("Distance: {:.3} [m]", self.metrics.distance)
            }
            MeasureKind::Circle => format!(
                "Area: {:.3} [m²]\nRadio: {:.3} [m]\nCircumference: {:.3} [m]",
                self.metrics.area, self.metrics.radius, self.metrics.perimeter
            ),
            MeasureKind::Poi => {
                let first = self
                    .points
                    .first()
                    .copied()
                    .unwrap_or(PointLocation::new(0.0, 0.0));
                format!(
                    "Latitude: {:?}\nLongitude: {:?}",
                    first.latitude, first.longitude
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_id() -> Id<Group> {
        Id::new("test-group".to_owned())
    }

    fn measure(kind: MeasureKind, points: Vec<PointLocation>) -> Measure {
        Measure::new("test".to_owned(), group_id(), kind, points)
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in [
            MeasureKind::Distance,
            MeasureKind::Circle,
            MeasureKind::Poi,
            MeasureKind::Area,
        ] {
            assert_eq!(MeasureKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(MeasureKind::from_tag("TRIANGLE"), None);
    }

    #[test]
    fn distance_of_one_degree_of_longitude() {
        let measure = measure(
            MeasureKind::Distance,
            vec![PointLocation::new(0.0, 0.0), PointLocation::new(0.0, 1.0)],
        );
        // within 1% of the geodesic reference value
        assert_close(measure.metrics.distance, 111_320.0, 1_113.2);
        assert_eq!(measure.metrics.area, 0.0);
        assert_eq!(measure.metrics.perimeter, 0.0);
        assert_eq!(measure.metrics.radius, 0.0);
    }

    #[test]
    fn distance_below_two_points_is_zero() {
        let single = measure(
            MeasureKind::Distance,
            vec![PointLocation::new(54.3, 10.1)],
        );
        assert_eq!(single.metrics, Metrics::default());
    }

    #[test]
    fn appending_a_point_never_shortens_a_distance() {
        let mut points = vec![
            PointLocation::new(0.0, 0.0),
            PointLocation::new(0.5, 0.5),
        ];
        let mut measure = measure(MeasureKind::Distance, points.clone());
        let mut previous = measure.metrics.distance;
        for addition in [
            PointLocation::new(0.0, 0.0),
            PointLocation::new(-0.25, 0.75),
            PointLocation::new(0.1, 0.1),
        ] {
            points.push(addition);
            measure.set_points(points.clone());
            assert!(measure.metrics.distance >= previous);
            previous = measure.metrics.distance;
        }
    }

    #[test]
    fn area_of_a_small_square() {
        let measure = measure(
            MeasureKind::Area,
            vec![
                PointLocation::new(0.0, 0.0),
                PointLocation::new(0.0, 0.001),
                PointLocation::new(0.001, 0.001),
                PointLocation::new(0.001, 0.0),
            ],
        );
        let side = geo::haversine_distance(0.0, 0.0, 0.0, 0.001);
        assert!(measure.metrics.area > 0.0);
        assert_close(measure.metrics.perimeter, 4.0 * side, 4.0 * side * 0.01);
        assert_close(measure.metrics.area, side * side, side * side * 0.01);
    }

    #[test]
    fn area_below_three_points_is_zero() {
        for points in [
            vec![],
            vec![PointLocation::new(0.0, 0.0)],
            vec![PointLocation::new(0.0, 0.0), PointLocation::new(0.0, 0.001)],
        ] {
            let measure = measure(MeasureKind::Area, points);
            assert_eq!(measure.metrics, Metrics::default());
        }
    }

    #[test]
    fn circle_metrics_follow_the_radius() {
        let measure = measure(
            MeasureKind::Circle,
            vec![PointLocation::new(0.0, 0.0), PointLocation::new(0.0, 0.001)],
        );
        let radius = measure.metrics.radius;
        assert_close(radius, 111.32, 1.12);
        assert_close(measure.metrics.area, PI * radius * radius, 1e-9);
        assert_close(measure.metrics.perimeter, 2.0 * PI * radius, 1e-9);
    }

    #[test]
    fn circle_ignores_points_beyond_the_second() {
        let two = measure(
            MeasureKind::Circle,
            vec![PointLocation::new(10.0, 10.0), PointLocation::new(10.0, 10.1)],
        );
        let three = measure(
            MeasureKind::Circle,
            vec![
                PointLocation::new(10.0, 10.0),
                PointLocation::new(10.0, 10.1),
                PointLocation::new(40.0, 40.0),
            ],
        );
        assert_eq!(two.metrics, three.metrics);
    }

    #[test]
    fn circle_below_two_points_is_zero() {
        for points in [vec![], vec![PointLocation::new(1.0, 1.0)]] {
            let measure = measure(MeasureKind::Circle, points);
            assert_eq!(measure.metrics, Metrics::default());
        }
    }

    #[test]
    fn poi_has_no_metrics() {
        let measure = measure(
            MeasureKind::Poi,
            vec![PointLocation::new(52.52, 13.405)],
        );
        assert_eq!(measure.metrics, Metrics::default());
    }

    #[test]
    fn set_points_replaces_stale_metrics() {
        let mut measure = measure(
            MeasureKind::Area,
            vec![
                PointLocation::new(0.0, 0.0),
                PointLocation::new(0.0, 0.001),
                PointLocation::new(0.001, 0.001),
            ],
        );
        assert!(measure.metrics.area > 0.0);
        measure.set_points(vec![
            PointLocation::new(0.0, 0.0),
            PointLocation::new(0.0, 0.001),
        ]);
        // below the minimum, nothing of the previous result may survive
        assert_eq!(measure.metrics, Metrics::default());
    }

    #[test]
    fn needs_fill_only_for_closed_figures() {
        let point = vec![PointLocation::new(0.0, 0.0)];
        assert!(measure(MeasureKind::Area, point.clone()).needs_fill());
        assert!(measure(MeasureKind::Circle, point.clone()).needs_fill());
        assert!(!measure(MeasureKind::Distance, point.clone()).needs_fill());
        assert!(!measure(MeasureKind::Poi, point).needs_fill());
    }

    #[test]
    fn describes_a_distance_with_three_decimals() {
        let mut measure = measure(
            MeasureKind::Distance,
            vec![PointLocation::new(0.0, 0.0), PointLocation::new(0.0, 1.0)],
        );
        measure.metrics.distance = 1234.5678;
        assert_eq!(measure.describe(), "Distance: 1234.568 [m]");
    }

    #[test]
    fn describes_an_area() {
        let mut measure = measure(
            MeasureKind::Area,
            vec![
                PointLocation::new(0.0, 0.0),
                PointLocation::new(0.0, 0.001),
                PointLocation::new(0.001, 0.001),
            ],
        );
        measure.metrics = Metrics {
            area: 12.5,
            perimeter: 40.0,
            distance: 0.0,
            radius: 0.0,
        };
        assert_eq!(
            measure.describe(),
            "Area: 12.500 [m²]\nPerimeter: 40.000 [m]"
        );
    }

    #[test]
    fn describes_a_circle() {
        let mut measure = measure(
            MeasureKind::Circle,
            vec![PointLocation::new(0.0, 0.0), PointLocation::new(0.0, 0.001)],
        );
        measure.metrics = Metrics {
            area: 100.0,
            perimeter: 35.4491,
            distance: 0.0,
            radius: 5.6419,
        };
        assert_eq!(
            measure.describe(),
            "Area: 100.000 [m²]\nRadio: 5.642 [m]\nCircumference: 35.449 [m]"
        );
    }

    #[test]
    fn describes_a_poi_by_its_first_point() {
        let measure = measure(
            MeasureKind::Poi,
            vec![PointLocation::new(52.52, 13.405)],
        );
        assert_eq!(measure.describe(), "Latitude: 52.52\nLongitude: 13.405");
    }

    #[test]
    fn describes_a_poi_without_points_as_the_origin() {
        let mut measure = measure(
            MeasureKind::Poi,
            vec![PointLocation::new(1.0, 1.0)],
        );
        measure.set_points(vec![]);
        assert_eq!(measure.describe(), "Latitude: 0.0\nLongitude: 0.0");
    }

    #[test]
    fn encoded_points_round_trip_through_the_codec() {
        let points = vec![
            PointLocation::new(54.323_211, 10.122_765),
            PointLocation::new(54.329_77, 10.135_44),
        ];
        let measure = measure(MeasureKind::Distance, points.clone());
        assert_eq!(point::decode_points(&measure.encoded_points()), points);
    }
}
