use itertools::Itertools;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Sum of the haversine distances between consecutive `(latitude, longitude)`
/// pairs. Zero for fewer than two coordinates.
pub fn path_length(coordinates: &[(f64, f64)]) -> f64 {
    coordinates
        .iter()
        .tuple_windows()
        .map(|((latitude_1, longitude_1), (latitude_2, longitude_2))| {
            haversine_distance(*latitude_1, *longitude_1, *latitude_2, *longitude_2)
        })
        .sum()
}

/// Length of the closed ring through the coordinates, including the edge from
/// the last coordinate back to the first. Zero for fewer than three.
pub fn ring_perimeter(coordinates: &[(f64, f64)]) -> f64 {
    if coordinates.len() < 3 {
        return 0.0;
    }
    let (first_latitude, first_longitude) = coordinates[0];
    let (last_latitude, last_longitude) = coordinates[coordinates.len() - 1];
    path_length(coordinates)
        + haversine_distance(
            last_latitude,
            last_longitude,
            first_latitude,
            first_longitude,
        )
}

/// Spherical area of the closed ring in square meters, via the
/// Chamberlain-Duquette summation. The sign of the sum encodes winding
/// direction, so the absolute value is returned. Zero for fewer than three
/// coordinates. Self-intersecting rings are not handled.
pub fn ring_area(coordinates: &[(f64, f64)]) -> f64 {
    if coordinates.len() < 3 {
        return 0.0;
    }

    let mut doubled_area = 0.0;
    for index in 0..coordinates.len() {
        let (latitude_1, longitude_1) = coordinates[index];
        let (latitude_2, longitude_2) =
            coordinates[(index + 1) % coordinates.len()];
        doubled_area += (to_radians(longitude_2) - to_radians(longitude_1))
            * (2.0 + to_radians(latitude_1).sin() + to_radians(latitude_2).sin());
    }

    (doubled_area * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn one_degree_of_longitude_at_the_equator() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);
        // ~111.2 km on a spherical earth model
        assert_close(distance, 111_194.9, 1.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_distance(54.3, 10.1, 54.3, 10.1), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(54.32, 10.12, 53.55, 9.99);
        let back = haversine_distance(53.55, 9.99, 54.32, 10.12);
        assert_close(there, back, 1e-9);
    }

    #[test]
    fn path_length_sums_segments() {
        let coordinates = [(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)];
        let total = path_length(&coordinates);
        assert_close(total, 2.0 * haversine_distance(0.0, 0.0, 0.0, 1.0), 1e-6);
    }

    #[test]
    fn path_length_below_two_coordinates_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[(12.0, 34.0)]), 0.0);
    }

    #[test]
    fn ring_perimeter_includes_closing_edge() {
        let square = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)];
        let side = haversine_distance(0.0, 0.0, 0.0, 0.001);
        assert_close(ring_perimeter(&square), 4.0 * side, side * 0.01);
    }

    #[test]
    fn ring_perimeter_below_three_coordinates_is_zero() {
        assert_eq!(ring_perimeter(&[(0.0, 0.0), (0.0, 1.0)]), 0.0);
    }

    #[test]
    fn ring_area_of_a_small_square() {
        let square = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)];
        let side = haversine_distance(0.0, 0.0, 0.0, 0.001);
        // close to the planar area at this scale
        assert_close(ring_area(&square), side * side, side * side * 0.01);
    }

    #[test]
    fn ring_area_ignores_winding_direction() {
        let clockwise = [(0.0, 0.0), (0.001, 0.0), (0.001, 0.001), (0.0, 0.001)];
        let counter: Vec<(f64, f64)> = clockwise.iter().rev().copied().collect();
        assert_close(ring_area(&clockwise), ring_area(&counter), 1e-6);
    }

    #[test]
    fn ring_area_handles_concave_rings() {
        // L-shaped ring covering three quarters of the 2x2 square
        let l_shape = [
            (0.0, 0.0),
            (0.0, 0.002),
            (0.001, 0.002),
            (0.001, 0.001),
            (0.002, 0.001),
            (0.002, 0.0),
        ];
        let square = [(0.0, 0.0), (0.0, 0.002), (0.002, 0.002), (0.002, 0.0)];
        let expected = ring_area(&square) * 0.75;
        assert_close(ring_area(&l_shape), expected, expected * 0.01);
    }

    #[test]
    fn ring_area_below_three_coordinates_is_zero() {
        assert_eq!(ring_area(&[]), 0.0);
        assert_eq!(ring_area(&[(0.0, 0.0), (0.001, 0.001)]), 0.0);
    }
}
