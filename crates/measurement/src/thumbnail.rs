use model::{group::Group, measure::Measure};

/// Everything the external static-map renderer needs for a preview image:
/// the wire-encoded points, fill or stroke-only styling, and the color of
/// the measure's group. Fetching and caching the image is the renderer's
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub encoded_points: String,
    pub needs_fill: bool,
    pub color_hex: String,
}

impl ThumbnailRequest {
    pub fn new(measure: &Measure, group: &Group) -> Self {
        Self {
            encoded_points: measure.encoded_points(),
            needs_fill: measure.needs_fill(),
            color_hex: group.color.rgb_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use model::{
        group::GroupColor,
        measure::MeasureKind,
        point::PointLocation,
    };
    use utility::id::Id;

    use super::*;

    #[test]
    fn carries_the_three_rendering_inputs() {
        let group =
            Group::new("fields".to_owned(), GroupColor::new(0xFF33_CC66));
        let measure = Measure::new(
            "north field".to_owned(),
            Id::new("g1".to_owned()),
            MeasureKind::Area,
            vec![
                PointLocation::new(0.0, 0.0),
                PointLocation::new(0.0, 0.001),
                PointLocation::new(0.001, 0.001),
            ],
        );

        let request = ThumbnailRequest::new(&measure, &group);

        assert_eq!(request.encoded_points, "0,0|0,0.001|0.001,0.001");
        assert!(request.needs_fill);
        assert_eq!(request.color_hex, "33CC66");
    }
}
