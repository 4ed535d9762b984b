use measurement::thumbnail::ThumbnailRequest;
use model::{
    group::{Group, GroupColor},
    measure::{Measure, MeasureKind},
    point::PointLocation,
};
use utility::id::Id;

fn main() {
    env_logger::init();

    let group = Group::new("Field work".to_owned(), GroupColor::default());
    let group_id: Id<Group> = Id::new("field-work".to_owned());

    let measures = vec![
        Measure::new(
            "Fence line".to_owned(),
            group_id.clone(),
            MeasureKind::Distance,
            vec![
                PointLocation::new(54.323211, 10.122765),
                PointLocation::new(54.32977, 10.13544),
                PointLocation::new(54.33316, 10.14609),
            ],
        ),
        Measure::new(
            "North field".to_owned(),
            group_id.clone(),
            MeasureKind::Area,
            vec![
                PointLocation::new(54.3233, 10.1228),
                PointLocation::new(54.3239, 10.1306),
                PointLocation::new(54.3287, 10.1297),
                PointLocation::new(54.3281, 10.1219),
            ],
        ),
        Measure::new(
            "Irrigation reach".to_owned(),
            group_id.clone(),
            MeasureKind::Circle,
            vec![
                PointLocation::new(54.3260, 10.1262),
                PointLocation::new(54.3260, 10.1291),
            ],
        ),
        Measure::new(
            "Pump house".to_owned(),
            group_id,
            MeasureKind::Poi,
            vec![PointLocation::new(54.32616, 10.12624)],
        ),
    ];

    for measure in &measures {
        println!("== {} ==", measure.name);
        println!("{}", measure.describe());
        println!("encoded: {}", measure.encoded_points());
        println!("thumbnail: {:?}", ThumbnailRequest::new(measure, &group));
        println!();
    }

    let json = serde_json::to_string_pretty(&measures).unwrap();
    println!("json: {}", json);
}
