use std::collections::HashMap;

use chrono::{DateTime, Utc};
use measurement::database::{DatabaseError, Result};
use model::{
    measure::{Measure, MeasureKind, Metrics},
    point::PointLocation,
    WithId,
};
use utility::id::Id;

/// Table: `measures`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasureRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub group_id: String,
    pub area: f64,
    pub perimeter: f64,
    pub distance: f64,
    pub radius: f64,
    pub updated_at: DateTime<Utc>,
}

impl MeasureRow {
    /// Rejects rows whose kind tag this version does not know instead of
    /// guessing at their semantics.
    pub fn to_model(self, points: Vec<PointLocation>) -> Result<WithId<Measure>> {
        let kind = MeasureKind::from_tag(&self.kind)
            .ok_or_else(|| DatabaseError::UnknownKind(self.kind.clone()))?;
        Ok(WithId::new(
            Id::new(self.id),
            Measure {
                name: self.name,
                kind,
                group_id: Id::new(self.group_id),
                points,
                metrics: Metrics {
                    area: self.area,
                    perimeter: self.perimeter,
                    distance: self.distance,
                    radius: self.radius,
                },
                updated_at: self.updated_at,
            },
        ))
    }
}

/// Table: `measure_points`, one row per point, ordered by `sequence` within
/// a measure.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurePointRow {
    pub measure_id: String,
    pub sequence: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl MeasurePointRow {
    pub fn to_model(self) -> PointLocation {
        PointLocation::new(self.latitude, self.longitude)
    }
}

/// Groups point rows by measure id, keeping the row order within each
/// measure. Callers must query the rows ordered by sequence.
pub fn points_by_measure(
    rows: Vec<MeasurePointRow>,
) -> HashMap<String, Vec<PointLocation>> {
    let mut by_measure: HashMap<String, Vec<PointLocation>> = HashMap::new();
    for row in rows {
        let measure_id = row.measure_id.clone();
        by_measure.entry(measure_id).or_default().push(row.to_model());
    }
    by_measure
}
