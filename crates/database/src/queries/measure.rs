use measurement::database::{DatabaseError, Result};
use model::{
    group::Group,
    measure::Measure,
    point::PointLocation,
    WithId,
};
use sqlx::{Executor, PgConnection, Postgres};
use utility::id::Id;

use crate::data_model::measure::{
    points_by_measure, MeasurePointRow, MeasureRow,
};

use super::convert_error;

pub async fn get_all(
    connection: &mut PgConnection,
) -> Result<Vec<WithId<Measure>>> {
    let rows = rows_all(&mut *connection).await?;
    let point_rows = point_rows_all(&mut *connection).await?;
    assemble(rows, point_rows)
}

pub async fn get_in_group(
    connection: &mut PgConnection,
    group: &Id<Group>,
) -> Result<Vec<WithId<Measure>>> {
    let rows = rows_in_group(&mut *connection, group).await?;
    let point_rows = point_rows_in_group(&mut *connection, group).await?;
    assemble(rows, point_rows)
}

pub async fn get(
    connection: &mut PgConnection,
    id: &Id<Measure>,
) -> Result<WithId<Measure>> {
    let row = row(&mut *connection, id).await?;
    let points = points_of(&mut *connection, id).await?;
    row.to_model(points)
}

pub async fn insert(
    connection: &mut PgConnection,
    measure: Measure,
) -> Result<WithId<Measure>> {
    let row: MeasureRow = sqlx::query_as(
        "
        INSERT INTO measures(
            name,
            kind,
            group_id,
            area,
            perimeter,
            distance,
            radius,
            updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *;
        ",
    )
    .bind(&measure.name)
    .bind(measure.kind.tag())
    .bind(measure.group_id.raw())
    .bind(measure.metrics.area)
    .bind(measure.metrics.perimeter)
    .bind(measure.metrics.distance)
    .bind(measure.metrics.radius)
    .bind(measure.updated_at)
    .fetch_one(&mut *connection)
    .await
    .map_err(convert_error)?;

    let id = Id::new(row.id.clone());
    replace_points(&mut *connection, &id, &measure.points).await?;
    row.to_model(measure.points)
}

pub async fn put(
    connection: &mut PgConnection,
    measure: WithId<Measure>,
) -> Result<WithId<Measure>> {
    let row: MeasureRow = sqlx::query_as(
        "
        INSERT INTO measures(
            id,
            name,
            kind,
            group_id,
            area,
            perimeter,
            distance,
            radius,
            updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id)
        DO UPDATE SET
            name = EXCLUDED.name,
            kind = EXCLUDED.kind,
            group_id = EXCLUDED.group_id,
            area = EXCLUDED.area,
            perimeter = EXCLUDED.perimeter,
            distance = EXCLUDED.distance,
            radius = EXCLUDED.radius,
            updated_at = EXCLUDED.updated_at
        RETURNING *;
        ",
    )
    .bind(measure.id.raw())
    .bind(&measure.content.name)
    .bind(measure.content.kind.tag())
    .bind(measure.content.group_id.raw())
    .bind(measure.content.metrics.area)
    .bind(measure.content.metrics.perimeter)
    .bind(measure.content.metrics.distance)
    .bind(measure.content.metrics.radius)
    .bind(measure.content.updated_at)
    .fetch_one(&mut *connection)
    .await
    .map_err(convert_error)?;

    replace_points(&mut *connection, &measure.id, &measure.content.points)
        .await?;
    row.to_model(measure.content.points)
}

pub async fn delete<'c, E>(executor: E, id: &Id<Measure>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        DELETE FROM
            measures
        WHERE
            id = $1;
        ",
    )
    .bind(id.raw())
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}

// single statement queries

async fn rows_all<'c, E>(executor: E) -> Result<Vec<MeasureRow>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, kind, group_id, area, perimeter, distance, radius,
            updated_at
        FROM
            measures
        ORDER BY
            name ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)
}

async fn rows_in_group<'c, E>(
    executor: E,
    group: &Id<Group>,
) -> Result<Vec<MeasureRow>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, kind, group_id, area, perimeter, distance, radius,
            updated_at
        FROM
            measures
        WHERE
            group_id = $1
        ORDER BY
            name ASC;
        ",
    )
    .bind(group.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)
}

async fn row<'c, E>(executor: E, id: &Id<Measure>) -> Result<MeasureRow>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, kind, group_id, area, perimeter, distance, radius,
            updated_at
        FROM
            measures
        WHERE
            id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
}

async fn point_rows_all<'c, E>(executor: E) -> Result<Vec<MeasurePointRow>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            measure_id, sequence, latitude, longitude
        FROM
            measure_points
        ORDER BY
            measure_id, sequence ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)
}

async fn point_rows_in_group<'c, E>(
    executor: E,
    group: &Id<Group>,
) -> Result<Vec<MeasurePointRow>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            points.measure_id, points.sequence, points.latitude,
            points.longitude
        FROM
            measure_points AS points
            JOIN measures ON measures.id = points.measure_id
        WHERE
            measures.group_id = $1
        ORDER BY
            points.measure_id, points.sequence ASC;
        ",
    )
    .bind(group.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)
}

async fn points_of<'c, E>(
    executor: E,
    id: &Id<Measure>,
) -> Result<Vec<PointLocation>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            measure_id, sequence, latitude, longitude
        FROM
            measure_points
        WHERE
            measure_id = $1
        ORDER BY
            sequence ASC;
        ",
    )
    .bind(id.raw())
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows: Vec<MeasurePointRow>| {
        rows.into_iter().map(|row| row.to_model()).collect()
    })
}

async fn insert_point<'c, E>(
    executor: E,
    id: &Id<Measure>,
    sequence: i32,
    point: &PointLocation,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        INSERT INTO measure_points(
            measure_id,
            sequence,
            latitude,
            longitude
        )
        VALUES ($1, $2, $3, $4);
        ",
    )
    .bind(id.raw())
    .bind(sequence)
    .bind(point.latitude)
    .bind(point.longitude)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(())
}

async fn delete_points<'c, E>(executor: E, id: &Id<Measure>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        DELETE FROM
            measure_points
        WHERE
            measure_id = $1;
        ",
    )
    .bind(id.raw())
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(())
}

// assembly

async fn replace_points(
    connection: &mut PgConnection,
    id: &Id<Measure>,
    points: &[PointLocation],
) -> Result<()> {
    delete_points(&mut *connection, id).await?;
    for (sequence, point) in points.iter().enumerate() {
        insert_point(&mut *connection, id, sequence as i32, point).await?;
    }
    Ok(())
}

fn assemble(
    rows: Vec<MeasureRow>,
    point_rows: Vec<MeasurePointRow>,
) -> Result<Vec<WithId<Measure>>> {
    let mut points = points_by_measure(point_rows);
    rows.into_iter()
        .map(|row| {
            let measure_points = points.remove(&row.id).unwrap_or_default();
            row.to_model(measure_points)
        })
        .collect()
}
