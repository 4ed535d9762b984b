use measurement::database::{DatabaseError, Result};
use model::{group::Group, WithId};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::group::GroupRow;

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Group>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, color, updated_at
        FROM
            groups
        ORDER BY
            name ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .into_iter()
    .map(|row: GroupRow| row.to_model())
    .collect::<Vec<_>>()
    .let_owned(|groups| Ok(groups))
}

pub async fn get<'c, E>(executor: E, id: &Id<Group>) -> Result<WithId<Group>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, color, updated_at
        FROM
            groups
        WHERE
            id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: GroupRow| row.to_model())
}

pub async fn insert<'c, E>(executor: E, group: Group) -> Result<WithId<Group>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO groups(
            name,
            color,
            updated_at
        )
        VALUES ($1, $2, $3)
        RETURNING *;
        ",
    )
    .bind(&group.name)
    .bind(group.color.argb())
    .bind(group.updated_at)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: GroupRow| row.to_model())
}

pub async fn put<'c, E>(
    executor: E,
    group: WithId<Group>,
) -> Result<WithId<Group>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO groups(
            id,
            name,
            color,
            updated_at
        )
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id)
        DO UPDATE SET
            name = EXCLUDED.name,
            color = EXCLUDED.color,
            updated_at = EXCLUDED.updated_at
        RETURNING *;
        ",
    )
    .bind(group.id.raw())
    .bind(&group.content.name)
    .bind(group.content.color.argb())
    .bind(group.content.updated_at)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: GroupRow| row.to_model())
}

/// Measures filed under the group go with it (`ON DELETE CASCADE`).
pub async fn delete<'c, E>(executor: E, id: &Id<Group>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        "
        DELETE FROM
            groups
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

pub async fn count_measures<'c, E>(executor: E, group: &Id<Group>) -> Result<i64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        SELECT
            COUNT(*)
        FROM
            measures
        WHERE
            group_id = $1;
        ",
    )
    .bind(group.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
}
