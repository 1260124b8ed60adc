use model::coordinate::Coordinate;
use registry::database::{DatabaseError, Result};
use sqlx::{Executor, Sqlite, SqliteConnection};
use utility::id::Id;

use super::convert_error;

/// Exact match on both components.
pub async fn get_id<'c, E>(
    executor: E,
    coordinate: &Coordinate,
) -> Result<Option<Id<Coordinate>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar(
        "
        SELECT id
        FROM coordinates
        WHERE latitude = ? AND longitude = ?;
        ",
    )
    .bind(coordinate.latitude)
    .bind(coordinate.longitude)
    .fetch_optional(executor)
    .await
    .map(|id: Option<i64>| id.map(Id::new))
    .map_err(convert_error)
}

/// Returns the id of the row holding exactly this coordinate.
///
/// The insert comes first so that a deferred transaction takes the write lock
/// on its first statement; sqlite can then wait on a busy writer instead of
/// failing a read-to-write upgrade. On conflict nothing is returned and the
/// existing row is looked up.
pub async fn get_or_insert(
    conn: &mut SqliteConnection,
    coordinate: &Coordinate,
) -> Result<Id<Coordinate>> {
    let inserted: Option<i64> = sqlx::query_scalar(
        "
        INSERT INTO coordinates (latitude, longitude)
        VALUES (?, ?)
        ON CONFLICT (latitude, longitude) DO NOTHING
        RETURNING id;
        ",
    )
    .bind(coordinate.latitude)
    .bind(coordinate.longitude)
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?;

    match inserted {
        Some(id) => Ok(Id::new(id)),
        None => get_id(&mut *conn, coordinate)
            .await?
            .ok_or(DatabaseError::NotFound),
    }
}

pub async fn count<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM coordinates;")
        .fetch_one(executor)
        .await
        .map(|count: i64| count as u64)
        .map_err(convert_error)
}
