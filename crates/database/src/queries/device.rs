use model::{
    coordinate::Coordinate,
    device::{Device, DeviceUuid},
};
use registry::database::{DatabaseError, Result};
use sqlx::{Executor, Sqlite};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{device::DeviceRow, DatabaseRow};

use super::convert_error;

pub async fn get<'c, E>(executor: E, uuid: &DeviceUuid) -> Result<Device>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as::<_, DeviceRow>(
        "
        SELECT
            devices.device_uuid, devices.deployment_date, devices.owner,
            coordinates.latitude, coordinates.longitude
        FROM devices
        INNER JOIN coordinates ON coordinates.id = devices.localisation_id
        WHERE devices.device_uuid = ?;
        ",
    )
    .bind(uuid.as_str())
    .fetch_one(executor)
    .await
    .map_err(convert_error)?
    .let_owned(DeviceRow::to_model)
}

pub async fn exists<'c, E>(executor: E, uuid: &DeviceUuid) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar(
        "
        SELECT EXISTS (SELECT 1 FROM devices WHERE device_uuid = ?);
        ",
    )
    .bind(uuid.as_str())
    .fetch_one(executor)
    .await
    .map(|exists: i64| exists != 0)
    .map_err(convert_error)
}

pub async fn insert<'c, E>(
    executor: E,
    device: &Device,
    localisation: Id<Coordinate>,
) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(
        "
        INSERT INTO devices (
            device_uuid,
            localisation_id,
            deployment_date,
            owner
        )
        VALUES (?, ?, ?, ?)
        ON CONFLICT (device_uuid) DO NOTHING;
        ",
    )
    .bind(device.device_uuid.as_str())
    .bind(localisation.raw())
    .bind(device.deployment_date)
    .bind(&device.owner)
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::AlreadyExists);
    }
    Ok(())
}

pub async fn update<'c, E>(
    executor: E,
    device: &Device,
    localisation: Id<Coordinate>,
) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(
        "
        UPDATE devices
        SET deployment_date = ?,
            owner = ?,
            localisation_id = ?
        WHERE device_uuid = ?;
        ",
    )
    .bind(device.deployment_date)
    .bind(&device.owner)
    .bind(localisation.raw())
    .bind(device.device_uuid.as_str())
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}

pub async fn delete<'c, E>(executor: E, uuid: &DeviceUuid) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(
        "
        DELETE FROM devices
        WHERE device_uuid = ?;
        ",
    )
    .bind(uuid.as_str())
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}
