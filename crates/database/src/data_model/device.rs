use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    coordinate::Coordinate,
    device::{Device, DeviceUuid},
};
use registry::database::{DatabaseError, DeviceRepo, Result};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::device::{delete, exists, get, insert, update};
use crate::SqliteDatabaseAutocommit;
use crate::SqliteDatabaseTransaction;

use super::DatabaseRow;

/// A device joined with its coordinate.
/// Tables: `devices`, `coordinates`
#[derive(Debug, Clone, FromRow)]
pub struct DeviceRow {
    pub device_uuid: String,
    pub deployment_date: Option<NaiveDate>,
    pub owner: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DatabaseRow for DeviceRow {
    type Model = Device;

    fn to_model(self) -> Result<Self::Model> {
        let device_uuid = DeviceUuid::try_from(self.device_uuid)
            .map_err(|why| DatabaseError::Other(Box::new(why)))?;
        Ok(Device {
            device_uuid,
            localisation: Coordinate::new(self.latitude, self.longitude),
            deployment_date: self.deployment_date,
            owner: self.owner,
        })
    }
}

#[async_trait]
impl DeviceRepo for SqliteDatabaseAutocommit {
    async fn get_device(&mut self, uuid: &DeviceUuid) -> Result<Device> {
        get(&self.pool, uuid).await
    }

    async fn device_exists(&mut self, uuid: &DeviceUuid) -> Result<bool> {
        exists(&self.pool, uuid).await
    }

    async fn insert_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()> {
        insert(&self.pool, device, localisation).await
    }

    async fn update_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()> {
        update(&self.pool, device, localisation).await
    }

    async fn delete_device(&mut self, uuid: &DeviceUuid) -> Result<()> {
        delete(&self.pool, uuid).await
    }
}

#[async_trait]
impl<'a> DeviceRepo for SqliteDatabaseTransaction<'a> {
    async fn get_device(&mut self, uuid: &DeviceUuid) -> Result<Device> {
        get(&mut *self.tx, uuid).await
    }

    async fn device_exists(&mut self, uuid: &DeviceUuid) -> Result<bool> {
        exists(&mut *self.tx, uuid).await
    }

    async fn insert_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()> {
        insert(&mut *self.tx, device, localisation).await
    }

    async fn update_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()> {
        update(&mut *self.tx, device, localisation).await
    }

    async fn delete_device(&mut self, uuid: &DeviceUuid) -> Result<()> {
        delete(&mut *self.tx, uuid).await
    }
}
