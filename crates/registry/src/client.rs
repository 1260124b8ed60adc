use log::{debug, info};
use model::{
    device::{Device, DeviceUuid},
    Validate,
};

use crate::{
    database::{CoordinateRepo, Database, DatabaseTransaction, DeviceRepo},
    RequestResult,
};

/// Device operations on top of an injected database.
///
/// Every write runs in its own transaction: the coordinate lookup-or-insert
/// and the device write either both land or neither does. Whether a uuid
/// exists is decided by the write statement itself, so two concurrent
/// creates of the same uuid cannot both succeed.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub async fn create_device(&self, device: Device) -> RequestResult<Device> {
        device.validate()?;

        let mut tx = self.database.transaction().await?;
        let localisation = tx.get_or_insert_coordinate(&device.localisation).await?;
        // on conflict the transaction is dropped and the coordinate insert rolled back
        tx.insert_device(&device, localisation).await?;
        tx.commit().await?;

        info!(
            "created device {} at coordinate {}",
            device.device_uuid, localisation
        );
        Ok(device)
    }

    pub async fn get_device(&self, uuid: &DeviceUuid) -> RequestResult<Device> {
        debug!("fetching device {}", uuid);
        Ok(self.database.auto().get_device(uuid).await?)
    }

    pub async fn update_device(&self, device: Device) -> RequestResult<Device> {
        device.validate()?;

        let mut tx = self.database.transaction().await?;
        let localisation = tx.get_or_insert_coordinate(&device.localisation).await?;
        tx.update_device(&device, localisation).await?;
        tx.commit().await?;

        info!(
            "updated device {} at coordinate {}",
            device.device_uuid, localisation
        );
        Ok(device)
    }

    pub async fn delete_device(&self, uuid: &DeviceUuid) -> RequestResult<()> {
        self.database.auto().delete_device(uuid).await?;
        info!("deleted device {}", uuid);
        Ok(())
    }

    pub async fn device_exists(&self, uuid: &DeviceUuid) -> RequestResult<bool> {
        Ok(self.database.auto().device_exists(uuid).await?)
    }

    pub async fn count_coordinates(&self) -> RequestResult<u64> {
        Ok(self.database.auto().count_coordinates().await?)
    }
}
