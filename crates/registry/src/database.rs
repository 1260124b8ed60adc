use std::{error, result};

use async_trait::async_trait;
use model::{
    coordinate::Coordinate,
    device::{Device, DeviceUuid},
};
use thiserror::Error;
use utility::id::Id;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no matching row")]
    NotFound,
    #[error("a row with the same key already exists")]
    AlreadyExists,
    #[error("{0}")]
    Other(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait DeviceRepo {
    /// Fetches a device joined with its coordinate. `NotFound` if the uuid is unknown.
    async fn get_device(&mut self, uuid: &DeviceUuid) -> Result<Device>;

    async fn device_exists(&mut self, uuid: &DeviceUuid) -> Result<bool>;

    /// Inserts a new device row. Reports `AlreadyExists` instead of
    /// overwriting when the uuid is taken.
    async fn insert_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()>;

    /// Overwrites owner, deployment date and coordinate of an existing
    /// device. Reports `NotFound` when no row has the uuid.
    async fn update_device(
        &mut self,
        device: &Device,
        localisation: Id<Coordinate>,
    ) -> Result<()>;

    /// Reports `NotFound` when no row has the uuid.
    async fn delete_device(&mut self, uuid: &DeviceUuid) -> Result<()>;
}

#[async_trait]
pub trait CoordinateRepo {
    /// Returns the id of the row holding exactly this coordinate, inserting
    /// it first if there is none. Coordinate rows are never updated.
    async fn get_or_insert_coordinate(
        &mut self,
        coordinate: &Coordinate,
    ) -> Result<Id<Coordinate>>;

    async fn count_coordinates(&mut self) -> Result<u64>;
}

pub trait DatabaseOperations: DeviceRepo + CoordinateRepo {}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// trait to implement a device database.
/// multiple concurrent accesses should be possible by e.g. cloning the database object.
/// a transaction that is dropped without `commit` is rolled back.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
