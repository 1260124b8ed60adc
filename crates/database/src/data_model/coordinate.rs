use async_trait::async_trait;
use model::coordinate::Coordinate;
use registry::database::{CoordinateRepo, Result};
use utility::id::Id;

use crate::queries::{
    convert_error,
    coordinate::{count, get_or_insert},
};
use crate::SqliteDatabaseAutocommit;
use crate::SqliteDatabaseTransaction;

#[async_trait]
impl CoordinateRepo for SqliteDatabaseAutocommit {
    async fn get_or_insert_coordinate(
        &mut self,
        coordinate: &Coordinate,
    ) -> Result<Id<Coordinate>> {
        let mut conn = self.pool.acquire().await.map_err(convert_error)?;
        get_or_insert(&mut conn, coordinate).await
    }

    async fn count_coordinates(&mut self) -> Result<u64> {
        count(&self.pool).await
    }
}

#[async_trait]
impl<'a> CoordinateRepo for SqliteDatabaseTransaction<'a> {
    async fn get_or_insert_coordinate(
        &mut self,
        coordinate: &Coordinate,
    ) -> Result<Id<Coordinate>> {
        get_or_insert(&mut *self.tx, coordinate).await
    }

    async fn count_coordinates(&mut self) -> Result<u64> {
        count(&mut *self.tx).await
    }
}
