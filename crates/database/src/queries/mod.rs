use registry::database::DatabaseError;

pub mod coordinate;
pub mod device;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DatabaseError::AlreadyExists
        }
        _ => DatabaseError::Other(Box::new(why)),
    }
}
