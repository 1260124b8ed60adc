use std::error;

use model::ValidationError;
use thiserror::Error;

pub mod client;
pub mod database;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("the requested device does not exist")]
    NotFound,
    #[error("a device with this uuid already exists")]
    AlreadyExists,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Other(Box<dyn error::Error + Send + Sync>),
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            database::DatabaseError::AlreadyExists => Self::AlreadyExists,
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
