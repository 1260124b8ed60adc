use thiserror::Error;

pub mod coordinate;
pub mod device;
pub mod message;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// Input checks that run before anything touches the store.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(
        "Invalid device uuid '{0}'. It must start with 'DEV', followed by a single \
         uppercase letter and six digits (e.g., DEVX000001)."
    )]
    InvalidUuid(String),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Latitude must be between -90 and 90 degrees, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -180 and 180 degrees, got {0}")]
    LongitudeOutOfRange(f64),
}
