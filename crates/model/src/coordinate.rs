use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{ExampleData, Validate, ValidationError};

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A geographical position in decimal degrees.
///
/// Coordinates are content addressed: two devices at exactly the same
/// latitude and longitude share one stored row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    /// Latitude in decimal degrees. Must be between -90 and 90.
    pub latitude: f64,
    /// Longitude in decimal degrees. Must be between -180 and 180.
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl HasId for Coordinate {
    type IdType = i64;
}

impl Validate for Coordinate {
    fn validate(&self) -> Result<(), ValidationError> {
        // NaN fails `contains`, so it is rejected here too.
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Self::new(35.6582, 139.8752)
    }
}
