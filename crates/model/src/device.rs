use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject, StringValidation},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::{coordinate::Coordinate, ExampleData, Validate, ValidationError};

pub const UUID_PATTERN: &str = r"^DEV[A-Z]\d{6}$";

static UUID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(UUID_PATTERN).expect("uuid pattern is a valid regex"));

// local-part@label(.label)+ with RFC 5321 label rules; quoted local parts
// are not accepted.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

const MAX_EMAIL_LENGTH: usize = 254;

pub fn is_valid_email(value: &str) -> bool {
    value.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(value)
}

/// The identifier of a device: `DEV`, one uppercase letter and six digits.
///
/// A `DeviceUuid` can only be obtained through parsing, so holding one means
/// the pattern has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceUuid(String);

impl DeviceUuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceUuid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if UUID_REGEX.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidUuid(value))
        }
    }
}

impl FromStr for DeviceUuid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<DeviceUuid> for String {
    fn from(value: DeviceUuid) -> Self {
        value.0
    }
}

impl AsRef<str> for DeviceUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JsonSchema for DeviceUuid {
    fn schema_name() -> String {
        "DeviceUuid".to_owned()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            string: Some(Box::new(StringValidation {
                pattern: Some(UUID_PATTERN.to_owned()),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// A registered device as exchanged with clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Device {
    /// The uuid of the device, e.g. `DEVX000001`.
    pub device_uuid: DeviceUuid,
    /// The geographical location of the device.
    pub localisation: Coordinate,
    /// The deployment date of the device in the format YYYY-MM-DD.
    #[serde(default)]
    pub deployment_date: Option<NaiveDate>,
    /// The email address of the owner of the device.
    pub owner: String,
}

impl Validate for Device {
    fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_email(&self.owner) {
            return Err(ValidationError::InvalidEmail(self.owner.clone()));
        }
        self.localisation.validate()
    }
}

impl ExampleData for Device {
    fn example_data() -> Self {
        Self {
            device_uuid: DeviceUuid("DEVX000001".to_owned()),
            localisation: Coordinate::example_data(),
            deployment_date: NaiveDate::from_ymd_opt(2024, 3, 14),
            owner: "owner@example.com".to_owned(),
        }
    }
}
