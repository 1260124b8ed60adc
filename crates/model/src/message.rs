use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEVICE_NOT_FOUND: &str = "Device not found";
pub const DEVICE_ALREADY_EXISTS: &str = "Device already exists";
pub const DEVICE_DELETED: &str = "Device successfully deleted";

/// A response body carrying only a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn device_deleted() -> Self {
        Self::new(DEVICE_DELETED)
    }
}
