//! Request validation. Every handler input passes through one of these
//! before the store is touched; failures become a 422 response.

use axum::{extract::rejection::JsonRejection, Json};
use model::{
    device::{Device, DeviceUuid},
    Validate,
};

use crate::common::{RouteErrorResponse, RouteResult};

/// Checks a device body: well formed json, a valid uuid, an email owner and
/// an in-range localisation.
pub(crate) fn device_body(
    payload: Result<Json<Device>, JsonRejection>,
) -> RouteResult<Device> {
    let Json(device) =
        payload.map_err(|why| RouteErrorResponse::validation(why.body_text()))?;
    device.validate()?;
    Ok(device)
}

pub(crate) fn device_uuid(raw: &str) -> RouteResult<DeviceUuid> {
    Ok(raw.parse::<DeviceUuid>()?)
}
