use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::debug;
use model::{device::Device, message::MessageResponse};

use crate::{common::schema, validation, RouteResult, WebState};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/devices/schema", get(schema::<Device>))
        .route("/devices/", post(create_device).put(update_device))
        .route("/devices", post(create_device).put(update_device))
        .route(
            "/devices/:device_uuid",
            get(read_device).delete(delete_device),
        )
        .with_state(state)
}

async fn create_device(
    State(WebState { device_client, .. }): State<WebState>,
    payload: Result<Json<Device>, JsonRejection>,
) -> RouteResult<(StatusCode, Json<Device>)> {
    let device = validation::device_body(payload)?;
    debug!("POST /devices {}", device.device_uuid);

    let device = device_client.create_device(device).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

async fn read_device(
    State(WebState { device_client, .. }): State<WebState>,
    Path(device_uuid): Path<String>,
) -> RouteResult<Json<Device>> {
    let device_uuid = validation::device_uuid(&device_uuid)?;

    let device = device_client.get_device(&device_uuid).await?;
    Ok(Json(device))
}

async fn update_device(
    State(WebState { device_client, .. }): State<WebState>,
    payload: Result<Json<Device>, JsonRejection>,
) -> RouteResult<Json<Device>> {
    let device = validation::device_body(payload)?;
    debug!("PUT /devices {}", device.device_uuid);

    let device = device_client.update_device(device).await?;
    Ok(Json(device))
}

async fn delete_device(
    State(WebState { device_client, .. }): State<WebState>,
    Path(device_uuid): Path<String>,
) -> RouteResult<Json<MessageResponse>> {
    let device_uuid = validation::device_uuid(&device_uuid)?;

    device_client.delete_device(&device_uuid).await?;
    Ok(Json(MessageResponse::device_deleted()))
}
