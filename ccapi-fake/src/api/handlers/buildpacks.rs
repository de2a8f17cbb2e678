//! Buildpack handlers

use super::{
    created, list_collection, parse_body, CreatedResult, DocumentResult, ListParams, ListResult,
};
use crate::api::error::FakeError;
use crate::api::FakeState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ccapi_core::documents::{BuildpackEntity, CreateBuildpackRequest, UpdateBuildpackRequest};
use ccapi_core::ResourceKind;
use tracing::{debug, info};

/// Lists buildpacks.
///
/// # Endpoint
///
/// `GET /v2/buildpacks`
pub(crate) async fn list(
    State(state): State<FakeState>,
    Query(params): Query<ListParams>,
) -> ListResult<BuildpackEntity> {
    debug!("Request: GET /v2/buildpacks");
    list_collection(&state, &state.buildpacks, params).await
}

/// Creates a buildpack.
///
/// Only `name` is required. `position` defaults to 0, `enabled` and `locked`
/// to false, `filename` to the empty string.
///
/// # Endpoint
///
/// `POST /v2/buildpacks`
pub(crate) async fn create(
    State(state): State<FakeState>,
    body: Bytes,
) -> CreatedResult<BuildpackEntity> {
    debug!("Request: POST /v2/buildpacks");

    let request: CreateBuildpackRequest = parse_body(&body)?;
    let record = state.buildpacks.create(request.into_entity()).await;

    info!("Created buildpack {} ({})", record.entity.name, record.guid);
    Ok(created(&record))
}

/// Gets a single buildpack.
///
/// # Endpoint
///
/// `GET /v2/buildpacks/:guid`
pub(crate) async fn get(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> DocumentResult<BuildpackEntity> {
    debug!("Request: GET /v2/buildpacks/{}", guid);

    match state.buildpacks.get(&guid).await {
        Some(record) => Ok(Json(record.to_document())),
        None => Err(FakeError::not_found(ResourceKind::Buildpack, &guid)),
    }
}

/// Updates a buildpack; fields absent from the body are left unchanged.
///
/// # Endpoint
///
/// `PUT /v2/buildpacks/:guid`
pub(crate) async fn update(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> CreatedResult<BuildpackEntity> {
    debug!("Request: PUT /v2/buildpacks/{}", guid);

    let request: UpdateBuildpackRequest = parse_body(&body)?;
    let record = state
        .buildpacks
        .update(&guid, |entity| request.apply(entity))
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::Buildpack, &guid))?;

    info!("Updated buildpack {}", guid);
    Ok(created(&record))
}

/// Deletes a buildpack.
///
/// # Endpoint
///
/// `DELETE /v2/buildpacks/:guid`
pub(crate) async fn delete(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/buildpacks/{}", guid);

    if !state.buildpacks.delete(&guid).await {
        return Err(FakeError::not_found(ResourceKind::Buildpack, &guid));
    }

    info!("Deleted buildpack {}", guid);
    Ok(StatusCode::NO_CONTENT)
}
