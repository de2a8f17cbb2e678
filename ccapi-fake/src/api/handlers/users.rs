//! User handlers
//!
//! `GET /v2/users?q=space_guid:<guid>` and `q=organization_guid:<guid>` are
//! answered from the membership links created through the space and
//! organization association routes.

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
use ccapi_core::documents::{CreateUserRequest, UpdateUserRequest, UserEntity};
use ccapi_core::ResourceKind;
use tracing::{debug, info};

/// Lists users.
///
/// # Endpoint
///
/// `GET /v2/users`
pub(crate) async fn list(
    State(state): State<FakeState>,
    Query(params): Query<ListParams>,
) -> ListResult<UserEntity> {
    debug!("Request: GET /v2/users");
    list_collection(&state, &state.users, params).await
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /v2/users`
pub(crate) async fn create(
    State(state): State<FakeState>,
    body: Bytes,
) -> CreatedResult<UserEntity> {
    debug!("Request: POST /v2/users");

    let request: CreateUserRequest = parse_body(&body)?;
    let record = state.users.create(request.into_entity()).await;

    info!("Created user {}", record.guid);
    Ok(created(&record))
}

/// Gets a single user.
///
/// # Endpoint
///
/// `GET /v2/users/:guid`
pub(crate) async fn get(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> DocumentResult<UserEntity> {
    debug!("Request: GET /v2/users/{}", guid);

    state
        .users
        .get(&guid)
        .await
        .map(|record| Json(record.to_document()))
        .ok_or_else(|| FakeError::not_found(ResourceKind::User, &guid))
}

/// Updates a user.
///
/// # Endpoint
///
/// `PUT /v2/users/:guid`
pub(crate) async fn update(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> CreatedResult<UserEntity> {
    debug!("Request: PUT /v2/users/{}", guid);

    let request: UpdateUserRequest = parse_body(&body)?;
    let record = state
        .users
        .update(&guid, |entity| request.apply(entity))
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::User, &guid))?;

    Ok(created(&record))
}

/// Deletes a user.
///
/// Also drops the user's space and organization memberships.
///
/// # Endpoint
///
/// `DELETE /v2/users/:guid`
pub(crate) async fn delete(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/users/{}", guid);

    if !state.users.delete(&guid).await {
        return Err(FakeError::not_found(ResourceKind::User, &guid));
    }

    info!("Deleted user {}", guid);
    Ok(StatusCode::NO_CONTENT)
}
