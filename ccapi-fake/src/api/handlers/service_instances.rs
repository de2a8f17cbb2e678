//! Service instance handlers

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
use ccapi_core::documents::{
    CreateServiceInstanceRequest, ServiceInstanceEntity, UpdateServiceInstanceRequest,
};
use ccapi_core::ResourceKind;
use tracing::{debug, info};

/// Lists service instances.
///
/// # Endpoint
///
/// `GET /v2/service_instances`
pub(crate) async fn list(
    State(state): State<FakeState>,
    Query(params): Query<ListParams>,
) -> ListResult<ServiceInstanceEntity> {
    debug!("Request: GET /v2/service_instances");
    list_collection(&state, &state.service_instances, params).await
}

/// Creates a service instance.
///
/// The space and plan are stored as given; neither is checked.
///
/// # Endpoint
///
/// `POST /v2/service_instances`
pub(crate) async fn create(
    State(state): State<FakeState>,
    body: Bytes,
) -> CreatedResult<ServiceInstanceEntity> {
    debug!("Request: POST /v2/service_instances");

    let request: CreateServiceInstanceRequest = parse_body(&body)?;
    let record = state.service_instances.create(request.into_entity()).await;

    info!(
        "Created service instance {} ({}) in space {}",
        record.entity.name, record.guid, record.entity.space_guid
    );
    Ok(created(&record))
}

/// Gets a single service instance.
///
/// # Endpoint
///
/// `GET /v2/service_instances/:guid`
pub(crate) async fn get(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> DocumentResult<ServiceInstanceEntity> {
    debug!("Request: GET /v2/service_instances/{}", guid);

    match state.service_instances.get(&guid).await {
        Some(record) => Ok(Json(record.to_document())),
        None => Err(FakeError::not_found(ResourceKind::ServiceInstance, &guid)),
    }
}

/// Updates a service instance.
///
/// # Endpoint
///
/// `PUT /v2/service_instances/:guid`
pub(crate) async fn update(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> CreatedResult<ServiceInstanceEntity> {
    debug!("Request: PUT /v2/service_instances/{}", guid);

    let request: UpdateServiceInstanceRequest = parse_body(&body)?;
    let record = state
        .service_instances
        .update(&guid, |entity| request.apply(entity))
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::ServiceInstance, &guid))?;

    Ok(created(&record))
}

/// Deletes a service instance.
///
/// # Endpoint
///
/// `DELETE /v2/service_instances/:guid`
pub(crate) async fn delete(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/service_instances/{}", guid);

    if !state.service_instances.delete(&guid).await {
        return Err(FakeError::not_found(ResourceKind::ServiceInstance, &guid));
    }

    info!("Deleted service instance {}", guid);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{body_json, TestApp};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_lifecycle() {
        let app = TestApp::new();

        let response = app
            .send(
                Method::POST,
                "/v2/service_instances",
                Some(r#"{"name":"db","space_guid":"s-1","service_plan_guid":"small"}"#),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let uri = json["metadata"]["url"].as_str().unwrap().to_string();
        assert!(uri.starts_with("/v2/service_instances/"));

        let response = app
            .send(Method::PUT, &uri, Some(r#"{"service_plan_guid":"large"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["entity"]["service_plan_guid"], "large");
        assert_eq!(json["entity"]["name"], "db");

        let response = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app.send(Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_requires_space() {
        let app = TestApp::new();

        let response = app
            .send(Method::POST, "/v2/service_instances", Some(r#"{"name":"db"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error_code"], "CF-MessageParseError");
    }
}
