//! Space handlers, including developer membership and space-scoped service instances

use super::{
    created, list_collection, list_related, parse_body, CreatedResult, DocumentResult,
    ListParams, ListResult,
};
use crate::api::error::FakeError;
use crate::api::FakeState;
use crate::resources::SPACE_DEVELOPERS;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ccapi_core::documents::{
    CreateSpaceRequest, ServiceInstanceEntity, SpaceEntity, UpdateSpaceRequest, UserEntity,
};
use ccapi_core::{QueryFilter, ResourceKind};
use tracing::{debug, info};

/// Lists spaces.
///
/// # Endpoint
///
/// `GET /v2/spaces`
pub(crate) async fn list(
    State(state): State<FakeState>,
    Query(params): Query<ListParams>,
) -> ListResult<SpaceEntity> {
    debug!("Request: GET /v2/spaces");
    list_collection(&state, &state.spaces, params).await
}

/// Creates a space. The owning organization is not checked.
///
/// # Endpoint
///
/// `POST /v2/spaces`
pub(crate) async fn create(
    State(state): State<FakeState>,
    body: Bytes,
) -> CreatedResult<SpaceEntity> {
    debug!("Request: POST /v2/spaces");

    let request: CreateSpaceRequest = parse_body(&body)?;
    let record = state.spaces.create(request.into_entity()).await;

    info!("Created space {} ({})", record.entity.name, record.guid);
    Ok(created(&record))
}

/// Gets a single space.
///
/// # Endpoint
///
/// `GET /v2/spaces/:guid`
pub(crate) async fn get(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> DocumentResult<SpaceEntity> {
    debug!("Request: GET /v2/spaces/{}", guid);

    match state.spaces.get(&guid).await {
        Some(record) => Ok(Json(record.to_document())),
        None => Err(FakeError::not_found(ResourceKind::Space, &guid)),
    }
}

/// Renames a space.
///
/// # Endpoint
///
/// `PUT /v2/spaces/:guid`
pub(crate) async fn update(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> CreatedResult<SpaceEntity> {
    debug!("Request: PUT /v2/spaces/{}", guid);

    let request: UpdateSpaceRequest = parse_body(&body)?;
    let record = state
        .spaces
        .update(&guid, |entity| request.apply(entity))
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::Space, &guid))?;

    info!("Updated space {}", guid);
    Ok(created(&record))
}

/// Deletes a space.
///
/// # Endpoint
///
/// `DELETE /v2/spaces/:guid`
pub(crate) async fn delete(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/spaces/{}", guid);

    if !state.spaces.delete(&guid).await {
        return Err(FakeError::not_found(ResourceKind::Space, &guid));
    }

    info!("Deleted space {}", guid);
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the developers of a space.
///
/// # Endpoint
///
/// `GET /v2/spaces/:guid/developers`
pub(crate) async fn list_developers(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    Query(params): Query<ListParams>,
) -> ListResult<UserEntity> {
    debug!("Request: GET /v2/spaces/{}/developers", guid);

    ensure_space(&state, &guid).await?;

    let path = ResourceKind::Space.relation_path(&guid, "developers");
    let relation = QueryFilter::new(SPACE_DEVELOPERS, guid);
    list_related(&state.users, &path, relation, params).await
}

/// Makes a user a developer of a space and returns the space.
///
/// # Endpoint
///
/// `PUT /v2/spaces/:guid/developers/:user_guid`
pub(crate) async fn associate_developer(
    State(state): State<FakeState>,
    Path((guid, user_guid)): Path<(String, String)>,
) -> CreatedResult<SpaceEntity> {
    debug!("Request: PUT /v2/spaces/{}/developers/{}", guid, user_guid);

    let space = state
        .spaces
        .get(&guid)
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::Space, &guid))?;

    if !state.users.link(SPACE_DEVELOPERS, &guid, &user_guid).await {
        return Err(FakeError::not_found(ResourceKind::User, &user_guid));
    }

    info!("User {} is now a developer of space {}", user_guid, guid);
    Ok(created(&space))
}

/// Removes a user from the developers of a space.
///
/// # Endpoint
///
/// `DELETE /v2/spaces/:guid/developers/:user_guid`
pub(crate) async fn remove_developer(
    State(state): State<FakeState>,
    Path((guid, user_guid)): Path<(String, String)>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/spaces/{}/developers/{}", guid, user_guid);

    ensure_space(&state, &guid).await?;

    if !state.users.unlink(SPACE_DEVELOPERS, &guid, &user_guid).await {
        return Err(FakeError::not_found(ResourceKind::User, &user_guid));
    }

    info!("User {} is no longer a developer of space {}", user_guid, guid);
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the service instances bound to a space.
///
/// # Endpoint
///
/// `GET /v2/spaces/:guid/service_instances`
pub(crate) async fn list_service_instances(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    Query(params): Query<ListParams>,
) -> ListResult<ServiceInstanceEntity> {
    debug!("Request: GET /v2/spaces/{}/service_instances", guid);

    ensure_space(&state, &guid).await?;

    let path = ResourceKind::Space.relation_path(&guid, "service_instances");
    let relation = QueryFilter::new("space_guid", guid);
    list_related(&state.service_instances, &path, relation, params).await
}

async fn ensure_space(state: &FakeState, guid: &str) -> Result<(), FakeError> {
    if state.spaces.contains(guid).await {
        Ok(())
    } else {
        Err(FakeError::not_found(ResourceKind::Space, guid))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{body_json, TestApp};
    use axum::http::{Method, StatusCode};
    use ccapi_core::documents::{ServiceInstanceEntity, SpaceEntity, UserEntity};

    async fn seeded_space(app: &TestApp) -> String {
        app.state
            .spaces
            .create(SpaceEntity {
                name: "dev".to_string(),
                organization_guid: "org-1".to_string(),
            })
            .await
            .guid
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = TestApp::new();

        let response = app
            .send(
                Method::POST,
                "/v2/spaces",
                Some(r#"{"name":"dev","organization_guid":"org-1"}"#),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["entity"]["organization_guid"], "org-1");

        let uri = json["metadata"]["url"].as_str().unwrap().to_string();
        let fetched = body_json(app.send(Method::GET, &uri, None).await).await;
        assert_eq!(fetched, json);
    }

    #[tokio::test]
    async fn test_list_by_organization() {
        let app = TestApp::new();
        seeded_space(&app).await;
        app.state
            .spaces
            .create(SpaceEntity {
                name: "prod".to_string(),
                organization_guid: "org-2".to_string(),
            })
            .await;

        // org-1 is not a stored organization, so filtering by it is a 404
        let response = app
            .send(Method::GET, "/v2/spaces?q=organization_guid:org-1", None)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(app.send(Method::GET, "/v2/spaces?q=name:prod", None).await).await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["resources"][0]["entity"]["organization_guid"], "org-2");
    }

    #[tokio::test]
    async fn test_developer_membership() {
        let app = TestApp::new();
        let space = seeded_space(&app).await;
        let user = app.state.users.create(UserEntity::default()).await.guid;

        let uri = format!("/v2/spaces/{}/developers/{}", space, user);
        let response = app.send(Method::PUT, &uri, None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["metadata"]["guid"], space.as_str());

        let list_uri = format!("/v2/spaces/{}/developers", space);
        let json = body_json(app.send(Method::GET, &list_uri, None).await).await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["resources"][0]["metadata"]["guid"], user.as_str());

        let users_uri = format!("/v2/users?q=space_guid:{}", space);
        let json = body_json(app.send(Method::GET, &users_uri, None).await).await;
        assert_eq!(json["total_results"], 1);

        let response = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let json = body_json(app.send(Method::GET, &list_uri, None).await).await;
        assert_eq!(json["total_results"], 0);

        let response = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_associate_unknown_parties() {
        let app = TestApp::new();
        let space = seeded_space(&app).await;
        let user = app.state.users.create(UserEntity::default()).await.guid;

        let response = app
            .send(
                Method::PUT,
                &format!("/v2/spaces/missing/developers/{}", user),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .send(
                Method::PUT,
                &format!("/v2/spaces/{}/developers/missing", space),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["description"], "The user could not be found: missing");
    }

    #[tokio::test]
    async fn test_list_service_instances() {
        let app = TestApp::new();
        let space = seeded_space(&app).await;
        for (name, space_guid) in [("db", space.as_str()), ("cache", "elsewhere")] {
            app.state
                .service_instances
                .create(ServiceInstanceEntity {
                    name: name.to_string(),
                    space_guid: space_guid.to_string(),
                    service_plan_guid: "plan".to_string(),
                    dashboard_url: None,
                })
                .await;
        }

        let uri = format!("/v2/spaces/{}/service_instances", space);
        let json = body_json(app.send(Method::GET, &uri, None).await).await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["resources"][0]["entity"]["name"], "db");

        let response = app
            .send(Method::GET, "/v2/spaces/missing/service_instances", None)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
