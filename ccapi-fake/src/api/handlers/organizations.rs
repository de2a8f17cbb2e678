//! Organization handlers

use super::{
    created, list_collection, list_related, parse_body, CreatedResult, DocumentResult,
    ListParams, ListResult,
};
use crate::api::error::FakeError;
use crate::api::FakeState;
use crate::resources::ORGANIZATION_USERS;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ccapi_core::documents::{
    CreateOrganizationRequest, OrganizationEntity, SpaceEntity, UpdateOrganizationRequest,
    UserEntity,
};
use ccapi_core::{QueryFilter, ResourceKind};
use tracing::{debug, info};

/// Lists organizations.
///
/// # Endpoint
///
/// `GET /v2/organizations`
pub(crate) async fn list(
    State(state): State<FakeState>,
    Query(params): Query<ListParams>,
) -> ListResult<OrganizationEntity> {
    debug!("Request: GET /v2/organizations");
    list_collection(&state, &state.organizations, params).await
}

/// Creates an organization.
///
/// `status` defaults to `active`, `billing_enabled` to false.
///
/// # Endpoint
///
/// `POST /v2/organizations`
pub(crate) async fn create(
    State(state): State<FakeState>,
    body: Bytes,
) -> CreatedResult<OrganizationEntity> {
    debug!("Request: POST /v2/organizations");

    let request: CreateOrganizationRequest = parse_body(&body)?;
    let record = state.organizations.create(request.into_entity()).await;

    info!("Created organization {} ({})", record.entity.name, record.guid);
    Ok(created(&record))
}

/// Gets a single organization.
///
/// # Endpoint
///
/// `GET /v2/organizations/:guid`
pub(crate) async fn get(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> DocumentResult<OrganizationEntity> {
    debug!("Request: GET /v2/organizations/{}", guid);

    state
        .organizations
        .get(&guid)
        .await
        .map(|record| Json(record.to_document()))
        .ok_or_else(|| FakeError::not_found(ResourceKind::Organization, &guid))
}

/// Updates an organization.
///
/// # Endpoint
///
/// `PUT /v2/organizations/:guid`
pub(crate) async fn update(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> CreatedResult<OrganizationEntity> {
    debug!("Request: PUT /v2/organizations/{}", guid);

    let request: UpdateOrganizationRequest = parse_body(&body)?;
    let record = state
        .organizations
        .update(&guid, |entity| request.apply(entity))
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::Organization, &guid))?;

    info!("Updated organization {}", guid);
    Ok(created(&record))
}

/// Deletes an organization.
///
/// # Endpoint
///
/// `DELETE /v2/organizations/:guid`
pub(crate) async fn delete(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
) -> Result<StatusCode, FakeError> {
    debug!("Request: DELETE /v2/organizations/{}", guid);

    if !state.organizations.delete(&guid).await {
        return Err(FakeError::not_found(ResourceKind::Organization, &guid));
    }

    info!("Deleted organization {}", guid);
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the users of an organization.
///
/// # Endpoint
///
/// `GET /v2/organizations/:guid/users`
pub(crate) async fn list_users(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    Query(params): Query<ListParams>,
) -> ListResult<UserEntity> {
    debug!("Request: GET /v2/organizations/{}/users", guid);

    ensure_organization(&state, &guid).await?;

    let path = ResourceKind::Organization.relation_path(&guid, "users");
    let relation = QueryFilter::new(ORGANIZATION_USERS, guid);
    list_related(&state.users, &path, relation, params).await
}

/// Adds a user to an organization.
///
/// Responds with the organization document.
///
/// # Endpoint
///
/// `PUT /v2/organizations/:guid/users/:user_guid`
pub(crate) async fn associate_user(
    State(state): State<FakeState>,
    Path((guid, user_guid)): Path<(String, String)>,
) -> CreatedResult<OrganizationEntity> {
    debug!("Request: PUT /v2/organizations/{}/users/{}", guid, user_guid);

    let organization = state
        .organizations
        .get(&guid)
        .await
        .ok_or_else(|| FakeError::not_found(ResourceKind::Organization, &guid))?;

    if !state.users.link(ORGANIZATION_USERS, &guid, &user_guid).await {
        return Err(FakeError::not_found(ResourceKind::User, &user_guid));
    }

    info!("User {} added to organization {}", user_guid, guid);
    Ok(created(&organization))
}

/// Lists the spaces of an organization.
///
/// # Endpoint
///
/// `GET /v2/organizations/:guid/spaces`
pub(crate) async fn list_spaces(
    State(state): State<FakeState>,
    Path(guid): Path<String>,
    Query(params): Query<ListParams>,
) -> ListResult<SpaceEntity> {
    debug!("Request: GET /v2/organizations/{}/spaces", guid);

    ensure_organization(&state, &guid).await?;

    let path = ResourceKind::Organization.relation_path(&guid, "spaces");
    let relation = QueryFilter::new("organization_guid", guid);
    list_related(&state.spaces, &path, relation, params).await
}

async fn ensure_organization(state: &FakeState, guid: &str) -> Result<(), FakeError> {
    if state.organizations.contains(guid).await {
        Ok(())
    } else {
        Err(FakeError::not_found(ResourceKind::Organization, guid))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::handlers::test_support::{body_json, TestApp};
    use axum::http::{Method, StatusCode};
    use ccapi_core::documents::{SpaceEntity, UserEntity};

    async fn create_org(app: &TestApp, name: &str) -> String {
        let body = format!(r#"{{"name":"{}"}}"#, name);
        let response = app
            .send(Method::POST, "/v2/organizations", Some(&body))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["metadata"]["guid"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let app = TestApp::new();
        let guid = create_org(&app, "acme").await;

        let json = body_json(
            app.send(Method::GET, &format!("/v2/organizations/{}", guid), None)
                .await,
        )
        .await;
        assert_eq!(json["entity"]["name"], "acme");
        assert_eq!(json["entity"]["status"], "active");
        assert_eq!(json["entity"]["billing_enabled"], false);
    }

    #[tokio::test]
    async fn test_update_status() {
        let app = TestApp::new();
        let guid = create_org(&app, "acme").await;

        let response = app
            .send(
                Method::PUT,
                &format!("/v2/organizations/{}", guid),
                Some(r#"{"status":"suspended"}"#),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["entity"]["status"], "suspended");
        assert_eq!(json["entity"]["name"], "acme");
    }

    #[tokio::test]
    async fn test_users_and_spaces() {
        let app = TestApp::new();
        let org = create_org(&app, "acme").await;
        let user = app.state.users.create(UserEntity::default()).await.guid;
        app.state
            .spaces
            .create(SpaceEntity {
                name: "dev".to_string(),
                organization_guid: org.clone(),
            })
            .await;

        let response = app
            .send(
                Method::PUT,
                &format!("/v2/organizations/{}/users/{}", org, user),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(
            app.send(Method::GET, &format!("/v2/organizations/{}/users", org), None)
                .await,
        )
        .await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["resources"][0]["metadata"]["guid"], user.as_str());

        let json = body_json(
            app.send(Method::GET, &format!("/v2/users?q=organization_guid:{}", org), None)
                .await,
        )
        .await;
        assert_eq!(json["total_results"], 1);

        let json = body_json(
            app.send(Method::GET, &format!("/v2/organizations/{}/spaces", org), None)
                .await,
        )
        .await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["resources"][0]["entity"]["name"], "dev");
    }

    #[tokio::test]
    async fn test_nested_routes_for_unknown_organization() {
        let app = TestApp::new();

        for uri in ["/v2/organizations/nope/users", "/v2/organizations/nope/spaces"] {
            let response = app.send(Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
