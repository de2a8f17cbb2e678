//! Per-resource service facades
//!
//! Services are thin: each method names a route and the statuses it accepts,
//! and lets the pipeline do the rest. Pipeline errors are returned unchanged.

mod buildpacks;
mod organizations;
mod service_instances;
mod spaces;
mod users;

pub use buildpacks::{BuildpacksService, CreateBuildpackOptions};
pub use organizations::OrganizationsService;
pub use service_instances::ServiceInstancesService;
pub use spaces::SpacesService;
pub use users::{CreateUserOptions, UsersService};

use crate::models::Model;
use crate::network::{NetworkClient, Request};
use ccapi_core::documents::Document;
use ccapi_core::{CcError, ResourceKind, Result};
use reqwest::{Method, StatusCode};
use serde::Serialize;

/// Path of one resource.
///
/// An empty GUID, or one that is a dot segment, names no resource and would
/// otherwise resolve to another route, so it is NotFound without a round trip.
fn resource_path(kind: ResourceKind, guid: &str) -> Result<String> {
    require_guid(guid)?;
    Ok(kind.resource_path(guid))
}

fn relation_path(kind: ResourceKind, guid: &str, relation: &str) -> Result<String> {
    require_guid(guid)?;
    Ok(kind.relation_path(guid, relation))
}

fn member_path(
    kind: ResourceKind,
    guid: &str,
    relation: &str,
    member_guid: &str,
) -> Result<String> {
    require_guid(guid)?;
    require_guid(member_guid)?;
    Ok(kind.member_path(guid, relation, member_guid))
}

fn require_guid(guid: &str) -> Result<()> {
    if matches!(guid, "" | "." | "..") {
        return Err(CcError::not_found(Vec::new()));
    }
    Ok(())
}

/// `GET` a single document
async fn get_one<T: Model>(network: &NetworkClient, path: &str, token: &str) -> Result<T> {
    let request = Request::new(Method::GET, path)
        .token(token)
        .acceptable(&[StatusCode::OK]);

    let document: Document<T::Entity> = network.make_request(request).await?.decode()?;
    Ok(T::from(document))
}

/// Send `body` and decode the document in the reply
async fn send_one<T: Model, B: Serialize>(
    network: &NetworkClient,
    method: Method,
    path: &str,
    body: Option<&B>,
    token: &str,
    acceptable: &[StatusCode],
) -> Result<T> {
    let request = Request::new(method, path).token(token).acceptable(acceptable);
    let response = match body {
        Some(body) => network.make_request(request.json(body)).await?,
        None => network.make_request(request).await?,
    };

    let document: Document<T::Entity> = response.decode()?;
    Ok(T::from(document))
}

/// `POST` a creation request, expecting 201
async fn create_one<T: Model, B: Serialize>(
    network: &NetworkClient,
    path: &str,
    body: &B,
    token: &str,
) -> Result<T> {
    send_one(network, Method::POST, path, Some(body), token, &[StatusCode::CREATED]).await
}

/// `PUT` an update, expecting 201 (or 200 from servers that answer that way)
async fn update_one<T: Model, B: Serialize>(
    network: &NetworkClient,
    path: &str,
    body: &B,
    token: &str,
) -> Result<T> {
    send_one(
        network,
        Method::PUT,
        path,
        Some(body),
        token,
        &[StatusCode::CREATED, StatusCode::OK],
    )
    .await
}

/// `PUT` an association without a body; the reply is the parent document
async fn associate<T: Model>(network: &NetworkClient, path: &str, token: &str) -> Result<T> {
    send_one::<T, ()>(
        network,
        Method::PUT,
        path,
        None,
        token,
        &[StatusCode::CREATED, StatusCode::OK],
    )
    .await
}

/// `DELETE`, expecting 204
async fn delete_one(network: &NetworkClient, path: &str, token: &str) -> Result<()> {
    let request = Request::new(Method::DELETE, path)
        .token(token)
        .acceptable(&[StatusCode::NO_CONTENT]);

    network.make_request(request).await?;
    Ok(())
}
