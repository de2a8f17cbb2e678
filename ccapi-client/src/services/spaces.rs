use super::{
    associate, create_one, delete_one, get_one, member_path, relation_path, resource_path,
    update_one,
};
use crate::list::PagedList;
use crate::models::{ServiceInstance, Space, User};
use crate::network::NetworkClient;
use ccapi_core::documents::{CreateSpaceRequest, UpdateSpaceRequest};
use ccapi_core::{QueryFilter, ResourceKind, Result};

/// Spaces: `/v2/spaces`, plus their developers and service instances
#[derive(Debug, Clone)]
pub struct SpacesService {
    network: NetworkClient,
}

impl SpacesService {
    pub fn new(network: NetworkClient) -> Self {
        Self { network }
    }

    /// Create a space in an organization
    pub async fn create(&self, name: &str, organization_guid: &str, token: &str) -> Result<Space> {
        let body = CreateSpaceRequest {
            name: name.to_string(),
            organization_guid: organization_guid.to_string(),
        };

        create_one(&self.network, &ResourceKind::Space.collection_path(), &body, token).await
    }

    pub async fn get(&self, guid: &str, token: &str) -> Result<Space> {
        get_one(&self.network, &resource_path(ResourceKind::Space, guid)?, token).await
    }

    /// Rename a space. The owning organization cannot be changed.
    pub async fn update(&self, space: &Space, token: &str) -> Result<Space> {
        let body = UpdateSpaceRequest {
            name: Some(space.name.clone()),
        };

        update_one(
            &self.network,
            &resource_path(ResourceKind::Space, &space.guid)?,
            &body,
            token,
        )
        .await
    }

    pub async fn delete(&self, guid: &str, token: &str) -> Result<()> {
        delete_one(&self.network, &resource_path(ResourceKind::Space, guid)?, token).await
    }

    pub async fn list(&self, token: &str) -> Result<PagedList<Space>> {
        self.list_filtered(None, token).await
    }

    pub async fn list_filtered(
        &self,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<PagedList<Space>> {
        PagedList::fetch(&self.network, &ResourceKind::Space.collection_path(), filter, token).await
    }

    /// Users of the space, through `GET /v2/users?q=space_guid:<guid>`.
    ///
    /// A space that does not exist is NotFound, not an empty list.
    pub async fn list_users(&self, guid: &str, token: &str) -> Result<PagedList<User>> {
        let filter = QueryFilter::new("space_guid", guid);
        PagedList::fetch(
            &self.network,
            &ResourceKind::User.collection_path(),
            Some(&filter),
            token,
        )
        .await
    }

    pub async fn list_developers(&self, guid: &str, token: &str) -> Result<PagedList<User>> {
        let path = relation_path(ResourceKind::Space, guid, "developers")?;
        PagedList::fetch(&self.network, &path, None, token).await
    }

    /// Make a user a developer of the space; returns the space
    pub async fn associate_developer(
        &self,
        guid: &str,
        user_guid: &str,
        token: &str,
    ) -> Result<Space> {
        let path = member_path(ResourceKind::Space, guid, "developers", user_guid)?;
        associate(&self.network, &path, token).await
    }

    pub async fn remove_developer(&self, guid: &str, user_guid: &str, token: &str) -> Result<()> {
        let path = member_path(ResourceKind::Space, guid, "developers", user_guid)?;
        delete_one(&self.network, &path, token).await
    }

    pub async fn list_service_instances(
        &self,
        guid: &str,
        token: &str,
    ) -> Result<PagedList<ServiceInstance>> {
        let path = relation_path(ResourceKind::Space, guid, "service_instances")?;
        PagedList::fetch(&self.network, &path, None, token).await
    }
}
