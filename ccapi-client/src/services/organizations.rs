use super::{
    associate, create_one, delete_one, get_one, member_path, relation_path, resource_path,
    update_one,
};
use crate::list::PagedList;
use crate::models::{Organization, Space, User};
use crate::network::NetworkClient;
use ccapi_core::documents::{CreateOrganizationRequest, UpdateOrganizationRequest};
use ccapi_core::{QueryFilter, ResourceKind, Result};

/// Organizations: `/v2/organizations`, plus their users and spaces
#[derive(Debug, Clone)]
pub struct OrganizationsService {
    network: NetworkClient,
}

impl OrganizationsService {
    pub fn new(network: NetworkClient) -> Self {
        Self { network }
    }

    /// Create an active organization with billing disabled
    pub async fn create(&self, name: &str, token: &str) -> Result<Organization> {
        let body = CreateOrganizationRequest {
            name: name.to_string(),
            ..Default::default()
        };

        create_one(
            &self.network,
            &ResourceKind::Organization.collection_path(),
            &body,
            token,
        )
        .await
    }

    pub async fn get(&self, guid: &str, token: &str) -> Result<Organization> {
        get_one(&self.network, &resource_path(ResourceKind::Organization, guid)?, token).await
    }

    pub async fn update(&self, organization: &Organization, token: &str) -> Result<Organization> {
        let body = UpdateOrganizationRequest {
            name: Some(organization.name.clone()),
            status: Some(organization.status.clone()),
            billing_enabled: Some(organization.billing_enabled),
        };

        update_one(
            &self.network,
            &resource_path(ResourceKind::Organization, &organization.guid)?,
            &body,
            token,
        )
        .await
    }

    pub async fn delete(&self, guid: &str, token: &str) -> Result<()> {
        delete_one(&self.network, &resource_path(ResourceKind::Organization, guid)?, token).await
    }

    pub async fn list(&self, token: &str) -> Result<PagedList<Organization>> {
        self.list_filtered(None, token).await
    }

    pub async fn list_filtered(
        &self,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<PagedList<Organization>> {
        PagedList::fetch(
            &self.network,
            &ResourceKind::Organization.collection_path(),
            filter,
            token,
        )
        .await
    }

    pub async fn list_users(&self, guid: &str, token: &str) -> Result<PagedList<User>> {
        let path = relation_path(ResourceKind::Organization, guid, "users")?;
        PagedList::fetch(&self.network, &path, None, token).await
    }

    /// Add a user to the organization; returns the organization
    pub async fn associate_user(
        &self,
        guid: &str,
        user_guid: &str,
        token: &str,
    ) -> Result<Organization> {
        let path = member_path(ResourceKind::Organization, guid, "users", user_guid)?;
        associate(&self.network, &path, token).await
    }

    pub async fn list_spaces(&self, guid: &str, token: &str) -> Result<PagedList<Space>> {
        let path = relation_path(ResourceKind::Organization, guid, "spaces")?;
        PagedList::fetch(&self.network, &path, None, token).await
    }
}
