use super::{create_one, delete_one, get_one, resource_path, update_one};
use crate::list::PagedList;
use crate::models::Buildpack;
use crate::network::NetworkClient;
use ccapi_core::documents::{CreateBuildpackRequest, UpdateBuildpackRequest};
use ccapi_core::{QueryFilter, ResourceKind, Result};

/// Optional fields for [`BuildpacksService::create`]; unset fields take the
/// server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBuildpackOptions {
    pub position: Option<u32>,
    pub enabled: Option<bool>,
    pub locked: Option<bool>,
    pub filename: Option<String>,
}

/// Buildpacks: `/v2/buildpacks`
#[derive(Debug, Clone)]
pub struct BuildpacksService {
    network: NetworkClient,
}

impl BuildpacksService {
    pub fn new(network: NetworkClient) -> Self {
        Self { network }
    }

    pub async fn create(
        &self,
        name: &str,
        options: CreateBuildpackOptions,
        token: &str,
    ) -> Result<Buildpack> {
        let body = CreateBuildpackRequest {
            name: name.to_string(),
            position: options.position,
            enabled: options.enabled,
            locked: options.locked,
            filename: options.filename,
        };

        create_one(&self.network, &ResourceKind::Buildpack.collection_path(), &body, token).await
    }

    pub async fn get(&self, guid: &str, token: &str) -> Result<Buildpack> {
        get_one(&self.network, &resource_path(ResourceKind::Buildpack, guid)?, token).await
    }

    /// Write every field of `buildpack` back to the server
    pub async fn update(&self, buildpack: &Buildpack, token: &str) -> Result<Buildpack> {
        let body = UpdateBuildpackRequest {
            name: Some(buildpack.name.clone()),
            position: Some(buildpack.position),
            enabled: Some(buildpack.enabled),
            locked: Some(buildpack.locked),
            filename: Some(buildpack.filename.clone()),
        };

        update_one(
            &self.network,
            &resource_path(ResourceKind::Buildpack, &buildpack.guid)?,
            &body,
            token,
        )
        .await
    }

    pub async fn delete(&self, guid: &str, token: &str) -> Result<()> {
        delete_one(&self.network, &resource_path(ResourceKind::Buildpack, guid)?, token).await
    }

    pub async fn list(&self, token: &str) -> Result<PagedList<Buildpack>> {
        self.list_filtered(None, token).await
    }

    pub async fn list_filtered(
        &self,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<PagedList<Buildpack>> {
        PagedList::fetch(
            &self.network,
            &ResourceKind::Buildpack.collection_path(),
            filter,
            token,
        )
        .await
    }
}
