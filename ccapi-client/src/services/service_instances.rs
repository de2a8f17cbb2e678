use super::{create_one, delete_one, get_one, resource_path, update_one};
use crate::list::PagedList;
use crate::models::ServiceInstance;
use crate::network::NetworkClient;
use ccapi_core::documents::{CreateServiceInstanceRequest, UpdateServiceInstanceRequest};
use ccapi_core::{QueryFilter, ResourceKind, Result};

/// Service instances: `/v2/service_instances`
#[derive(Debug, Clone)]
pub struct ServiceInstancesService {
    network: NetworkClient,
}

impl ServiceInstancesService {
    pub fn new(network: NetworkClient) -> Self {
        Self { network }
    }

    pub async fn create(
        &self,
        name: &str,
        space_guid: &str,
        service_plan_guid: &str,
        token: &str,
    ) -> Result<ServiceInstance> {
        let body = CreateServiceInstanceRequest {
            name: name.to_string(),
            space_guid: space_guid.to_string(),
            service_plan_guid: service_plan_guid.to_string(),
        };

        create_one(
            &self.network,
            &ResourceKind::ServiceInstance.collection_path(),
            &body,
            token,
        )
        .await
    }

    pub async fn get(&self, guid: &str, token: &str) -> Result<ServiceInstance> {
        get_one(&self.network, &resource_path(ResourceKind::ServiceInstance, guid)?, token).await
    }

    /// Rename an instance or move it to another plan
    pub async fn update(&self, instance: &ServiceInstance, token: &str) -> Result<ServiceInstance> {
        let body = UpdateServiceInstanceRequest {
            name: Some(instance.name.clone()),
            service_plan_guid: Some(instance.service_plan_guid.clone()),
        };

        update_one(
            &self.network,
            &resource_path(ResourceKind::ServiceInstance, &instance.guid)?,
            &body,
            token,
        )
        .await
    }

    pub async fn delete(&self, guid: &str, token: &str) -> Result<()> {
        delete_one(&self.network, &resource_path(ResourceKind::ServiceInstance, guid)?, token).await
    }

    pub async fn list(&self, token: &str) -> Result<PagedList<ServiceInstance>> {
        self.list_filtered(None, token).await
    }

    pub async fn list_filtered(
        &self,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<PagedList<ServiceInstance>> {
        PagedList::fetch(
            &self.network,
            &ResourceKind::ServiceInstance.collection_path(),
            filter,
            token,
        )
        .await
    }
}
