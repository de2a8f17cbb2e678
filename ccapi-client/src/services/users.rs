use super::{create_one, delete_one, get_one, resource_path, update_one};
use crate::list::PagedList;
use crate::models::User;
use crate::network::NetworkClient;
use ccapi_core::documents::{CreateUserRequest, UpdateUserRequest};
use ccapi_core::{QueryFilter, ResourceKind, Result};

/// Optional fields for [`UsersService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserOptions {
    pub admin: Option<bool>,
    pub active: Option<bool>,
    pub default_space_guid: Option<String>,
}

/// Users: `/v2/users`
///
/// GUIDs are assigned by the server.
#[derive(Debug, Clone)]
pub struct UsersService {
    network: NetworkClient,
}

impl UsersService {
    pub fn new(network: NetworkClient) -> Self {
        Self { network }
    }

    pub async fn create(&self, options: CreateUserOptions, token: &str) -> Result<User> {
        let body = CreateUserRequest {
            admin: options.admin,
            active: options.active,
            default_space_guid: options.default_space_guid,
        };

        create_one(&self.network, &ResourceKind::User.collection_path(), &body, token).await
    }

    pub async fn get(&self, guid: &str, token: &str) -> Result<User> {
        get_one(&self.network, &resource_path(ResourceKind::User, guid)?, token).await
    }

    /// Write `user` back. An unset `default_space_guid` leaves the stored one as is.
    pub async fn update(&self, user: &User, token: &str) -> Result<User> {
        let body = UpdateUserRequest {
            admin: Some(user.admin),
            active: Some(user.active),
            default_space_guid: user.default_space_guid.clone(),
        };

        update_one(
            &self.network,
            &resource_path(ResourceKind::User, &user.guid)?,
            &body,
            token,
        )
        .await
    }

    pub async fn delete(&self, guid: &str, token: &str) -> Result<()> {
        delete_one(&self.network, &resource_path(ResourceKind::User, guid)?, token).await
    }

    pub async fn list(&self, token: &str) -> Result<PagedList<User>> {
        self.list_filtered(None, token).await
    }

    /// List users matching `filter`, e.g. `space_guid:<guid>` for the
    /// developers of a space
    pub async fn list_filtered(
        &self,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<PagedList<User>> {
        PagedList::fetch(&self.network, &ResourceKind::User.collection_path(), filter, token).await
    }
}
