//! Cloud Controller v2 API client
//!
//! ```no_run
//! use ccapi_client::{Client, Config, CreateBuildpackOptions};
//!
//! # async fn example() -> ccapi_client::Result<()> {
//! let client = Client::new(&Config::new("https://api.example.com"))?;
//!
//! let buildpack = client
//!     .buildpacks
//!     .create("ruby", CreateBuildpackOptions::default(), "my-token")
//!     .await?;
//! println!("created {}", buildpack.url);
//! # Ok(())
//! # }
//! ```
//!
//! Every call takes the bearer token to send. Errors carry a kind
//! ([`ErrorKind`]) to branch on; a missing resource is always
//! `ErrorKind::NotFound`.

pub mod config;
pub mod list;
pub mod models;
pub mod network;
pub mod services;

pub use ccapi_core::{CcError, ErrorKind, QueryFilter, Result};
pub use config::{Config, ConfigBuilder};
pub use list::PagedList;
pub use models::{Buildpack, Organization, ServiceInstance, Space, User};
pub use services::{
    BuildpacksService, CreateBuildpackOptions, CreateUserOptions, OrganizationsService,
    ServiceInstancesService, SpacesService, UsersService,
};

use network::NetworkClient;

/// Entry point holding one service per resource type
#[derive(Debug, Clone)]
pub struct Client {
    pub organizations: OrganizationsService,
    pub spaces: SpacesService,
    pub users: UsersService,
    pub service_instances: ServiceInstancesService,
    pub buildpacks: BuildpacksService,
}

impl Client {
    /// Create a client; all services share one connection pool.
    pub fn new(config: &Config) -> Result<Self> {
        let network = NetworkClient::new(config)?;

        Ok(Self {
            organizations: OrganizationsService::new(network.clone()),
            spaces: SpacesService::new(network.clone()),
            users: UsersService::new(network.clone()),
            service_instances: ServiceInstancesService::new(network.clone()),
            buildpacks: BuildpacksService::new(network),
        })
    }
}
