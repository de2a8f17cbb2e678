//! Typed resources returned by the services
//!
//! Each model flattens a `{metadata, entity}` document into one struct.

use ccapi_core::documents::{
    BuildpackEntity, Document, OrganizationEntity, ServiceInstanceEntity, SpaceEntity, UserEntity,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// A resource type that can be built from its API document
pub trait Model: From<Document<Self::Entity>> {
    type Entity: DeserializeOwned;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub status: String,
    pub billing_enabled: bool,
}

impl From<Document<OrganizationEntity>> for Organization {
    fn from(document: Document<OrganizationEntity>) -> Self {
        let Document { metadata, entity } = document;
        Self {
            guid: metadata.guid,
            url: metadata.url,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            name: entity.name,
            status: entity.status,
            billing_enabled: entity.billing_enabled,
        }
    }
}

impl Model for Organization {
    type Entity = OrganizationEntity;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub organization_guid: String,
}

impl From<Document<SpaceEntity>> for Space {
    fn from(document: Document<SpaceEntity>) -> Self {
        let Document { metadata, entity } = document;
        Self {
            guid: metadata.guid,
            url: metadata.url,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            name: entity.name,
            organization_guid: entity.organization_guid,
        }
    }
}

impl Model for Space {
    type Entity = SpaceEntity;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin: bool,
    pub active: bool,
    pub default_space_guid: Option<String>,
}

impl From<Document<UserEntity>> for User {
    fn from(document: Document<UserEntity>) -> Self {
        let Document { metadata, entity } = document;
        Self {
            guid: metadata.guid,
            url: metadata.url,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            admin: entity.admin,
            active: entity.active,
            default_space_guid: entity.default_space_guid,
        }
    }
}

impl Model for User {
    type Entity = UserEntity;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub space_guid: String,
    pub service_plan_guid: String,
    pub dashboard_url: Option<String>,
}

impl From<Document<ServiceInstanceEntity>> for ServiceInstance {
    fn from(document: Document<ServiceInstanceEntity>) -> Self {
        let Document { metadata, entity } = document;
        Self {
            guid: metadata.guid,
            url: metadata.url,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            name: entity.name,
            space_guid: entity.space_guid,
            service_plan_guid: entity.service_plan_guid,
            dashboard_url: entity.dashboard_url,
        }
    }
}

impl Model for ServiceInstance {
    type Entity = ServiceInstanceEntity;
}

/// A buildpack. `position` is passed through as given; ordering is the
/// server's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buildpack {
    pub guid: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub position: u32,
    pub enabled: bool,
    pub locked: bool,
    pub filename: String,
}

impl From<Document<BuildpackEntity>> for Buildpack {
    fn from(document: Document<BuildpackEntity>) -> Self {
        let Document { metadata, entity } = document;
        Self {
            guid: metadata.guid,
            url: metadata.url,
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            name: entity.name,
            position: entity.position,
            enabled: entity.enabled,
            locked: entity.locked,
            filename: entity.filename,
        }
    }
}

impl Model for Buildpack {
    type Entity = BuildpackEntity;
}
