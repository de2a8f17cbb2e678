//! Filterable fields of each entity type

use crate::store::Resource;
use ccapi_core::documents::{
    BuildpackEntity, OrganizationEntity, ServiceInstanceEntity, SpaceEntity, UserEntity,
};
use ccapi_core::ResourceKind;

/// Relation under which space developers are indexed in the user store
pub const SPACE_DEVELOPERS: &str = "space_guid";

/// Relation under which organization members are indexed in the user store
pub const ORGANIZATION_USERS: &str = "organization_guid";

impl Resource for OrganizationEntity {
    const KIND: ResourceKind = ResourceKind::Organization;

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "status" => Some(self.status.clone()),
            "billing_enabled" => Some(self.billing_enabled.to_string()),
            _ => None,
        }
    }
}

impl Resource for SpaceEntity {
    const KIND: ResourceKind = ResourceKind::Space;

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "organization_guid" => Some(self.organization_guid.clone()),
            _ => None,
        }
    }
}

impl Resource for UserEntity {
    const KIND: ResourceKind = ResourceKind::User;

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "admin" => Some(self.admin.to_string()),
            "active" => Some(self.active.to_string()),
            "default_space_guid" => self.default_space_guid.clone(),
            _ => None,
        }
    }
}

impl Resource for ServiceInstanceEntity {
    const KIND: ResourceKind = ResourceKind::ServiceInstance;

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "space_guid" => Some(self.space_guid.clone()),
            "service_plan_guid" => Some(self.service_plan_guid.clone()),
            _ => None,
        }
    }
}

impl Resource for BuildpackEntity {
    const KIND: ResourceKind = ResourceKind::Buildpack;

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "position" => Some(self.position.to_string()),
            "enabled" => Some(self.enabled.to_string()),
            "locked" => Some(self.locked.to_string()),
            "filename" => Some(self.filename.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buildpack_fields() {
        let entity = BuildpackEntity {
            name: "ruby".to_string(),
            position: 2,
            enabled: true,
            locked: false,
            filename: "ruby.zip".to_string(),
        };

        assert_eq!(entity.field("name").as_deref(), Some("ruby"));
        assert_eq!(entity.field("position").as_deref(), Some("2"));
        assert_eq!(entity.field("enabled").as_deref(), Some("true"));
        assert_eq!(entity.field("space_guid"), None);
    }

    #[test]
    fn test_unset_optional_field_never_matches() {
        let user = UserEntity::default();
        assert_eq!(user.field("default_space_guid"), None);
    }
}
