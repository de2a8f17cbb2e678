//! Document schema for the Cloud Controller v2 API
//!
//! These types are the single description of the wire contract. The fake
//! server encodes its responses with them and the client decodes with them,
//! so the two sides cannot drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-managed part of every resource document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Server-assigned identifier
    pub guid: String,
    /// Canonical URL, `/v2/<plural>/<guid>`
    pub url: String,
    /// Creation instant (UTC)
    pub created_at: DateTime<Utc>,
    /// Last update instant, `null` until the first update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Single resource document: `{"metadata": {...}, "entity": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document<E> {
    pub metadata: Metadata,
    pub entity: E,
}

/// Paginated collection document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocument<E> {
    pub total_results: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub prev_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    pub resources: Vec<Document<E>>,
}

/// Error body returned with 4xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub code: u32,
    pub description: String,
    pub error_code: String,
}

impl ErrorDocument {
    pub fn new(code: u32, description: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            error_code: error_code.into(),
        }
    }

    /// Body of a 404 response
    pub fn not_found(description: impl Into<String>) -> Self {
        Self::new(10000, description, "CF-NotFound")
    }

    /// Body of a 401 response
    pub fn not_authenticated() -> Self {
        Self::new(10002, "Authentication error", "CF-NotAuthenticated")
    }

    /// Body of a 400 response for an unparsable `q` parameter
    pub fn bad_query_parameter(description: impl Into<String>) -> Self {
        Self::new(1001, description, "CF-BadQueryParameter")
    }

    /// Body of a 400 response for an unparsable request body
    pub fn message_parse_error(description: impl Into<String>) -> Self {
        Self::new(1001, description, "CF-MessageParseError")
    }
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    pub status: String,
    pub billing_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    pub organization_guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
    pub admin: bool,
    pub active: bool,
    #[serde(default)]
    pub default_space_guid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstanceEntity {
    pub name: String,
    pub space_guid: String,
    pub service_plan_guid: String,
    #[serde(default)]
    pub dashboard_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackEntity {
    pub name: String,
    pub position: u32,
    pub enabled: bool,
    pub locked: bool,
    pub filename: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Organization creation request. Omitted fields take the server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_enabled: Option<bool>,
}

impl CreateOrganizationRequest {
    pub fn into_entity(self) -> OrganizationEntity {
        OrganizationEntity {
            name: self.name,
            status: self.status.unwrap_or_else(|| "active".to_string()),
            billing_enabled: self.billing_enabled.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_enabled: Option<bool>,
}

impl UpdateOrganizationRequest {
    pub fn apply(self, entity: &mut OrganizationEntity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(status) = self.status {
            entity.status = status;
        }
        if let Some(billing_enabled) = self.billing_enabled {
            entity.billing_enabled = billing_enabled;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    pub organization_guid: String,
}

impl CreateSpaceRequest {
    pub fn into_entity(self) -> SpaceEntity {
        SpaceEntity {
            name: self.name,
            organization_guid: self.organization_guid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSpaceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UpdateSpaceRequest {
    pub fn apply(self, entity: &mut SpaceEntity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
    }
}

/// User creation request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_space_guid: Option<String>,
}

impl CreateUserRequest {
    pub fn into_entity(self) -> UserEntity {
        UserEntity {
            admin: self.admin.unwrap_or(false),
            active: self.active.unwrap_or(false),
            default_space_guid: self.default_space_guid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_space_guid: Option<String>,
}

impl UpdateUserRequest {
    pub fn apply(self, entity: &mut UserEntity) {
        if let Some(admin) = self.admin {
            entity.admin = admin;
        }
        if let Some(active) = self.active {
            entity.active = active;
        }
        if self.default_space_guid.is_some() {
            entity.default_space_guid = self.default_space_guid;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceInstanceRequest {
    pub name: String,
    pub space_guid: String,
    pub service_plan_guid: String,
}

impl CreateServiceInstanceRequest {
    pub fn into_entity(self) -> ServiceInstanceEntity {
        ServiceInstanceEntity {
            name: self.name,
            space_guid: self.space_guid,
            service_plan_guid: self.service_plan_guid,
            dashboard_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateServiceInstanceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan_guid: Option<String>,
}

impl UpdateServiceInstanceRequest {
    pub fn apply(self, entity: &mut ServiceInstanceEntity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(plan) = self.service_plan_guid {
            entity.service_plan_guid = plan;
        }
    }
}

/// Buildpack creation request
///
/// Omitted fields default to position 0, disabled, unlocked and no filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBuildpackRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl CreateBuildpackRequest {
    pub fn into_entity(self) -> BuildpackEntity {
        BuildpackEntity {
            name: self.name,
            position: self.position.unwrap_or(0),
            enabled: self.enabled.unwrap_or(false),
            locked: self.locked.unwrap_or(false),
            filename: self.filename.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBuildpackRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl UpdateBuildpackRequest {
    pub fn apply(self, entity: &mut BuildpackEntity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(position) = self.position {
            entity.position = position;
        }
        if let Some(enabled) = self.enabled {
            entity.enabled = enabled;
        }
        if let Some(locked) = self.locked {
            entity.locked = locked;
        }
        if let Some(filename) = self.filename {
            entity.filename = filename;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_shape() {
        let doc = Document {
            metadata: Metadata {
                guid: "abc".to_string(),
                url: "/v2/buildpacks/abc".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                updated_at: None,
            },
            entity: CreateBuildpackRequest {
                name: "ruby".to_string(),
                ..Default::default()
            }
            .into_entity(),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["metadata"]["guid"], "abc");
        assert_eq!(json["metadata"]["url"], "/v2/buildpacks/abc");
        assert_eq!(json["metadata"]["created_at"], "2024-05-01T12:00:00Z");
        assert!(json["metadata"]["updated_at"].is_null());
        assert_eq!(json["entity"]["name"], "ruby");
        assert_eq!(json["entity"]["position"], 0);
        assert_eq!(json["entity"]["enabled"], false);
        assert_eq!(json["entity"]["filename"], "");
    }

    #[test]
    fn test_missing_updated_at_decodes_as_none() {
        let json = r#"{"guid":"g","url":"/v2/spaces/g","created_at":"2024-05-01T12:00:00Z"}"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.updated_at, None);
    }

    #[test]
    fn test_create_request_omits_unset_options() {
        let request = CreateBuildpackRequest {
            name: "go".to_string(),
            position: Some(3),
            ..Default::default()
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"go","position":3}"#);
    }

    #[test]
    fn test_buildpack_defaults() {
        let entity = CreateBuildpackRequest {
            name: "my-buildpack".to_string(),
            ..Default::default()
        }
        .into_entity();

        assert_eq!(entity.position, 0);
        assert!(!entity.enabled);
        assert!(!entity.locked);
        assert!(entity.filename.is_empty());
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut entity = OrganizationEntity {
            name: "org".to_string(),
            status: "active".to_string(),
            billing_enabled: false,
        };

        UpdateOrganizationRequest {
            billing_enabled: Some(true),
            ..Default::default()
        }
        .apply(&mut entity);

        assert_eq!(entity.name, "org");
        assert_eq!(entity.status, "active");
        assert!(entity.billing_enabled);
    }

    #[test]
    fn test_error_documents() {
        let doc = ErrorDocument::not_found("The space could not be found: x");
        assert_eq!(doc.error_code, "CF-NotFound");
        assert_eq!(doc.code, 10000);

        let doc = ErrorDocument::not_authenticated();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("CF-NotAuthenticated"));
    }
}
