//! Resource kinds and their canonical paths

use std::fmt;

/// API version prefix shared by every route
pub const API_PREFIX: &str = "/v2";

/// Resource types exposed by the v2 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Organization,
    Space,
    User,
    ServiceInstance,
    Buildpack,
}

impl ResourceKind {
    /// Plural path segment used in URLs (e.g. `service_instances`)
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Organization => "organizations",
            ResourceKind::Space => "spaces",
            ResourceKind::User => "users",
            ResourceKind::ServiceInstance => "service_instances",
            ResourceKind::Buildpack => "buildpacks",
        }
    }

    /// Singular, human-readable name used in error descriptions
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Organization => "organization",
            ResourceKind::Space => "space",
            ResourceKind::User => "user",
            ResourceKind::ServiceInstance => "service instance",
            ResourceKind::Buildpack => "buildpack",
        }
    }

    /// Collection path, `/v2/<plural>`
    pub fn collection_path(self) -> String {
        format!("{}/{}", API_PREFIX, self.plural())
    }

    /// Canonical resource URL, `/v2/<plural>/<guid>`.
    ///
    /// The GUID is percent-encoded as a single path segment, so `/`, `?`,
    /// `#` or `..` inside it cannot reach another route.
    pub fn resource_path(self, guid: &str) -> String {
        format!("{}/{}/{}", API_PREFIX, self.plural(), urlencoding::encode(guid))
    }

    /// Nested collection under a resource, `/v2/<plural>/<guid>/<relation>`
    pub fn relation_path(self, guid: &str, relation: &str) -> String {
        format!("{}/{}", self.resource_path(guid), relation)
    }

    /// One member of a nested collection, `/v2/<plural>/<guid>/<relation>/<member>`
    pub fn member_path(self, guid: &str, relation: &str, member_guid: &str) -> String {
        format!(
            "{}/{}",
            self.relation_path(guid, relation),
            urlencoding::encode(member_guid)
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(ResourceKind::Buildpack.collection_path(), "/v2/buildpacks");
        assert_eq!(
            ResourceKind::ServiceInstance.resource_path("abc-123"),
            "/v2/service_instances/abc-123"
        );
        assert_eq!(
            ResourceKind::Organization.resource_path("org"),
            "/v2/organizations/org"
        );
    }

    const ALL_KINDS: [ResourceKind; 5] = [
        ResourceKind::Organization,
        ResourceKind::Space,
        ResourceKind::User,
        ResourceKind::ServiceInstance,
        ResourceKind::Buildpack,
    ];

    #[test]
    fn test_guid_is_one_segment() {
        assert_eq!(
            ResourceKind::Buildpack.resource_path("a/b"),
            "/v2/buildpacks/a%2Fb"
        );
        assert_eq!(
            ResourceKind::Buildpack.resource_path("../organizations"),
            "/v2/buildpacks/..%2Forganizations"
        );
        assert_eq!(
            ResourceKind::User.resource_path("x?q=1#f"),
            "/v2/users/x%3Fq%3D1%23f"
        );
    }

    #[test]
    fn test_nested_paths() {
        assert_eq!(
            ResourceKind::Space.relation_path("s-1", "developers"),
            "/v2/spaces/s-1/developers"
        );
        assert_eq!(
            ResourceKind::Space.member_path("s-1", "developers", "u/1"),
            "/v2/spaces/s-1/developers/u%2F1"
        );
    }

    #[test]
    fn test_plurals_are_unique() {
        let mut plurals: Vec<_> = ALL_KINDS.iter().map(|k| k.plural()).collect();
        plurals.sort_unstable();
        plurals.dedup();
        assert_eq!(plurals.len(), ALL_KINDS.len());
    }
}
