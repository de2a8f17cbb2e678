//! API module for the fake Cloud Controller
//!
//! Contains the route table, shared state and error shaping.

pub(crate) mod handlers;

use crate::store::ResourceStore;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header::AUTHORIZATION, Method, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put, MethodRouter},
    Router,
};
use ccapi_core::documents::{
    BuildpackEntity, OrganizationEntity, ServiceInstanceEntity, SpaceEntity, UserEntity,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use self::error::FakeError;

/// Stores shared across all handlers
#[derive(Clone, Default)]
pub struct FakeState {
    pub organizations: Arc<ResourceStore<OrganizationEntity>>,
    pub spaces: Arc<ResourceStore<SpaceEntity>>,
    pub users: Arc<ResourceStore<UserEntity>>,
    pub service_instances: Arc<ResourceStore<ServiceInstanceEntity>>,
    pub buildpacks: Arc<ResourceStore<BuildpackEntity>>,
}

impl FakeState {
    /// Create empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the parent named by a `<parent>_guid` filter field exists.
    ///
    /// `None` means the field does not refer to a stored parent type.
    pub(crate) async fn parent_exists(&self, field: &str, guid: &str) -> Option<bool> {
        match field {
            "organization_guid" => Some(self.organizations.contains(guid).await),
            "space_guid" | "default_space_guid" => Some(self.spaces.contains(guid).await),
            _ => None,
        }
    }

    /// Drop every record in every store
    pub async fn reset(&self) {
        self.organizations.clear().await;
        self.spaces.clear().await;
        self.users.clear().await;
        self.service_instances.clear().await;
        self.buildpacks.clear().await;
    }
}

/// Create the fake API router with all endpoints
pub fn create_router(state: FakeState) -> Router {
    info!("Setting up fake Cloud Controller router...");

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)); // 1MB limit

    Router::new()
        // Organization endpoints
        .route(
            "/v2/organizations",
            strict(get(handlers::organizations::list).post(handlers::organizations::create)),
        )
        .route(
            "/v2/organizations/:guid",
            strict(
                get(handlers::organizations::get)
                    .put(handlers::organizations::update)
                    .delete(handlers::organizations::delete),
            ),
        )
        .route(
            "/v2/organizations/:guid/users",
            strict(get(handlers::organizations::list_users)),
        )
        .route(
            "/v2/organizations/:guid/users/:user_guid",
            strict(put(handlers::organizations::associate_user)),
        )
        .route(
            "/v2/organizations/:guid/spaces",
            strict(get(handlers::organizations::list_spaces)),
        )
        // Space endpoints
        .route(
            "/v2/spaces",
            strict(get(handlers::spaces::list).post(handlers::spaces::create)),
        )
        .route(
            "/v2/spaces/:guid",
            strict(
                get(handlers::spaces::get)
                    .put(handlers::spaces::update)
                    .delete(handlers::spaces::delete),
            ),
        )
        .route(
            "/v2/spaces/:guid/developers",
            strict(get(handlers::spaces::list_developers)),
        )
        .route(
            "/v2/spaces/:guid/developers/:user_guid",
            strict(
                put(handlers::spaces::associate_developer)
                    .delete(handlers::spaces::remove_developer),
            ),
        )
        .route(
            "/v2/spaces/:guid/service_instances",
            strict(get(handlers::spaces::list_service_instances)),
        )
        // User endpoints
        .route(
            "/v2/users",
            strict(get(handlers::users::list).post(handlers::users::create)),
        )
        .route(
            "/v2/users/:guid",
            strict(
                get(handlers::users::get)
                    .put(handlers::users::update)
                    .delete(handlers::users::delete),
            ),
        )
        // Service instance endpoints
        .route(
            "/v2/service_instances",
            strict(
                get(handlers::service_instances::list).post(handlers::service_instances::create),
            ),
        )
        .route(
            "/v2/service_instances/:guid",
            strict(
                get(handlers::service_instances::get)
                    .put(handlers::service_instances::update)
                    .delete(handlers::service_instances::delete),
            ),
        )
        // Buildpack endpoints
        .route(
            "/v2/buildpacks",
            strict(get(handlers::buildpacks::list).post(handlers::buildpacks::create)),
        )
        .route(
            "/v2/buildpacks/:guid",
            strict(
                get(handlers::buildpacks::get)
                    .put(handlers::buildpacks::update)
                    .delete(handlers::buildpacks::delete),
            ),
        )
        .fallback(unmatched_route)
        .layer(middleware::from_fn(require_bearer_token))
        .layer(middleware_stack)
        .with_state(state)
}

/// Close a route's method set so unregistered methods are treated like unknown paths
fn strict(route: MethodRouter<FakeState>) -> MethodRouter<FakeState> {
    route.fallback(unmatched_route)
}

/// Requests with no registered route are a test setup defect, so they abort the handler.
async fn unmatched_route(method: Method, uri: Uri) -> Response {
    error!("No route registered for {} {}", method, uri);
    panic!("fake Cloud Controller has no route for {} {}", method, uri.path());
}

/// Reject requests without a non-empty bearer token, like the real API does
async fn require_bearer_token(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());

    if !authorized {
        return FakeError::unauthorized().into_response();
    }

    next.run(request).await
}

/// Error handling utilities
pub(crate) mod error {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use ccapi_core::documents::ErrorDocument;
    use ccapi_core::{FilterError, ResourceKind};

    use tracing::warn;

    /// Error response carrying a Cloud Controller error document
    #[derive(Debug)]
    pub struct FakeError {
        pub status_code: StatusCode,
        pub document: ErrorDocument,
    }

    impl FakeError {
        /// Create a new API error
        pub fn new(status_code: StatusCode, document: ErrorDocument) -> Self {
            Self {
                status_code,
                document,
            }
        }

        /// 404 for an unknown GUID of the given kind
        pub fn not_found(kind: ResourceKind, guid: &str) -> Self {
            Self::new(
                StatusCode::NOT_FOUND,
                ErrorDocument::not_found(format!("The {} could not be found: {}", kind, guid)),
            )
        }

        /// 401 for a missing or empty bearer token
        pub fn unauthorized() -> Self {
            Self::new(StatusCode::UNAUTHORIZED, ErrorDocument::not_authenticated())
        }

        /// 400 for an unparsable `q` parameter
        pub fn bad_query(err: FilterError) -> Self {
            Self::new(
                StatusCode::BAD_REQUEST,
                ErrorDocument::bad_query_parameter(err.to_string()),
            )
        }

        /// 400 for an unparsable request body
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self::new(
                StatusCode::BAD_REQUEST,
                ErrorDocument::message_parse_error(message),
            )
        }
    }

    impl IntoResponse for FakeError {
        fn into_response(self) -> Response {
            warn!(
                "Fake API error {}: {} ({})",
                self.status_code, self.document.description, self.document.error_code
            );

            (self.status_code, Json(self.document)).into_response()
        }
    }
}
