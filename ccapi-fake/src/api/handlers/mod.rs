//! Request handlers for the fake Cloud Controller.
//!
//! # Handler Modules
//!
//! - [`organizations`] - organizations and their users/spaces
//! - [`spaces`] - spaces, developers and space-scoped service instances
//! - [`users`] - users, filterable by space or organization membership
//! - [`service_instances`] - service instances
//! - [`buildpacks`] - buildpacks
//!
//! All handlers follow a consistent pattern:
//! - Accept `State<FakeState>` and read/write a single [`ResourceStore`]
//! - Return `Result<_, FakeError>` so failures carry a Cloud Controller error document
//! - Shape records through [`Record::to_document`], the same schema the client decodes

pub mod buildpacks;
pub mod organizations;
pub mod service_instances;
pub mod spaces;
pub mod users;

use crate::api::error::FakeError;
use crate::api::FakeState;
use crate::store::{Record, Resource, ResourceStore};
use axum::{body::Bytes, http::StatusCode, Json};
use ccapi_core::documents::{Document, ListDocument};
use ccapi_core::QueryFilter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default page size when `results-per-page` is absent
pub(crate) const DEFAULT_RESULTS_PER_PAGE: usize = 50;

/// Largest accepted page size
pub(crate) const MAX_RESULTS_PER_PAGE: usize = 100;

/// Query parameters accepted by every collection endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    /// `field:value` filter
    pub q: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
    #[serde(rename = "results-per-page")]
    pub results_per_page: Option<usize>,
}

impl ListParams {
    fn filter(&self) -> Result<Option<QueryFilter>, FakeError> {
        self.q
            .as_deref()
            .map(QueryFilter::parse)
            .transpose()
            .map_err(FakeError::bad_query)
    }
}

pub(crate) type DocumentResult<E> = Result<Json<Document<E>>, FakeError>;
pub(crate) type CreatedResult<E> = Result<(StatusCode, Json<Document<E>>), FakeError>;
pub(crate) type ListResult<E> = Result<Json<ListDocument<E>>, FakeError>;

/// Serve a collection, honouring the `q` filter and pagination.
///
/// A filter on `<parent>_guid` naming a parent that does not exist is a 404,
/// not an empty list.
pub(crate) async fn list_collection<E>(
    state: &FakeState,
    store: &ResourceStore<E>,
    params: ListParams,
) -> ListResult<E>
where
    E: Resource + Serialize,
{
    let filter = params.filter()?;

    if let Some(filter) = &filter {
        if state.parent_exists(filter.field(), filter.value()).await == Some(false) {
            return Err(FakeError::not_found(
                parent_kind(filter.field()),
                filter.value(),
            ));
        }
    }

    let records = store.list(filter.as_ref()).await;
    let path = E::KIND.collection_path();
    Ok(Json(paginate(records, &path, filter.as_ref(), &params)))
}

/// Serve a nested collection such as `/v2/spaces/:guid/developers`.
///
/// The caller has already checked that the parent exists.
pub(crate) async fn list_related<E>(
    store: &ResourceStore<E>,
    path: &str,
    relation: QueryFilter,
    params: ListParams,
) -> ListResult<E>
where
    E: Resource + Serialize,
{
    let extra = params.filter()?;
    let records = store
        .list(Some(&relation))
        .await
        .into_iter()
        .filter(|record| {
            extra.as_ref().map_or(true, |f| {
                record.entity.field(f.field()).as_deref() == Some(f.value())
            })
        })
        .collect();

    Ok(Json(paginate(records, path, extra.as_ref(), &params)))
}

/// Slice records into one page of a list document
pub(crate) fn paginate<E: Clone>(
    records: Vec<Record<E>>,
    path: &str,
    filter: Option<&QueryFilter>,
    params: &ListParams,
) -> ListDocument<E> {
    let per_page = params
        .results_per_page
        .unwrap_or(DEFAULT_RESULTS_PER_PAGE)
        .clamp(1, MAX_RESULTS_PER_PAGE);
    let total_results = records.len();
    let total_pages = total_results.div_ceil(per_page);
    let page = params.page.unwrap_or(1).max(1);

    let page_url = |page: usize| {
        let mut url = format!("{}?", path);
        if let Some(filter) = filter {
            url.push_str(&format!("q={}&", urlencoding::encode(&filter.to_string())));
        }
        url.push_str(&format!("page={}&results-per-page={}", page, per_page));
        url
    };

    let prev_url = (page > 1).then(|| page_url(page - 1));
    let next_url = (page < total_pages).then(|| page_url(page + 1));

    let resources = records
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(Record::to_document)
        .collect();

    ListDocument {
        total_results,
        total_pages,
        prev_url,
        next_url,
        resources,
    }
}

/// Decode a JSON request body; an empty body decodes as `{}`
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, FakeError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };

    serde_json::from_slice(body)
        .map_err(|e| FakeError::bad_request(format!("Request invalid due to parse error: {}", e)))
}

/// 201 response carrying the record's document
pub(crate) fn created<E: Clone>(record: &Record<E>) -> (StatusCode, Json<Document<E>>) {
    (StatusCode::CREATED, Json(record.to_document()))
}

fn parent_kind(field: &str) -> ccapi_core::ResourceKind {
    match field {
        "organization_guid" => ccapi_core::ResourceKind::Organization,
        _ => ccapi_core::ResourceKind::Space,
    }
}
