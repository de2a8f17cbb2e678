//! Request pipeline
//!
//! Every service call goes through [`NetworkClient::make_request`]: the body
//! is encoded, the URL resolved against the configured host, a bearer token
//! attached, and the response classified into either a [`Response`] or a
//! [`CcError`]. Decoding the body into a typed document is a separate step,
//! [`decode`].

use crate::config::Config;
use ccapi_core::{CcError, QueryFilter, Result};
use reqwest::{header::CONTENT_TYPE, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Largest body echoed by the trace output
const MAX_TRACE_BODY_LENGTH: usize = 4096;

/// A request to the Cloud Controller
///
/// `path` may carry its own query string, which is how the `next_url` of a
/// list document is followed.
#[derive(Debug)]
pub struct Request<'a, B = ()> {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    token: &'a str,
    body: Option<&'a B>,
    acceptable_status_codes: &'a [StatusCode],
}

impl<'a> Request<'a, ()> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            token: "",
            body: None,
            acceptable_status_codes: &[],
        }
    }
}

impl<'a, B: Serialize> Request<'a, B> {
    /// Attach a JSON body
    pub fn json<T: Serialize>(self, body: &'a T) -> Request<'a, T> {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            token: self.token,
            body: Some(body),
            acceptable_status_codes: self.acceptable_status_codes,
        }
    }

    /// Bearer token; an empty token is sent as-is
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = token;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Scope the request with a `q=field:value` filter
    pub fn filter(self, filter: &QueryFilter) -> Self {
        let (key, value) = filter.to_query_pair();
        self.query(key, value)
    }

    /// Statuses that count as success. Must not be empty.
    pub fn acceptable(mut self, codes: &'a [StatusCode]) -> Self {
        self.acceptable_status_codes = codes;
        self
    }
}

/// A response whose status was in the acceptable set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    /// Decode the body as JSON
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.body)
    }
}

/// HTTP transport bound to one [`Config`]
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    host: String,
    trace: bool,
}

impl NetworkClient {
    /// Create a client for the configured host.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.skip_verify_ssl)
            .user_agent(concat!("ccapi-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CcError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            host: config.host.clone(),
            trace: config.trace,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Send a request and classify the response.
    ///
    /// # Panics
    ///
    /// Panics if the request has no acceptable status codes; that is a bug in
    /// the caller, not a runtime condition.
    pub async fn make_request<B: Serialize>(&self, request: Request<'_, B>) -> Result<Response> {
        assert!(
            !request.acceptable_status_codes.is_empty(),
            "no acceptable status codes were given for {} {}",
            request.method,
            request.path
        );

        let body = request
            .body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(CcError::RequestBodyEncode)?;

        let url = self.resolve(&request.path, &request.query)?;

        debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .bearer_auth(request.token);
        if let Some(body) = &body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        if self.trace {
            print_request(&request.method, &url, body.as_deref());
        }

        let response = builder.send().await.map_err(CcError::http_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(CcError::response_read)?;

        if self.trace {
            print_response(status, &bytes);
        }

        debug!("{} {} -> {}", request.method, url.path(), status);
        classify(status, bytes.to_vec(), request.acceptable_status_codes)
    }

    /// Join `path` (and any query string it carries) onto the host, then
    /// append `query`.
    fn resolve(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let base = Url::parse(&self.host)
            .map_err(|e| CcError::configuration(format!("Invalid host '{}': {}", self.host, e)))?;
        if base.cannot_be_a_base() {
            return Err(CcError::configuration(format!(
                "Invalid host '{}': not a base URL",
                self.host
            )));
        }

        let mut url = base
            .join(path)
            .map_err(|e| CcError::configuration(format!("Invalid path '{}': {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

/// Map a received status onto success or an error kind.
///
/// Order matters: 404 and 401 are reported as such even when the caller
/// listed them as acceptable.
pub fn classify(status: StatusCode, body: Vec<u8>, acceptable: &[StatusCode]) -> Result<Response> {
    match status {
        StatusCode::NOT_FOUND => Err(CcError::not_found(body)),
        StatusCode::UNAUTHORIZED => Err(CcError::unauthorized(body)),
        status if acceptable.contains(&status) => Ok(Response { status, body }),
        status => Err(CcError::unexpected_status(status.as_u16(), body)),
    }
}

/// Decode a JSON body, keeping the raw bytes on failure
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| CcError::response_body_decode(e, body))
}

fn print_request(method: &Method, url: &Url, body: Option<&[u8]>) {
    println!("\nREQUEST: {} {}", method, url);
    println!("Authorization: Bearer [REDACTED]");
    if let Some(body) = body {
        println!("{}", sanitize_for_trace(body));
    }
}

fn print_response(status: StatusCode, body: &[u8]) {
    println!("\nRESPONSE: {}\n{}", status, sanitize_for_trace(body));
}

fn sanitize_for_trace(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() > MAX_TRACE_BODY_LENGTH {
        let cut = (0..=MAX_TRACE_BODY_LENGTH)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &text[..cut], body.len())
    } else {
        text.into_owned()
    }
}
