//! Error types for the ccapi client
//!
//! Every failure surfaced by the request pipeline is one of a closed set of
//! kinds. Callers branch on [`CcError::kind`], never on message text.

use crate::documents::ErrorDocument;
use thiserror::Error;

/// Boxed error used for transport-level sources
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for Cloud Controller operations
#[derive(Error, Debug)]
pub enum CcError {
    /// The server answered 404
    #[error("Resource not found: {}", describe(.detail.as_ref(), .body))]
    NotFound {
        body: Vec<u8>,
        detail: Option<ErrorDocument>,
    },

    /// The server answered 401
    #[error("Unauthorized: {}", describe(.detail.as_ref(), .body))]
    Unauthorized {
        body: Vec<u8>,
        detail: Option<ErrorDocument>,
    },

    /// The server answered with a status outside the acceptable set
    #[error("Unexpected status {status}: {}", String::from_utf8_lossy(.body))]
    UnexpectedStatus { status: u16, body: Vec<u8> },

    /// Connection, DNS, TLS or other transport failure
    #[error("HTTP transport error: {0}")]
    HttpTransport(#[source] BoxError),

    /// The response arrived but its body could not be read
    #[error("Failed to read response body: {0}")]
    ResponseRead(#[source] BoxError),

    /// The response body is not the JSON document we expected
    #[error("Failed to decode response body: {source}")]
    ResponseBodyDecode {
        #[source]
        source: serde_json::Error,
        body: Vec<u8>,
    },

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    RequestBodyEncode(#[source] serde_json::Error),

    /// Invalid client configuration (malformed host, bad config file, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Discriminant of [`CcError`] for kind checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    UnexpectedStatus,
    HttpTransport,
    ResponseRead,
    ResponseBodyDecode,
    RequestBodyEncode,
    Configuration,
}

/// Result type alias for Cloud Controller operations
pub type Result<T> = std::result::Result<T, CcError>;

impl CcError {
    /// Build a NotFound error, keeping the body and any parsable error document
    pub fn not_found(body: Vec<u8>) -> Self {
        let detail = serde_json::from_slice(&body).ok();
        CcError::NotFound { body, detail }
    }

    /// Build an Unauthorized error, keeping the body and any parsable error document
    pub fn unauthorized(body: Vec<u8>) -> Self {
        let detail = serde_json::from_slice(&body).ok();
        CcError::Unauthorized { body, detail }
    }

    pub fn unexpected_status(status: u16, body: Vec<u8>) -> Self {
        CcError::UnexpectedStatus { status, body }
    }

    pub fn http_transport(err: impl Into<BoxError>) -> Self {
        CcError::HttpTransport(err.into())
    }

    pub fn response_read(err: impl Into<BoxError>) -> Self {
        CcError::ResponseRead(err.into())
    }

    pub fn response_body_decode(source: serde_json::Error, body: &[u8]) -> Self {
        CcError::ResponseBodyDecode {
            source,
            body: body.to_vec(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CcError::Configuration(message.into())
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CcError::NotFound { .. } => ErrorKind::NotFound,
            CcError::Unauthorized { .. } => ErrorKind::Unauthorized,
            CcError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            CcError::HttpTransport(_) => ErrorKind::HttpTransport,
            CcError::ResponseRead(_) => ErrorKind::ResponseRead,
            CcError::ResponseBodyDecode { .. } => ErrorKind::ResponseBodyDecode,
            CcError::RequestBodyEncode(_) => ErrorKind::RequestBodyEncode,
            CcError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status that produced this error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            CcError::NotFound { .. } => Some(404),
            CcError::Unauthorized { .. } => Some(401),
            CcError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            CcError::NotFound { body, .. }
            | CcError::Unauthorized { body, .. }
            | CcError::UnexpectedStatus { body, .. }
            | CcError::ResponseBodyDecode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Parsed error document for NotFound/Unauthorized responses
    pub fn detail(&self) -> Option<&ErrorDocument> {
        match self {
            CcError::NotFound { detail, .. } | CcError::Unauthorized { detail, .. } => {
                detail.as_ref()
            }
            _ => None,
        }
    }
}

fn describe(detail: Option<&ErrorDocument>, body: &[u8]) -> String {
    match detail {
        Some(doc) => format!("{} ({})", doc.description, doc.error_code),
        None => String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_parses_detail() {
        let body = br#"{"code":10000,"description":"Unknown request","error_code":"CF-NotFound"}"#;
        let err = CcError::not_found(body.to_vec());

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), Some(404));
        let detail = err.detail().expect("detail should parse");
        assert_eq!(detail.error_code, "CF-NotFound");
        assert_eq!(detail.code, 10000);
        assert_eq!(err.body(), Some(&body[..]));
    }

    #[test]
    fn test_not_found_without_detail() {
        let err = CcError::not_found(b"<html>gone</html>".to_vec());

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.detail().is_none());
        assert_eq!(format!("{}", err), "Resource not found: <html>gone</html>");
    }

    #[test]
    fn test_unauthorized_keeps_body() {
        let err = CcError::unauthorized(b"denied".to_vec());
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some(&b"denied"[..]));
    }

    #[test]
    fn test_unexpected_status() {
        let err = CcError::unexpected_status(500, b"boom".to_vec());
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(err.status(), Some(500));
        assert_eq!(format!("{}", err), "Unexpected status 500: boom");
    }

    #[test]
    fn test_decode_error_is_distinct() {
        let json_err = serde_json::from_str::<serde_json::Value>("%%%%").unwrap_err();
        let err = CcError::response_body_decode(json_err, b"%%%%");

        assert_eq!(err.kind(), ErrorKind::ResponseBodyDecode);
        assert_ne!(err.kind(), ErrorKind::HttpTransport);
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), Some(&b"%%%%"[..]));
    }

    #[test]
    fn test_error_display() {
        let err = CcError::configuration("host is empty");
        assert_eq!(format!("{}", err), "Configuration error: host is empty");

        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CcError::http_transport(io_err);
        assert_eq!(err.kind(), ErrorKind::HttpTransport);
        assert_eq!(format!("{}", err), "HTTP transport error: refused");
    }
}
