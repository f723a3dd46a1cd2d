use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A crawl submission settled. `Err` means no response arrived.
    SubmitFinished(Result<SubmitReply, ApiError>),
    /// The status endpoint returned an array; rows are passed through untouched.
    StatusSnapshot(Vec<Value>),
    /// The status endpoint returned JSON that was not an array.
    StatusIgnored,
    /// A status request failed; the next attempt fires after `retry_in`.
    PollFailed { error: ApiError, retry_in: Duration },
}

/// A submission that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    /// Present when the server answered with a non-success status.
    pub http_status: Option<u16>,
    /// Truthiness of the decoded reply, or why the body could not be read.
    pub outcome: Result<bool, ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusReply {
    Rows(Vec<Value>),
    NotAnArray,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not be built, e.g. an unusable endpoint.
    InvalidRequest,
    Network,
    Timeout,
    /// A redirect came back while redirects are disabled.
    UnexpectedRedirect(u16),
    /// The body was not JSON.
    MalformedResponse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidRequest => write!(f, "invalid request"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::UnexpectedRedirect(code) => write!(f, "unexpected redirect {code}"),
            ApiErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
