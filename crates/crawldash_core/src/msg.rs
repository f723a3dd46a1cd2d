use thiserror::Error;

use crate::JobRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Operator typed or pasted one more line of URL input.
    InputAppended(String),
    /// Operator discarded the pending URL input.
    InputCleared,
    /// Operator asked to submit the pending URL input.
    UrlsSubmitted,
    /// Operator confirmed a new endpoint.
    EndpointSubmitted(String),
    /// Operator entered a new comment limit.
    LimitSubmitted(String),
    /// Operator set (`Some`) or cleared (`None`) the table filter.
    FilterChanged(Option<String>),
    /// A crawl submission settled.
    SubmitFinished(SubmitResult),
    /// The status endpoint returned an array of job records.
    StatusReceived {
        rows: Vec<JobRecord>,
        received_at: String,
    },
    /// The status endpoint returned JSON that was not an array.
    StatusIgnored { received_at: String },
    /// A status request failed and will be retried.
    PollFailed { message: String },
    /// Periodic wake-up from the platform loop.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one crawl submission as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// Set when the server answered with a non-success status.
    pub http_status: Option<u16>,
    /// `Ok(true)` when crawling started, `Ok(false)` when the server refused.
    pub outcome: Result<bool, SubmissionError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
