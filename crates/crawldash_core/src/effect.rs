use std::fmt;

use crate::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the batch to `{endpoint}/crawl?limit={limit}`.
    SubmitCrawl { urls: Vec<String>, limit: u32 },
    /// Persist the endpoint and route all later requests to it.
    ApplyEndpoint(Endpoint),
    /// Show a message to the operator.
    Alert(Notice),
}

/// Operator-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EndpointSaved,
    InvalidEndpoint,
    LimitSaved(u32),
    InvalidLimit(String),
    NoUrls,
    HttpStatusNotOk(u16),
    CrawlStarted,
    PendingTasks,
    RequestFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EndpointSaved => write!(f, "Server URL saved!"),
            Notice::InvalidEndpoint => write!(f, "Please enter a valid URL."),
            Notice::LimitSaved(limit) => write!(f, "Comment limit set to {limit}."),
            Notice::InvalidLimit(raw) => {
                write!(f, "Comment limit must be a whole number, got {raw:?}.")
            }
            Notice::NoUrls => write!(f, "Please enter at least one video URL."),
            Notice::HttpStatusNotOk(code) => {
                write!(f, "Network response was not ok (HTTP {code}).")
            }
            Notice::CrawlStarted => write!(f, "Videos are now being crawled!"),
            Notice::PendingTasks => write!(f, "There may be pending tasks, cannot crawl"),
            Notice::RequestFailed => write!(f, "There was a problem with the request."),
        }
    }
}
