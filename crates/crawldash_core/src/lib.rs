//! Crawl dashboard core: pure state machine, input normalization and row rendering.
mod effect;
mod endpoint;
mod job;
mod msg;
mod normalize;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use endpoint::{Endpoint, EndpointStore, InvalidEndpoint, DEFAULT_ENDPOINT};
pub use job::{JobRecord, Progress, Resource, PENDING_TEXT, STATUS_DEFAULT_TEXT};
pub use msg::{Msg, SubmissionError, SubmitResult};
pub use normalize::normalize_urls;
pub use state::{AppState, JobTable, PollHealth, DEFAULT_COMMENT_LIMIT};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView, COLUMNS};
