//! Crawl dashboard engine: HTTP client, status poller and state-file IO.
mod client;
mod endpoint;
mod engine;
mod persist;
mod poller;
mod types;

pub use client::{is_truthy, ClientSettings, CrawlApi, ReqwestCrawlApi};
pub use endpoint::SharedEndpoint;
pub use engine::{EngineHandle, EngineSettings, EventSink};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use poller::{PollSchedule, Poller, FAILURE_DELAY, SUCCESS_DELAY};
pub use types::{ApiError, ApiErrorKind, EngineEvent, StatusReply, SubmitReply};
