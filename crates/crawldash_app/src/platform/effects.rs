use std::path::PathBuf;
use std::sync::mpsc;

use chrono::Local;
use crawldash_core::{Effect, JobRecord, Msg, Notice, SubmissionError, SubmitResult};
use crawldash_engine::{ApiError, ApiErrorKind, EngineEvent, EngineHandle, EventSink};
use crawldash_logging::{dash_info, dash_warn};

use super::app::AppEvent;
use super::persistence;

/// Executes core effects against the engine and the state file.
pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, state_dir: PathBuf) -> Self {
        Self { engine, state_dir }
    }

    /// Runs the effects and hands back the notices meant for the operator.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitCrawl { urls, limit } => {
                    dash_info!("SubmitCrawl urls={} limit={}", urls.len(), limit);
                    self.engine.submit(urls, limit);
                }
                Effect::ApplyEndpoint(endpoint) => {
                    dash_info!("ApplyEndpoint {}", endpoint);
                    self.engine.set_endpoint(endpoint.as_str());
                    persistence::save_endpoint(&self.state_dir, &endpoint);
                }
                Effect::Alert(notice) => notices.push(notice),
            }
        }
        notices
    }

    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}

/// Feeds engine events into the app loop as core messages.
pub struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let now = Local::now().format("%H:%M:%S").to_string();
        let _ = self.tx.send(AppEvent::Msg(to_msg(event, now)));
    }
}

fn to_msg(event: EngineEvent, received_at: String) -> Msg {
    match event {
        EngineEvent::SubmitFinished(Ok(reply)) => Msg::SubmitFinished(SubmitResult {
            http_status: reply.http_status,
            outcome: reply.outcome.map_err(|error| {
                dash_warn!("Submission reply unreadable: {}", error);
                map_submission_error(error)
            }),
        }),
        EngineEvent::SubmitFinished(Err(error)) => {
            dash_warn!("Submission failed: {}", error);
            Msg::SubmitFinished(SubmitResult {
                http_status: None,
                outcome: Err(map_submission_error(error)),
            })
        }
        EngineEvent::StatusSnapshot(rows) => Msg::StatusReceived {
            rows: rows.into_iter().map(JobRecord::from).collect(),
            received_at,
        },
        EngineEvent::StatusIgnored => Msg::StatusIgnored { received_at },
        EngineEvent::PollFailed { error, retry_in } => Msg::PollFailed {
            message: format!("{} (retry in {} ms)", error, retry_in.as_millis()),
        },
    }
}

fn map_submission_error(error: ApiError) -> SubmissionError {
    match error.kind {
        ApiErrorKind::MalformedResponse => SubmissionError::MalformedResponse(error.message),
        _ => SubmissionError::Network(error.to_string()),
    }
}
