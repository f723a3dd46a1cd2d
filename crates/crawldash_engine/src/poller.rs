//! Self-rescheduling status poll loop.
//!
//! The loop alternates between an in-flight request and a scheduled sleep.
//! The next request is only issued once the previous one has settled, so at
//! most one status request is ever outstanding. Failures are retried sooner
//! than successes are refreshed.

use std::sync::Arc;
use std::time::Duration;

use crawldash_logging::{dash_debug, dash_info, dash_trace, dash_warn};
use tokio_util::sync::CancellationToken;

use crate::{ApiError, CrawlApi, EngineEvent, EventSink, SharedEndpoint, StatusReply};

/// Delay after a settled request, whether or not the body was an array.
pub const SUCCESS_DELAY: Duration = Duration::from_millis(2024);
/// Delay after a failed request.
pub const FAILURE_DELAY: Duration = Duration::from_millis(1024);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub success_delay: Duration,
    pub failure_delay: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            success_delay: SUCCESS_DELAY,
            failure_delay: FAILURE_DELAY,
        }
    }
}

impl PollSchedule {
    pub fn delay_after<T>(&self, outcome: &Result<T, ApiError>) -> Duration {
        match outcome {
            Ok(_) => self.success_delay,
            Err(_) => self.failure_delay,
        }
    }
}

pub struct Poller {
    api: Arc<dyn CrawlApi>,
    endpoint: SharedEndpoint,
    schedule: PollSchedule,
}

impl Poller {
    pub fn new(api: Arc<dyn CrawlApi>, endpoint: SharedEndpoint, schedule: PollSchedule) -> Self {
        Self {
            api,
            endpoint,
            schedule,
        }
    }

    /// Polls until `cancel` fires. The first request goes out immediately.
    ///
    /// Cancellation also interrupts an outstanding request or sleep.
    pub async fn run(&self, sink: &dyn EventSink, cancel: CancellationToken) {
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let endpoint = self.endpoint.get();
            dash_trace!("poll #{} in flight against {}", cycle, endpoint);

            let outcome = tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = self.api.status(&endpoint) => outcome,
            };
            let delay = self.schedule.delay_after(&outcome);

            match outcome {
                Ok(StatusReply::Rows(rows)) => {
                    dash_trace!("poll #{} got {} row(s)", cycle, rows.len());
                    sink.emit(EngineEvent::StatusSnapshot(rows));
                }
                Ok(StatusReply::NotAnArray) => {
                    dash_debug!("poll #{} body is not an array, skipping update", cycle);
                    sink.emit(EngineEvent::StatusIgnored);
                }
                Err(error) => {
                    dash_warn!("poll #{} failed: {}", cycle, error);
                    sink.emit(EngineEvent::PollFailed {
                        error,
                        retry_in: delay,
                    });
                }
            }

            dash_trace!("poll #{} scheduled next in {:?}", cycle, delay);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
        dash_info!("Status poller stopped after {} cycle(s)", cycle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorKind;

    #[test]
    fn failure_retries_sooner_than_success() {
        let schedule = PollSchedule::default();
        let ok: Result<(), ApiError> = Ok(());
        let failed: Result<(), ApiError> = Err(ApiError::new(ApiErrorKind::Network, "down"));

        assert_eq!(schedule.delay_after(&ok), Duration::from_millis(2024));
        assert_eq!(schedule.delay_after(&failed), Duration::from_millis(1024));
        assert!(schedule.delay_after(&failed) < schedule.delay_after(&ok));
    }
}
