use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crawldash_logging::{dash_error, dash_info};
use tokio::sync::mpsc as async_mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    ApiError, ClientSettings, CrawlApi, EngineEvent, PollSchedule, Poller, ReqwestCrawlApi,
    SharedEndpoint,
};

/// Receiver of everything the engine reports.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub client: ClientSettings,
    pub schedule: PollSchedule,
}

enum EngineCommand {
    Submit { urls: Vec<String>, limit: u32 },
}

/// Owns the engine thread.
///
/// All network work runs on one current-thread runtime: the poll loop and
/// any number of submissions interleave cooperatively at await points.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    endpoint: SharedEndpoint,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(
        settings: EngineSettings,
        endpoint: impl Into<String>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestCrawlApi::new(&settings.client)?);
        Ok(Self::with_api(api, settings.schedule, endpoint, sink))
    }

    pub fn with_api(
        api: Arc<dyn CrawlApi>,
        schedule: PollSchedule,
        endpoint: impl Into<String>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let endpoint = SharedEndpoint::new(endpoint);
        let cancel = CancellationToken::new();

        let worker = {
            let endpoint = endpoint.clone();
            let cancel = cancel.clone();
            thread::spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        dash_error!("Failed to start engine runtime: {}", err);
                        return;
                    }
                };
                runtime.block_on(drive(api, schedule, endpoint, sink, cmd_rx, cancel));
            })
        };

        Self {
            cmd_tx,
            endpoint,
            cancel,
            worker: Some(worker),
        }
    }

    pub fn submit(&self, urls: Vec<String>, limit: u32) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { urls, limit });
    }

    /// Routes every later request to `endpoint`. In-flight requests are untouched.
    pub fn set_endpoint(&self, endpoint: impl Into<String>) {
        self.endpoint.set(endpoint);
    }

    /// Stops the poll loop and waits for the engine thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                dash_error!("Engine thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive(
    api: Arc<dyn CrawlApi>,
    schedule: PollSchedule,
    endpoint: SharedEndpoint,
    sink: Arc<dyn EventSink>,
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
    cancel: CancellationToken,
) {
    let poll_task = {
        let poller = Poller::new(api.clone(), endpoint.clone(), schedule);
        let sink = sink.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(sink.as_ref(), cancel).await })
    };

    loop {
        let command = tokio::select! {
            _ = cancel.cancelled() => break,
            command = cmd_rx.recv() => command,
        };
        let Some(command) = command else {
            break;
        };
        let api = api.clone();
        let endpoint = endpoint.clone();
        let sink = sink.clone();
        tokio::spawn(async move {
            handle_command(api.as_ref(), &endpoint, sink.as_ref(), command).await;
        });
    }

    cancel.cancel();
    let _ = poll_task.await;
    dash_info!("Engine stopped");
}

async fn handle_command(
    api: &dyn CrawlApi,
    endpoint: &SharedEndpoint,
    sink: &dyn EventSink,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Submit { urls, limit } => {
            let endpoint = endpoint.get();
            dash_info!(
                "Submitting {} url(s) to {}/crawl limit={}",
                urls.len(),
                endpoint,
                limit
            );
            let result = api.submit(&endpoint, &urls, limit).await;
            sink.emit(EngineEvent::SubmitFinished(result));
        }
    }
}
