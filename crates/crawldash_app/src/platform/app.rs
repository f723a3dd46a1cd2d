use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use crawldash_core::{update, AppState, EndpointStore, Msg, Notice};
use crawldash_engine::{EngineHandle, EngineSettings};
use crawldash_logging::{dash_info, dash_warn};

use super::config::AppConfig;
use super::effects::{EffectRunner, MsgSink};
use super::persistence;
use super::ui::constants::{MAX_NOTICES, TICK_INTERVAL};
use super::ui::input::{parse_line, OperatorInput};
use super::ui::render::{render, CLEAR_SCREEN};

/// Everything the app loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Operator(OperatorInput),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    if !crawldash_logging::initialize(config.log_destination.clone(), config.log_level) {
        eprintln!("Warning: logging is disabled");
    }
    dash_info!("crawldash starting, state dir {:?}", config.state_dir);

    let saved = persistence::load_endpoint(&config.state_dir);
    let store = EndpointStore::restore(saved.as_deref());
    let state = AppState::with_endpoint(store.get().clone());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let engine = EngineHandle::new(
        EngineSettings {
            client: config.client.clone(),
            ..EngineSettings::default()
        },
        state.endpoint().as_str(),
        Arc::new(MsgSink::new(event_tx.clone())),
    )
    .context("failed to start the crawl engine")?;
    let runner = EffectRunner::new(engine, config.state_dir.clone());

    spawn_stdin_reader(event_tx);

    let mut screen = Screen::new();
    screen.draw(&state)?;
    let result = event_loop(state, &runner, &event_rx, &mut screen);

    dash_info!("crawldash shutting down");
    runner.shutdown();
    result
}

fn event_loop(
    mut state: AppState,
    runner: &EffectRunner,
    event_rx: &mpsc::Receiver<AppEvent>,
    screen: &mut Screen,
) -> anyhow::Result<()> {
    loop {
        let event = match event_rx.recv_timeout(TICK_INTERVAL) {
            Ok(event) => event,
            Err(mpsc::RecvTimeoutError::Timeout) => AppEvent::Msg(Msg::Tick),
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        };

        let msg = match event {
            AppEvent::Msg(msg) => msg,
            AppEvent::Operator(OperatorInput::Msg(msg)) => {
                screen.show_help = false;
                msg
            }
            AppEvent::Operator(OperatorInput::Help) => {
                screen.show_help = true;
                screen.dirty = true;
                Msg::NoOp
            }
            AppEvent::Operator(OperatorInput::Unknown(name)) => {
                dash_warn!("Unknown command :{}", name);
                screen.show_help = true;
                screen.dirty = true;
                Msg::NoOp
            }
            AppEvent::Operator(OperatorInput::Quit) | AppEvent::InputClosed => return Ok(()),
        };

        let (next, effects) = update(state, msg);
        state = next;
        for notice in runner.run(effects) {
            screen.push_notice(notice);
        }

        if state.consume_dirty() || screen.dirty {
            screen.draw(&state)?;
        }
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => AppEvent::Operator(parse_line(&line)),
                Err(err) => {
                    dash_warn!("Failed to read operator input: {}", err);
                    AppEvent::InputClosed
                }
            };
            let closing = matches!(event, AppEvent::InputClosed);
            if event_tx.send(event).is_err() || closing {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Terminal-side state that is not part of the core model.
struct Screen {
    notices: VecDeque<Notice>,
    show_help: bool,
    dirty: bool,
}

impl Screen {
    fn new() -> Self {
        Self {
            notices: VecDeque::with_capacity(MAX_NOTICES),
            show_help: false,
            dirty: false,
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        dash_info!("Notice: {}", notice);
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
        self.dirty = true;
    }

    fn draw(&mut self, state: &AppState) -> anyhow::Result<()> {
        let notices: Vec<Notice> = self.notices.iter().cloned().collect();
        let frame = render(&state.view(), &notices, self.show_help);
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(CLEAR_SCREEN.as_bytes())
            .and_then(|_| stdout.write_all(frame.as_bytes()))
            .and_then(|_| stdout.flush())
            .context("failed to draw the dashboard")?;
        self.dirty = false;
        Ok(())
    }
}
