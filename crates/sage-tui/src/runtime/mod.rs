//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers return a `UiEvent`; `spawn_task` wraps it in `TaskCompleted`
//!   and sends it to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (HTTP, file inspection)

mod handlers;
mod inbox;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use sage_core::api::SageClient;
use sage_core::config::Config;
use sage_core::prefs::{self, Theme};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::ChatTerminal;
use crate::{render, terminal, update};

/// Tick interval while something is animating or in flight.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, state and HTTP client. Terminal state is restored on
/// drop and on panic.
pub struct TuiRuntime {
    terminal: ChatTerminal,
    pub state: AppState,
    client: SageClient,
    /// Handlers send events here.
    inbox_tx: UiEventSender,
    /// Drained each frame.
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Builds the client, enters the alternate screen and creates state.
    ///
    /// # Errors
    /// Returns an error if the API client cannot be built from `config` or
    /// the terminal cannot be set up.
    pub fn new(config: Config, theme: Theme) -> Result<Self> {
        let client = SageClient::from_config(&config).context("Invalid backend configuration")?;

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config, theme);
        let (inbox_tx, inbox_rx) = inbox::channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::init(&mut self.state);
        self.execute_effects(effects);

        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Frame first so layout-dependent state is current
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.transcript.is_typing()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::CancelTask { kind, token } => {
                tracing::debug!(?kind, "cancelling task");
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::PersistTheme { theme } => {
                if let Err(e) = prefs::save_theme(theme) {
                    // The theme is already applied in state
                    tracing::warn!(error = %e, "failed to persist theme");
                }
            }

            UiEffect::ListSessions { task } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SessionList, task, false, move |_| {
                    handlers::session_list_load(client)
                });
            }
            UiEffect::LoadSession { task, id } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SessionLoad, task, false, move |_| {
                    handlers::session_load(client, id)
                });
            }
            UiEffect::DeleteSession { task, id } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SessionDelete, task, false, move |_| {
                    handlers::session_delete(client, id)
                });
            }
            UiEffect::StartNewChat { task } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::NewChat, task, false, move |_| {
                    handlers::new_chat(client)
                });
            }

            UiEffect::SendChat { task, message } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Send, task, true, move |cancel| {
                    handlers::chat_send(client, message, cancel)
                });
            }
            UiEffect::UploadFile {
                task,
                attachment,
                message,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Send, task, true, move |cancel| {
                    handlers::file_upload(client, attachment, message, cancel)
                });
            }
            UiEffect::InspectFile { task, path } => {
                self.spawn_task(TaskKind::FileInspect, task, false, move |_| {
                    handlers::file_inspect(path)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
