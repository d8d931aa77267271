use kanal::{AsyncReceiver, AsyncSender};
use phonica_core::Session;
use phonica_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

pub mod lookup;
pub mod playback;
pub mod text_input;

use lookup::spawn_lookup;
use playback::spawn_playback;
use text_input::handle_text_input;

/// What the loop should do after an event
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// State changed, push a fresh view
    Render,
    Idle,
    Stop,
}

/// Session plus the bookkeeping the loop needs around spawned work
pub(crate) struct Backend {
    session: Session,
    loopback_tx: AsyncSender<AppEvent>,
    pending_lookups: usize,
    draining: bool,
}

impl Backend {
    pub(crate) fn new(session: Session, loopback_tx: AsyncSender<AppEvent>) -> Self {
        Self {
            session,
            loopback_tx,
            pending_lookups: 0,
            draining: false,
        }
    }

    /// Input has ended and every lookup has reported back
    fn drained(&self) -> bool {
        self.draining && self.pending_lookups == 0
    }
}

/// App's main loop.
///
/// Owns the session; spawned fetches report back through `loopback_tx`
/// so every mutation happens here.
pub async fn event_loop(
    session: Session,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    loopback_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut backend = Backend::new(session, loopback_tx);

    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    app_to_ui_tx
        .send(AppEvent::ShowSession(backend.session.view()))
        .await?;

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Event loop cancelled");
                return Ok(());
            }
            event = ui_to_app_rx.recv() => event?,
        };

        match handle_events(&mut backend, event) {
            Flow::Render => {
                app_to_ui_tx
                    .send(AppEvent::ShowSession(backend.session.view()))
                    .await?;
            }
            Flow::Idle => {}
            Flow::Stop => {
                tracing::info!("Close requested");
                return Ok(());
            }
        }

        if backend.drained() {
            tracing::info!("Input finished, all lookups done");
            return Ok(());
        }
    }
}

pub(crate) fn handle_events(backend: &mut Backend, event: AppEvent) -> Flow {
    match event {
        AppEvent::UiEvent(event) => handle_ui_event(backend, event),
        AppEvent::SuggestionsReady {
            generation,
            suggestions,
        } => {
            if backend.session.apply_suggestions(generation, suggestions) {
                Flow::Render
            } else {
                Flow::Idle
            }
        }
        AppEvent::LookupFinished { ticket, outcome } => {
            backend.pending_lookups = backend.pending_lookups.saturating_sub(1);
            let query = ticket.query.clone();
            if backend.session.finish_lookup(ticket, outcome) {
                tracing::debug!("Lookup '{}' applied", query);
            }
            // History changed either way
            Flow::Render
        }
        AppEvent::ShowSession(_) | AppEvent::BackendReady => {
            // UI-only event, ignore in backend
            Flow::Idle
        }
    }
}

fn handle_ui_event(backend: &mut Backend, event: UiEvent) -> Flow {
    let session = &mut backend.session;
    let ticket = match event {
        UiEvent::TextInput(text) => {
            handle_text_input(session, &backend.loopback_tx, text);
            return Flow::Render;
        }
        UiEvent::Search(word) => session.begin_lookup(word.as_deref()),
        UiEvent::SelectSuggestion(index) => {
            let ticket = session.select_suggestion(index);
            if ticket.is_none() {
                tracing::debug!("No suggestion at {}", index);
            }
            ticket
        }
        UiEvent::SelectHistory(index) => {
            let ticket = session.select_history(index);
            if ticket.is_none() {
                tracing::debug!("No history entry at {}", index);
            }
            ticket
        }
        UiEvent::Play(index) => {
            spawn_playback(session, index);
            return Flow::Idle;
        }
        UiEvent::Reset => {
            session.reset();
            return Flow::Render;
        }
        UiEvent::EndOfInput => {
            tracing::debug!("Input ended with {} lookups pending", backend.pending_lookups);
            backend.draining = true;
            return Flow::Idle;
        }
        UiEvent::Close => return Flow::Stop,
    };

    match ticket {
        Some(ticket) => {
            spawn_lookup(&backend.session, &backend.loopback_tx, ticket);
            backend.pending_lookups += 1;
            Flow::Render
        }
        None => Flow::Idle,
    }
}
