use std::io::{BufRead, Write};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use phonica_config::Config;
use phonica_types::{AppEvent, SessionView, UiEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

pub mod command;
pub mod render;

use command::{Command, HELP, parse_command};
use render::{Style, render, render_history};

/// Terminal front-end over stdin/stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let style = Style::detect(config.read().await.ui.color);
    let lines = spawn_stdin_reader();

    run_ui(
        app_to_ui_rx,
        ui_to_app_tx,
        lines,
        std::io::stdout(),
        style,
        cancel,
    )
    .await
}

/// Blocking stdin reads live on their own thread so they never hold up
/// runtime shutdown.
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx.to_async()
}

/// Render views and turn input lines into events.
///
/// Outgoing events go through an unbounded outbox drained by a forwarder,
/// so rendering never waits on the backend while the backend waits on
/// rendering.
pub(crate) async fn run_ui<W: Write>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    lines: AsyncReceiver<String>,
    out: W,
    style: Style,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (outbox_tx, outbox_rx) = kanal::unbounded_async();

    let render = render_loop(app_to_ui_rx, outbox_tx, lines, out, style, cancel.clone());
    let forward = forward_events(outbox_rx, ui_to_app_tx, cancel);

    tokio::try_join!(render, forward)?;
    Ok(())
}

async fn render_loop<W: Write>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    outbox: AsyncSender<AppEvent>,
    lines: AsyncReceiver<String>,
    mut out: W,
    style: Style,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut last_view = SessionView::default();
    let mut input_open = true;

    loop {
        tokio::select! {
            biased;

            event = app_to_ui_rx.recv() => match event? {
                AppEvent::ShowSession(view) => {
                    write!(out, "{}", render(&view, &style))?;
                    out.flush()?;
                    last_view = view;
                }
                AppEvent::BackendReady => {
                    writeln!(out, "Type a word to hear it, :help for commands")?;
                    out.flush()?;
                }
                _ => {}
            },
            _ = cancel.cancelled() => {
                tracing::debug!("UI loop cancelled");
                return Ok(());
            }
            line = lines.recv(), if input_open => {
                let Ok(line) = line else {
                    // Keep rendering until the backend has finished its work
                    tracing::debug!("Input closed");
                    input_open = false;
                    outbox.send(AppEvent::UiEvent(UiEvent::EndOfInput)).await?;
                    continue;
                };

                match parse_command(&line) {
                    Ok(Command::Send(events)) => {
                        for event in events {
                            outbox.send(AppEvent::UiEvent(event)).await?;
                        }
                    }
                    Ok(Command::History) => {
                        write!(out, "{}", render_history(&last_view.history, &style))?;
                    }
                    Ok(Command::Help) => writeln!(out, "{HELP}")?,
                    Ok(Command::Empty) => {}
                    Err(message) => writeln!(out, "{}", message)?,
                }
                out.flush()?;
            }
        }
    }
}

/// Move queued events to the backend in order
async fn forward_events(
    outbox: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = outbox.recv() => match event {
                Ok(event) => event,
                Err(_) => return Ok(()),
            },
        };

        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            sent = ui_to_app_tx.send(event) => sent?,
        }
    }
}
