//! Dashboard main loop.
//!
//! Terminal input is read on a dedicated thread and forwarded to the loop
//! together with the results of background runtime calls. The loop redraws
//! after every event and stops on quit or when shutdown is requested.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use farol_runtime::command::CommandRunner;
use farol_runtime::shutdown::ShutdownSignal;
use farol_runtime::store::InventoryStore;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{App, Command};
use crate::dispatch::Dispatcher;
use crate::event::{AppEvent, TerminalEvent};
use crate::ui;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Runs the dashboard until the operator quits or shutdown is requested.
///
/// `store` must already hold the initial snapshot.
///
/// # Errors
///
/// Returns an error if the terminal cannot be drawn to.
pub async fn run_dashboard<R: CommandRunner>(
    runner: Arc<R>,
    store: Arc<InventoryStore>,
    mut shutdown: ShutdownSignal,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(runner, Arc::clone(&store), tx.clone());
    spawn_input_reader(tx);

    let mut terminal = ratatui::init();
    let mut app = App::new(store);
    let result = event_loop(&mut terminal, &mut app, &dispatcher, &mut rx, &mut shutdown).await;
    ratatui::restore();
    result
}

async fn event_loop<R: CommandRunner>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    dispatcher: &Dispatcher<R>,
    events: &mut UnboundedReceiver<AppEvent>,
    shutdown: &mut ShutdownSignal,
) -> io::Result<()> {
    while app.running {
        let _ = terminal.draw(|frame| ui::render(frame, app))?;

        let event = tokio::select! {
            event = events.recv() => event,
            () = shutdown.cancelled() => {
                tracing::info!("shutdown requested, leaving dashboard");
                break;
            }
        };
        let Some(event) = event else {
            break;
        };

        match app.handle_event(event) {
            Some(Command::Dispatch(request)) => {
                let _ = dispatcher.dispatch(request);
            }
            Some(Command::Refresh) => {
                let _ = dispatcher.refresh();
            }
            None => {}
        }
    }
    Ok(())
}

/// Forwards key and resize events until the loop drops its receiver.
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    let _ = std::thread::spawn(move || {
        loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input poll failed");
                    break;
                }
            }
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => TerminalEvent::Key(key),
                Ok(Event::Resize(width, height)) => TerminalEvent::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input read failed");
                    break;
                }
            };
            if tx.send(AppEvent::Terminal(forwarded)).is_err() {
                break;
            }
        }
    });
}
