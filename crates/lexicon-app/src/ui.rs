use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use kanal::{AsyncReceiver, AsyncSender, Sender};
use lexicon_config::Config;
use lexicon_types::{AppEvent, NotebookEntry, SessionState, UiEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::input::{InputAction, map_input};
use crate::render::{render_hints, render_view};

const PROMPT: &str = "word> ";

/// UI-side state, separate from the session
#[derive(Default)]
pub struct UiState {
    /// Last rendered notebook, for resolving `/open <n>`
    pub notebook: Arc<Mutex<Vec<NotebookEntry>>>,
}

/// Terminal presentation loop: renders app events, forwards typed lines
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui_config = config.read().await.ui.clone();
    let ui_state = UiState::default();

    // stdin blocks, so it gets a plain thread that never holds up shutdown
    {
        let notebook = Arc::clone(&ui_state.notebook);
        let tx = ui_to_app_tx.clone().to_sync();
        std::thread::Builder::new()
            .name("lexicon-stdin".to_string())
            .spawn(move || read_input(io::stdin().lock(), tx, notebook))?;
    }

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("UI loop stopping");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("App channel closed, stopping UI loop");
                    break;
                };

                match event {
                    AppEvent::BackendReady => {
                        println!("LexiconMaster: the story behind every word.");
                        if ui_config.show_hints {
                            print!("{}", render_hints(&ui_config));
                        }
                    }
                    AppEvent::Render(view) => {
                        if let Ok(mut notebook) = ui_state.notebook.lock() {
                            *notebook = view.notebook.clone();
                        }
                        // Idle hints were already printed with the banner
                        if view.state != SessionState::Idle || view.notebook_open {
                            print!("\n{}", render_view(&view, &ui_config));
                        }
                        prompt();
                    }
                    AppEvent::Notice(message) => {
                        println!("{message}");
                        prompt();
                    }
                    AppEvent::UiEvent(_) => {}
                }
            }
        }
    }

    Ok(())
}

/// Blocking reader: one line, one intent
fn read_input(
    reader: impl BufRead,
    tx: Sender<AppEvent>,
    notebook: Arc<Mutex<Vec<NotebookEntry>>>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let action = match notebook.lock() {
            Ok(entries) => map_input(&line, &entries),
            Err(_) => map_input(&line, &[]),
        };

        match action {
            InputAction::Send(event) => {
                if tx.send(AppEvent::UiEvent(event)).is_err() {
                    return;
                }
            }
            InputAction::Reject(message) => {
                println!("{message}");
                prompt();
            }
        }
    }

    // EOF (Ctrl+D) ends the session
    let _ = tx.send(AppEvent::UiEvent(UiEvent::Quit));
}

fn prompt() {
    print!("{PROMPT}");
    let _ = io::stdout().flush();
}
