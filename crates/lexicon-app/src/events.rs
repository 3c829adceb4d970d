use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexicon_analyzer::Analyzer;
use lexicon_core::{Completion, Resolution, Session};
use lexicon_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

pub mod submit;

use submit::handle_outcome;

/// App's main loop, sole owner of the session
pub async fn event_loop(
    analyzer: Arc<dyn Analyzer>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = Session::with_shutdown(cancel.child_token());
    let (done_tx, done_rx) = kanal::unbounded_async::<Completion>();

    let provider = analyzer.metadata();
    tracing::info!(
        provider = %provider.name,
        model = %provider.model,
        requires_api_key = provider.requires_api_key,
        "Event loop ready"
    );
    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    app_to_ui_tx.send(AppEvent::Render(session.view())).await?;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Event loop cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("UI channel closed, stopping event loop");
                    break;
                };
                tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));

                let keep_running = handle_events(
                    &mut session,
                    &analyzer,
                    &done_tx,
                    &app_to_ui_tx,
                    event,
                )
                .await?;
                if !keep_running {
                    break;
                }
            }
            completion = done_rx.recv() => {
                let completion = completion?;
                if session.resolve(completion) == Resolution::Applied {
                    app_to_ui_tx.send(AppEvent::Render(session.view())).await?;
                }
            }
        }
    }

    Ok(())
}

/// Returns false once the user asked to quit
async fn handle_events(
    session: &mut Session,
    analyzer: &Arc<dyn Analyzer>,
    done_tx: &AsyncSender<Completion>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    let AppEvent::UiEvent(event) = event else {
        // Render, Notice and BackendReady only travel towards the UI
        return Ok(true);
    };

    let outcome = match event {
        UiEvent::Submit(text) => session.submit_search(&text),
        UiEvent::SaveCurrent => session.save_current_result(),
        UiEvent::SelectEntry(word) => session.select_notebook_entry(&word),
        UiEvent::OpenNotebook => {
            session.open_notebook();
            app_to_ui_tx.send(AppEvent::Render(session.view())).await?;
            return Ok(true);
        }
        UiEvent::CloseNotebook => {
            session.close_notebook();
            app_to_ui_tx.send(AppEvent::Render(session.view())).await?;
            return Ok(true);
        }
        UiEvent::Quit => {
            tracing::info!("Quit requested");
            return Ok(false);
        }
    };

    handle_outcome(session, outcome, analyzer, done_tx, app_to_ui_tx).await?;
    Ok(true)
}
