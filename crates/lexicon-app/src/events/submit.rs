use std::sync::Arc;

use kanal::AsyncSender;
use lexicon_analyzer::Analyzer;
use lexicon_core::{Completion, Session, SubmitOutcome, run_search};
use lexicon_types::AppEvent;

/// Start the analysis for a new search, or report what a command did
pub async fn handle_outcome(
    session: &Session,
    outcome: SubmitOutcome,
    analyzer: &Arc<dyn Analyzer>,
    done_tx: &AsyncSender<Completion>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let notice = match outcome {
        SubmitOutcome::Ignored => return Ok(()),
        SubmitOutcome::Search(ticket) => {
            let analyzer = Arc::clone(analyzer);
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let completion = run_search(analyzer, ticket).await;
                if let Err(e) = done_tx.send(completion).await {
                    tracing::warn!("Event loop gone before analysis finished: {}", e);
                }
            });
            None
        }
        SubmitOutcome::NotebookOpened | SubmitOutcome::UsageError => None,
        SubmitOutcome::Saved(word) => Some(format!("Saved \"{word}\" to your notebook.")),
        SubmitOutcome::AlreadySaved(word) => {
            Some(format!("\"{word}\" is already in your notebook."))
        }
        SubmitOutcome::AddMismatch(word) => Some(format!(
            "\"{word}\" is not the current result. Search it first, then /add it."
        )),
        SubmitOutcome::NoResult => Some("Nothing to save yet. Search for a word first.".to_string()),
    };

    app_to_ui_tx.send(AppEvent::Render(session.view())).await?;
    if let Some(notice) = notice {
        app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    }

    Ok(())
}
