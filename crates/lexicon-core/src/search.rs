use std::sync::Arc;

use lexicon_analyzer::{AnalysisError, Analyzer};
use lexicon_types::LexiconRecord;

use crate::session::Ticket;

/// Outcome of one analysis, tagged with the generation that issued it
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub query: String,
    pub result: Result<LexiconRecord, AnalysisError>,
}

/// Run the analysis for `ticket` until it resolves or the ticket is cancelled
pub async fn run_search(analyzer: Arc<dyn Analyzer>, ticket: Ticket) -> Completion {
    let result = tokio::select! {
        _ = ticket.cancel.cancelled() => Err(AnalysisError::Cancelled),
        result = analyzer.analyze(&ticket.query) => result,
    };

    Completion {
        generation: ticket.generation,
        query: ticket.query,
        result,
    }
}
