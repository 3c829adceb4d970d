use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexicon_analyzer::Analyzer;
use lexicon_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64), // renders and notices
            ui_to_app: kanal::bounded_async(64), // typed input
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    pub(crate) channels: ChannelSet,
    state: Arc<AppState>,
    pub(crate) cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, analyzer: Arc<dyn Analyzer>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            analyzer,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Terminal UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.state.config.clone(),
            self.cancel_token.clone(),
        ));

        tasks
    }

    /// Queue a search as if it had been typed
    pub async fn submit(&self, text: String) -> anyhow::Result<()> {
        self.channels
            .ui_to_app
            .0
            .send(AppEvent::UiEvent(UiEvent::Submit(text)))
            .await?;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
