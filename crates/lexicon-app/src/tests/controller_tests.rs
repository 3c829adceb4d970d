use std::sync::Arc;
use std::time::Duration;

use lexicon_config::Config;
use lexicon_types::{AppEvent, UiEvent};
use tokio::time::timeout;

use crate::controller::{AppController, ChannelSet};
use crate::state::AppState;

fn controller() -> AppController {
    AppController::new(Arc::new(AppState::new(Config::default())))
}

#[tokio::test]
async fn test_submit_reaches_event_loop_channel() {
    let controller = controller();
    controller.submit("Serendipity".to_string()).await.unwrap();

    let result = timeout(Duration::from_secs(2), controller.channels.ui_to_app.1.recv()).await;
    match result {
        Ok(Ok(AppEvent::UiEvent(UiEvent::Submit(text)))) => assert_eq!(text, "Serendipity"),
        Ok(Ok(other)) => panic!("Wrong event type: {other:?}"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout waiting for submitted word"),
    }
}

#[tokio::test]
async fn test_blocking_reader_thread_feeds_async_side() {
    let channels = ChannelSet::new();
    let tx = channels.ui_to_app.0.clone().to_sync();

    // Same bridge the stdin thread uses
    std::thread::spawn(move || {
        tx.send(AppEvent::UiEvent(UiEvent::Submit("/list".to_string())))
            .expect("send failed");
        tx.send(AppEvent::UiEvent(UiEvent::Quit)).expect("send failed");
    });

    let rx = &channels.ui_to_app.1;
    let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    let second = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();

    assert!(matches!(first, AppEvent::UiEvent(UiEvent::Submit(ref t)) if t == "/list"));
    assert!(matches!(second, AppEvent::UiEvent(UiEvent::Quit)));
}

#[tokio::test]
async fn test_shutdown_cancels_children() {
    let controller = controller();
    let child = controller.cancel_token.child_token();
    assert!(!child.is_cancelled());

    controller.shutdown();

    timeout(Duration::from_secs(2), child.cancelled())
        .await
        .expect("child token was not cancelled");
}
