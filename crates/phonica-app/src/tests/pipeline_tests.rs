use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use phonica_core::history::HistoryStore;
use phonica_core::playback::Pronouncer;
use phonica_core::storage::{KeyValueStore, MemoryStore};
use phonica_core::testing::{FakeDictionary, FakeSuggestions};
use phonica_core::{Session, SessionSettings};
use phonica_types::AppEvent;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::ui::render::Style;
use crate::ui::run_ui;

const KEY: &str = "pf-history";

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Backend and UI wired the way the controller wires them
struct Pipeline {
    lines: kanal::AsyncSender<String>,
    store: Arc<MemoryStore>,
    out: SharedBuf,
    cancel: CancellationToken,
    backend: JoinHandle<anyhow::Result<()>>,
    ui: JoinHandle<anyhow::Result<()>>,
}

impl Pipeline {
    fn start(dictionary: FakeDictionary, capacity: usize) -> Self {
        let store = Arc::new(MemoryStore::new());
        let history = HistoryStore::load(store.clone(), KEY, 20);
        let session = Session::new(
            Arc::new(dictionary),
            Arc::new(FakeSuggestions::new()),
            Pronouncer::new(None, None, "en"),
            history,
            SessionSettings::default(),
        );

        let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async::<AppEvent>(capacity);
        let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async::<AppEvent>(capacity);
        let (lines_tx, lines_rx) = kanal::bounded_async::<String>(16);
        let out = SharedBuf::default();
        let cancel = CancellationToken::new();

        let backend = tokio::spawn(event_loop(
            session,
            ui_to_app_rx,
            ui_to_app_tx.clone(),
            app_to_ui_tx,
            cancel.child_token(),
        ));
        let ui = tokio::spawn(run_ui(
            app_to_ui_rx,
            ui_to_app_tx,
            lines_rx,
            out.clone(),
            Style::plain(),
            cancel.child_token(),
        ));

        Self {
            lines: lines_tx,
            store,
            out,
            cancel,
            backend,
            ui,
        }
    }
}

/// Drop the input once the UI has taken every queued line
async fn end_input(lines: kanal::AsyncSender<String>) {
    while !lines.is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    drop(lines);
}

fn persisted(store: &MemoryStore) -> Vec<String> {
    let raw = store.get(KEY).unwrap().unwrap_or_default();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_piped_input_does_not_stall() {
    let p = Pipeline::start(FakeDictionary::new(), 4);

    let lines = p.lines;
    let feeder = tokio::spawn(async move {
        for i in 0..400 {
            lines.send(format!("word{i}")).await.unwrap();
        }
        end_input(lines).await;
    });

    timeout(Duration::from_secs(20), feeder)
        .await
        .expect("Timeout - input was never fully consumed")
        .unwrap();

    let finished = timeout(Duration::from_secs(20), p.backend).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))));

    p.cancel.cancel();
    let _ = timeout(Duration::from_secs(2), p.ui).await;

    let history = persisted(&p.store);
    assert_eq!(history.len(), 20);
    assert!(history.iter().all(|w| w.starts_with("word")));
}

#[tokio::test]
async fn test_lookup_in_flight_at_end_of_input_completes() {
    let p = Pipeline::start(
        FakeDictionary::new().delayed("colonel", Duration::from_millis(50)),
        64,
    );

    p.lines.send("colonel".to_string()).await.unwrap();
    end_input(p.lines).await;

    let finished = timeout(Duration::from_secs(2), p.backend).await;
    assert!(matches!(finished, Ok(Ok(Ok(())))));
    assert_eq!(persisted(&p.store), vec!["colonel"]);

    p.cancel.cancel();
    let _ = timeout(Duration::from_secs(2), p.ui).await;
    assert!(p.out.contents().contains("colonel"));
}
