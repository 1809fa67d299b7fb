//! Integration tests for progress forwarding on the sequential path
//!
//! The dispatcher forwards the caller's callback to the sequential strategy
//! verbatim: events arrive in emission order with no reordering, filtering,
//! or duplication, and the final event for a bundle is `Completed`.

use album_download_dispatcher::dispatcher::{
    DownloadDispatcher, DownloadPhase, DownloadRequest, ProgressCallback, ProgressEvent,
    ProgressReporter, SequentialStrategy, StrategyResult,
};
use album_download_dispatcher::platform::{StaticBridge, StaticEnvironment};
use album_download_dispatcher::{Album, ContentBundle, Song};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Sequential strategy that replays a fixed event script
struct ScriptedSequential {
    script: Vec<ProgressEvent>,
}

#[async_trait]
impl SequentialStrategy<()> for ScriptedSequential {
    async fn download_items(
        &self,
        _bundle: &ContentBundle,
        progress: Option<ProgressCallback>,
    ) -> StrategyResult<()> {
        if let Some(callback) = progress {
            for event in &self.script {
                callback(event.clone());
            }
        }
        Ok(())
    }
}

/// Sequential strategy that reports through [`ProgressReporter`]
struct ReportingSequential;

#[async_trait]
impl SequentialStrategy<usize> for ReportingSequential {
    async fn download_items(
        &self,
        bundle: &ContentBundle,
        progress: Option<ProgressCallback>,
    ) -> StrategyResult<usize> {
        let mut reporter = ProgressReporter::new(progress);
        let total = bundle.songs.len();

        for (index, song) in bundle.songs.iter().enumerate() {
            reporter.preparing_item(index + 1, total, song.title.clone());
        }
        reporter.downloading(100.0);
        reporter.completed();

        Ok(total)
    }
}

fn mobile_dispatcher() -> DownloadDispatcher<StaticEnvironment> {
    DownloadDispatcher::new(
        StaticEnvironment::new().with_bridge(StaticBridge::new().with_platform("ios")),
    )
}

fn collecting_callback() -> (ProgressCallback, Arc<Mutex<Vec<ProgressEvent>>>) {
    let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let callback: ProgressCallback = Arc::new(move |event| sink.lock().unwrap().push(event));
    (callback, events)
}

#[tokio::test]
async fn test_events_arrive_in_emission_order() {
    let bundle = ContentBundle::new(Album::new("a1", "Live at the Harbor"), vec![]);
    let script = vec![
        ProgressEvent::preparing(0.0, None),
        ProgressEvent::preparing(50.0, Some("Opening Tide".to_string())),
        ProgressEvent::downloading(80.0),
        ProgressEvent::completed(),
    ];
    let strategy = ScriptedSequential {
        script: script.clone(),
    };
    let (callback, events) = collecting_callback();

    let request = DownloadRequest::new(&bundle)
        .with_sequential(&strategy)
        .with_progress(callback);
    mobile_dispatcher().dispatch(request).await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(*events, script);
}

#[tokio::test]
async fn test_final_event_is_completed() {
    let bundle = ContentBundle::new(
        Album::new("a1", "Live at the Harbor"),
        vec![
            Song::new("s1", "Opening Tide"),
            Song::new("s2", "Undertow"),
            Song::new("s3", "Last Light"),
        ],
    );
    let strategy = ReportingSequential;
    let (callback, events) = collecting_callback();

    let request = DownloadRequest::new(&bundle)
        .with_sequential(&strategy)
        .with_progress(callback);
    let outcome = mobile_dispatcher().dispatch(request).await.unwrap();
    assert_eq!(outcome, Some(3));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events.last().unwrap().phase, DownloadPhase::Completed);
    assert_eq!(
        events[0].current_item.as_deref(),
        Some("Opening Tide"),
        "per-item events carry the song title"
    );
}

#[tokio::test]
async fn test_sequential_without_callback_reports_nothing() {
    let bundle = ContentBundle::new(
        Album::new("a1", "Live at the Harbor"),
        vec![Song::new("s1", "Opening Tide")],
    );
    let strategy = ReportingSequential;

    // No callback attached; the strategy still completes normally.
    let request = DownloadRequest::new(&bundle).with_sequential(&strategy);
    let outcome = mobile_dispatcher().dispatch(request).await.unwrap();
    assert_eq!(outcome, Some(1));
}

#[tokio::test]
async fn test_bulk_path_receives_no_progress() {
    use album_download_dispatcher::dispatcher::BulkStrategy;

    struct PlainBulk;

    #[async_trait]
    impl BulkStrategy<&'static str> for PlainBulk {
        async fn download_archive(
            &self,
            _bundle: &ContentBundle,
        ) -> StrategyResult<&'static str> {
            Ok("archive")
        }
    }

    let bundle = ContentBundle::new(Album::new("a1", "Live at the Harbor"), vec![]);
    let strategy = PlainBulk;
    let (callback, events) = collecting_callback();

    // Desktop classification: the callback is attached to the request but
    // the bulk path has no progress seam, so nothing is ever emitted.
    let dispatcher = DownloadDispatcher::new(StaticEnvironment::new());
    let request = DownloadRequest::new(&bundle)
        .with_bulk(&strategy)
        .with_progress(callback);
    let outcome = dispatcher.dispatch(request).await.unwrap();

    assert_eq!(outcome, Some("archive"));
    assert!(events.lock().unwrap().is_empty());
}
