//! Integration tests for dispatch routing
//!
//! Exactly one strategy runs per dispatch call: never both, never neither
//! unless the selected slot is absent, in which case the call resolves to a
//! no-op instead of failing.

use album_download_dispatcher::dispatcher::{
    BulkStrategy, DownloadDispatcher, DownloadRequest, ProgressCallback, SequentialStrategy,
    StrategyResult,
};
use album_download_dispatcher::platform::{StaticBridge, StaticEnvironment};
use album_download_dispatcher::{Album, ContentBundle, Song};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Strategy double that counts invocations and returns a fixed value
#[derive(Clone)]
struct RecordingStrategy {
    calls: Arc<Mutex<usize>>,
    result: &'static str,
}

impl RecordingStrategy {
    fn new(result: &'static str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(0)),
            result,
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl BulkStrategy<String> for RecordingStrategy {
    async fn download_archive(&self, _bundle: &ContentBundle) -> StrategyResult<String> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.result.to_string())
    }
}

#[async_trait]
impl SequentialStrategy<String> for RecordingStrategy {
    async fn download_items(
        &self,
        _bundle: &ContentBundle,
        _progress: Option<ProgressCallback>,
    ) -> StrategyResult<String> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.result.to_string())
    }
}

fn bundle() -> ContentBundle {
    ContentBundle::new(
        Album::new("a1", "Live at the Harbor"),
        vec![
            Song::new("s1", "Opening Tide").with_track_number(1),
            Song::new("s2", "Undertow").with_track_number(2),
        ],
    )
}

fn desktop_dispatcher() -> DownloadDispatcher<StaticEnvironment> {
    DownloadDispatcher::new(StaticEnvironment::new())
}

fn mobile_dispatcher() -> DownloadDispatcher<StaticEnvironment> {
    DownloadDispatcher::new(
        StaticEnvironment::new().with_bridge(StaticBridge::new().with_platform("android")),
    )
}

#[tokio::test]
async fn test_desktop_routes_to_bulk_only() {
    let bundle = bundle();
    let bulk = RecordingStrategy::new("archive");
    let sequential = RecordingStrategy::new("items");

    let request = DownloadRequest::new(&bundle)
        .with_bulk(&bulk)
        .with_sequential(&sequential);
    let outcome = desktop_dispatcher().dispatch(request).await.unwrap();

    assert_eq!(outcome.as_deref(), Some("archive"));
    assert_eq!(bulk.call_count(), 1);
    assert_eq!(sequential.call_count(), 0);
}

#[tokio::test]
async fn test_native_mobile_routes_to_sequential_only() {
    let bundle = bundle();
    let bulk = RecordingStrategy::new("archive");
    let sequential = RecordingStrategy::new("items");

    let request = DownloadRequest::new(&bundle)
        .with_bulk(&bulk)
        .with_sequential(&sequential);
    let outcome = mobile_dispatcher().dispatch(request).await.unwrap();

    assert_eq!(outcome.as_deref(), Some("items"));
    assert_eq!(bulk.call_count(), 0);
    assert_eq!(sequential.call_count(), 1);
}

#[tokio::test]
async fn test_missing_selected_strategy_is_noop() {
    let bundle = bundle();
    let sequential = RecordingStrategy::new("items");

    // Desktop classification selects the bulk slot, which is not wired; the
    // wired sequential strategy must not run instead.
    let request: DownloadRequest<'_, String> =
        DownloadRequest::new(&bundle).with_sequential(&sequential);
    let outcome = desktop_dispatcher().dispatch(request).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(sequential.call_count(), 0);
}

#[tokio::test]
async fn test_fully_unwired_request_resolves_none() {
    let bundle = bundle();
    let request: DownloadRequest<'_, String> = DownloadRequest::new(&bundle);
    let outcome = desktop_dispatcher().dispatch(request).await.unwrap();
    assert_eq!(outcome, None);
}

#[tokio::test]
async fn test_empty_bundle_still_routes() {
    let bundle = ContentBundle::new(Album::new("a1", "Live at the Harbor"), vec![]);
    let bulk = RecordingStrategy::new("empty-archive");

    let request = DownloadRequest::new(&bundle).with_bulk(&bulk);
    let outcome = desktop_dispatcher().dispatch(request).await.unwrap();

    assert_eq!(outcome.as_deref(), Some("empty-archive"));
    assert_eq!(bulk.call_count(), 1);
}

#[tokio::test]
async fn test_result_passes_through_untransformed() {
    // Non-string payloads flow through the generic result slot untouched.
    struct CountingSequential;

    #[async_trait]
    impl SequentialStrategy<usize> for CountingSequential {
        async fn download_items(
            &self,
            bundle: &ContentBundle,
            _progress: Option<ProgressCallback>,
        ) -> StrategyResult<usize> {
            Ok(bundle.songs.len())
        }
    }

    let bundle = bundle();
    let strategy = CountingSequential;
    let request = DownloadRequest::new(&bundle).with_sequential(&strategy);
    let outcome = mobile_dispatcher().dispatch(request).await.unwrap();
    assert_eq!(outcome, Some(2));
}

#[tokio::test]
async fn test_dispatch_reclassifies_per_call() {
    let bundle = bundle();
    let bulk = RecordingStrategy::new("archive");
    let dispatcher = desktop_dispatcher();

    for _ in 0..3 {
        let request = DownloadRequest::new(&bundle).with_bulk(&bulk);
        dispatcher.dispatch(request).await.unwrap();
    }

    assert_eq!(bulk.call_count(), 3);
}
