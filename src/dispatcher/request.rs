//! Download request assembly

use crate::dispatcher::progress::ProgressCallback;
use crate::dispatcher::strategy::{BulkStrategy, SequentialStrategy};
use crate::ContentBundle;

/// One download request: a bundle plus the caller's fulfillment capabilities
///
/// Both strategy slots are optional. Dispatch tolerates partially wired
/// callers: when the slot selected by classification is absent, the call
/// resolves to a no-op instead of failing. The progress callback is
/// forwarded to the sequential path only.
///
/// # Examples
///
/// ```no_run
/// use album_download_dispatcher::dispatcher::{
///     DownloadRequest, ProgressCallback, SequentialStrategy, StrategyResult,
/// };
/// use album_download_dispatcher::{Album, ContentBundle, Song};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct TrackSaver;
///
/// #[async_trait]
/// impl SequentialStrategy<u32> for TrackSaver {
///     async fn download_items(
///         &self,
///         bundle: &ContentBundle,
///         _progress: Option<ProgressCallback>,
///     ) -> StrategyResult<u32> {
///         Ok(bundle.songs.len() as u32)
///     }
/// }
///
/// let bundle = ContentBundle::new(Album::new("a1", "Live"), vec![Song::new("s1", "Tide")]);
/// let saver = TrackSaver;
/// let on_progress: ProgressCallback = Arc::new(|event| println!("{}", event.format_progress()));
///
/// let request = DownloadRequest::new(&bundle)
///     .with_sequential(&saver)
///     .with_progress(on_progress);
/// ```
pub struct DownloadRequest<'a, T> {
    pub(crate) bundle: &'a ContentBundle,
    pub(crate) bulk: Option<&'a dyn BulkStrategy<T>>,
    pub(crate) sequential: Option<&'a dyn SequentialStrategy<T>>,
    pub(crate) progress: Option<ProgressCallback>,
}

impl<'a, T> DownloadRequest<'a, T> {
    /// Create a request with no strategies wired
    pub fn new(bundle: &'a ContentBundle) -> Self {
        Self {
            bundle,
            bulk: None,
            sequential: None,
            progress: None,
        }
    }

    /// Wire the bulk (combined archive) fulfillment path
    pub fn with_bulk(mut self, strategy: &'a dyn BulkStrategy<T>) -> Self {
        self.bulk = Some(strategy);
        self
    }

    /// Wire the sequential (per-item) fulfillment path
    pub fn with_sequential(mut self, strategy: &'a dyn SequentialStrategy<T>) -> Self {
        self.sequential = Some(strategy);
        self
    }

    /// Attach a progress callback; forwarded to the sequential path only
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The bundle this request downloads
    pub fn bundle(&self) -> &ContentBundle {
        self.bundle
    }
}
