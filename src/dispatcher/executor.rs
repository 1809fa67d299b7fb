//! Download routing
//!
//! [`DownloadDispatcher`] holds the platform classifier and routes each
//! request to exactly one fulfillment strategy. Routing is total and
//! mutually exclusive: every classification maps to one strategy slot.

use crate::dispatcher::request::DownloadRequest;
use crate::dispatcher::StrategyResult;
use crate::platform::{
    EnvironmentProbe, PlatformClass, PlatformClassifier, StaticEnvironment, UserAgentHeuristic,
};
use tracing::{debug, error, info};

/// Routes download requests to the fulfillment path matching the current
/// platform classification
///
/// Each `dispatch` call classifies the environment exactly once, invokes at
/// most one strategy, and suspends until that strategy resolves. There is
/// no retry, no timeout, and no cancellation primitive here: once routed, a
/// strategy runs to completion or failure.
pub struct DownloadDispatcher<P> {
    classifier: PlatformClassifier<P>,
}

impl Default for DownloadDispatcher<StaticEnvironment> {
    /// Dispatcher over an empty environment snapshot (classifies desktop/web)
    fn default() -> Self {
        Self::new(StaticEnvironment::new())
    }
}

impl<P: EnvironmentProbe> DownloadDispatcher<P> {
    /// Create a dispatcher reading the given environment probe
    pub fn new(probe: P) -> Self {
        Self {
            classifier: PlatformClassifier::new(probe),
        }
    }

    /// Override the identification-string heuristic
    pub fn with_heuristic(mut self, heuristic: UserAgentHeuristic) -> Self {
        self.classifier = self.classifier.with_heuristic(heuristic);
        self
    }

    /// The classifier backing this dispatcher
    pub fn classifier(&self) -> &PlatformClassifier<P> {
        &self.classifier
    }

    /// Route `request` to exactly one fulfillment strategy
    ///
    /// Returns the selected strategy's value untransformed, or `Ok(None)`
    /// when that strategy was not wired. Strategy failures are logged and
    /// propagated unchanged. Classification failures never reach here: the
    /// classifier degrades to desktop/web internally.
    pub async fn dispatch<T>(&self, request: DownloadRequest<'_, T>) -> StrategyResult<Option<T>> {
        let platform = self.classifier.classify();
        info!(
            platform = %platform,
            album = %request.bundle.album.title,
            songs = request.bundle.songs.len(),
            "routing download"
        );

        let outcome = match platform {
            PlatformClass::NativeMobile => match request.sequential {
                Some(strategy) => strategy
                    .download_items(request.bundle, request.progress)
                    .await
                    .map(Some),
                None => {
                    debug!("sequential strategy not wired, resolving as no-op");
                    Ok(None)
                }
            },
            PlatformClass::DesktopOrWeb => match request.bulk {
                Some(strategy) => strategy.download_archive(request.bundle).await.map(Some),
                None => {
                    debug!("bulk strategy not wired, resolving as no-op");
                    Ok(None)
                }
            },
        };

        if let Err(e) = &outcome {
            error!(
                error = %e,
                album = %request.bundle.album.title,
                "download strategy failed"
            );
        }

        outcome
    }
}
