//! Fulfillment strategy seams
//!
//! The dispatcher never performs transfers itself. Callers supply one or
//! both fulfillment paths behind these traits; each dispatch call invokes
//! at most one of them, exactly once.

use crate::dispatcher::progress::ProgressCallback;
use crate::dispatcher::StrategyResult;
use crate::ContentBundle;
use async_trait::async_trait;

/// Bulk fulfillment: one combined downloadable unit for the whole bundle
///
/// The bulk path is a single opaque unit of work from the dispatcher's
/// perspective and receives no progress callback.
///
/// `T` is the strategy's own result value; the dispatcher returns it
/// untransformed.
#[async_trait]
pub trait BulkStrategy<T>: Send + Sync {
    /// Produce the combined download for `bundle`
    async fn download_archive(&self, bundle: &ContentBundle) -> StrategyResult<T>;
}

/// Sequential fulfillment: bundle items processed one at a time
///
/// Implementations emit zero or more progress events through `progress` as
/// each song is handled, and finish with a single terminal `Completed`
/// event. [`crate::dispatcher::ProgressReporter`] wraps the callback and
/// enforces that shape.
#[async_trait]
pub trait SequentialStrategy<T>: Send + Sync {
    /// Download each item of `bundle`
    ///
    /// `progress` is the caller's callback when one was attached to the
    /// request; implementations treat `None` as "report nothing".
    async fn download_items(
        &self,
        bundle: &ContentBundle,
        progress: Option<ProgressCallback>,
    ) -> StrategyResult<T>;
}
