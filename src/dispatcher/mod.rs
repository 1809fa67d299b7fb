//! Download routing and progress reporting
//!
//! This module routes a download request to exactly one caller-supplied
//! fulfillment strategy based on the current platform classification, and
//! relays progress notifications from the sequential path.
//!
//! # Overview
//!
//! The dispatch workflow:
//!
//! 1. **Request Assembly**: describe what to download and which fulfillment
//!    paths are wired using [`request::DownloadRequest`]
//! 2. **Classification**: [`executor::DownloadDispatcher`] queries the
//!    platform classifier exactly once per call
//! 3. **Routing**: native-mobile contexts run the
//!    [`strategy::SequentialStrategy`] with the progress callback;
//!    desktop/web contexts run the [`strategy::BulkStrategy`] without one
//! 4. **Progress**: the sequential strategy emits [`progress::ProgressEvent`]s
//!    through the caller's [`progress::ProgressCallback`], finishing with a
//!    single terminal `Completed` event
//!
//! # Components
//!
//! - [`executor`] - Dispatcher with the routing logic
//! - [`request`] - Request assembly with optional strategy slots
//! - [`strategy`] - Fulfillment strategy seams implemented by the caller
//! - [`progress`] - Progress events, phases, and the reporter helper
//!
//! # Error Handling
//!
//! Strategy operations return `Result<T, StrategyError>`. The dispatcher
//! performs no retry and no recovery: a strategy failure is logged and then
//! propagated unchanged to the caller. A missing strategy slot is not an
//! error; the call resolves to `Ok(None)` so partially wired callers keep
//! working during incremental integration.

pub mod executor;
pub mod progress;
pub mod request;
pub mod strategy;

pub use executor::DownloadDispatcher;
pub use progress::{DownloadPhase, ProgressCallback, ProgressEvent, ProgressReporter};
pub use request::DownloadRequest;
pub use strategy::{BulkStrategy, SequentialStrategy};

/// Strategy errors
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// Network error during a transfer
    #[error("network error: {0}")]
    NetworkError(String),

    /// Archive preparation or delivery error on the bulk path
    #[error("archive error: {0}")]
    ArchiveError(String),

    /// Local storage error while persisting an item
    #[error("storage error: {0}")]
    StorageError(String),

    /// Bundle rejected by the strategy
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Result type for strategy operations
pub type StrategyResult<T> = Result<T, StrategyError>;
