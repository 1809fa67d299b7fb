//! Progress events for in-flight downloads
//!
//! The sequential fulfillment path reports coarse-grained progress to the
//! caller's presentation layer as a stream of phase/percent events. Phases
//! only move forward (`Preparing → Downloading → Completed`); `Completed`
//! is terminal, must be the last event for a bundle, and is the only phase
//! at which the consuming surface offers a dismiss action.
//!
//! Events are ephemeral notifications: nothing here retains them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback receiving progress events from the sequential path
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Download lifecycle phase
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum DownloadPhase {
    /// Items are being gathered or prepared
    #[default]
    #[serde(rename = "preparing")]
    Preparing,
    /// Payload transfer is in flight
    #[serde(rename = "downloading")]
    Downloading,
    /// Terminal phase; no further events follow
    #[serde(rename = "completed")]
    Completed,
}

impl DownloadPhase {
    /// Status line shown while this phase is active
    pub fn label(&self) -> &'static str {
        match self {
            DownloadPhase::Preparing => "Preparing download",
            DownloadPhase::Downloading => "Downloading file",
            DownloadPhase::Completed => "Download complete",
        }
    }
}

impl fmt::Display for DownloadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DownloadPhase::Preparing => "preparing",
            DownloadPhase::Downloading => "downloading",
            DownloadPhase::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Progress notification emitted by an active download strategy
///
/// `Preparing` and `Downloading` events carry a percent in `[0, 100]`;
/// `Completed` carries none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEvent {
    /// Current lifecycle phase
    pub phase: DownloadPhase,
    /// Completion percentage in `[0, 100]`, absent for `Completed`
    pub percent: Option<f64>,
    /// Item currently being processed, when known
    pub current_item: Option<String>,
}

impl ProgressEvent {
    /// Preparation progress, optionally naming the item in flight
    pub fn preparing(percent: f64, current_item: Option<String>) -> Self {
        Self {
            phase: DownloadPhase::Preparing,
            percent: Some(clamp_percent(percent)),
            current_item,
        }
    }

    /// Transfer progress
    pub fn downloading(percent: f64) -> Self {
        Self {
            phase: DownloadPhase::Downloading,
            percent: Some(clamp_percent(percent)),
            current_item: None,
        }
    }

    /// Terminal event
    pub fn completed() -> Self {
        Self {
            phase: DownloadPhase::Completed,
            percent: None,
            current_item: None,
        }
    }

    /// Human-readable progress string for logging and display
    pub fn format_progress(&self) -> String {
        let mut parts = vec![self.phase.label().to_string()];

        if let Some(percent) = self.percent {
            parts.push(format!("- {percent:.0}%"));
        }

        if let Some(item) = &self.current_item {
            parts.push(format!("({item})"));
        }

        parts.join(" ")
    }
}

/// Progress emitter for sequential-strategy implementors
///
/// Wraps an optional [`ProgressCallback`] and keeps the phase machine
/// forward-only: events for an earlier phase than the one already reported
/// are dropped, and nothing is emitted after `Completed`. A reporter
/// without a callback is a silent no-op, so strategies report
/// unconditionally.
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    phase: DownloadPhase,
}

impl ProgressReporter {
    /// Create a reporter over the caller's callback slot
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Self {
            callback,
            phase: DownloadPhase::Preparing,
        }
    }

    /// Reporter that drops every event
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Report raw preparation progress
    pub fn preparing(&mut self, percent: f64) {
        self.emit(ProgressEvent::preparing(percent, None));
    }

    /// Report preparation of item `position` (1-based) of `total`
    pub fn preparing_item<S: Into<String>>(&mut self, position: usize, total: usize, item: S) {
        self.emit(ProgressEvent::preparing(
            item_percentage(position, total),
            Some(item.into()),
        ));
    }

    /// Report transfer progress
    pub fn downloading(&mut self, percent: f64) {
        self.emit(ProgressEvent::downloading(percent));
    }

    /// Emit the terminal event; at most once, later calls are dropped
    pub fn completed(&mut self) {
        self.emit(ProgressEvent::completed());
    }

    /// The last phase this reporter emitted (or `Preparing` initially)
    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    fn emit(&mut self, event: ProgressEvent) {
        if self.phase == DownloadPhase::Completed {
            return;
        }
        if event.phase < self.phase {
            return;
        }

        self.phase = event.phase;
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }
}

/// Percentage of `position` items handled out of `total`
fn item_percentage(position: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    clamp_percent((position as f64 / total as f64) * 100.0)
}

fn clamp_percent(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}
