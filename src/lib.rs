//! # Album Download Dispatcher
//!
//! A library for routing album downloads to the fulfillment path that fits
//! the runtime platform. Packaged mobile application shells save tracks one
//! at a time with per-item progress, while desktop and web contexts receive
//! a single combined archive; this crate decides which path runs and relays
//! progress events to the caller's presentation layer.
//!
//! ## Features
//!
//! - **Platform Classification**: layered best-effort detection (native
//!   bridge flag, bridge platform query, identification-string heuristic)
//!   with a fail-safe desktop/web default
//! - **Strategy Dispatch**: exactly one caller-supplied fulfillment strategy
//!   runs per request; partially wired callers resolve to a no-op
//! - **Progress Reporting**: phase/percent events from the sequential path,
//!   with a reporter helper that keeps the phase machine forward-only
//! - **Injectable Environment**: detection reads an
//!   [`platform::EnvironmentProbe`] capability, so deterministic fixtures
//!   stand in for live host globals
//!
//! ## Quick Start
//!
//! ```no_run
//! use album_download_dispatcher::dispatcher::{
//!     BulkStrategy, DownloadDispatcher, DownloadRequest, StrategyResult,
//! };
//! use album_download_dispatcher::platform::StaticEnvironment;
//! use album_download_dispatcher::{Album, ContentBundle, Song};
//! use async_trait::async_trait;
//!
//! struct ArchiveEndpoint;
//!
//! #[async_trait]
//! impl BulkStrategy<String> for ArchiveEndpoint {
//!     async fn download_archive(&self, bundle: &ContentBundle) -> StrategyResult<String> {
//!         Ok(format!("/api/albums/{}/download", bundle.album.id))
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle = ContentBundle::new(
//!     Album::new("a1", "Live at the Harbor"),
//!     vec![Song::new("s1", "Opening Tide")],
//! );
//!
//! let endpoint = ArchiveEndpoint;
//! let dispatcher = DownloadDispatcher::new(StaticEnvironment::new());
//! let request = DownloadRequest::new(&bundle).with_bulk(&endpoint);
//!
//! // No native bridge in the probe, so this routes to the bulk path.
//! let outcome = dispatcher.dispatch(request).await?;
//! assert_eq!(outcome.as_deref(), Some("/api/albums/a1/download"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`platform`] - Execution-context classification and environment probes
//! - [`dispatcher`] - Strategy routing and progress reporting
//!
//! The content model ([`Album`], [`Song`], [`ContentBundle`]) lives at the
//! crate root and is read-only to every component here: the caller owns it,
//! the dispatcher and strategies only borrow it.

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};

/// Download routing and progress reporting
pub mod dispatcher;

/// Execution-context classification
pub mod platform;

// Re-export the types nearly every caller touches.
pub use dispatcher::{DownloadDispatcher, DownloadRequest};
pub use platform::PlatformClass;

/// Title length cap applied before file-name sanitization
const FILE_NAME_TITLE_CAP: usize = 50;

/// Album-level metadata for a content bundle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// Stable album identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Display artist, when known
    pub artist: Option<String>,
}

impl Album {
    /// Create an album reference
    pub fn new<I: Into<String>, T: Into<String>>(id: I, title: T) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
        }
    }

    /// Set the display artist
    pub fn with_artist<S: Into<String>>(mut self, artist: S) -> Self {
        self.artist = Some(artist.into());
        self
    }
}

/// A single downloadable item of an album
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// Stable song identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Track number within the album, when known
    pub track_number: Option<u32>,
    /// Source location of the audio payload, when known
    pub media_url: Option<String>,
}

impl Song {
    /// Create a song reference
    pub fn new<I: Into<String>, T: Into<String>>(id: I, title: T) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            track_number: None,
            media_url: None,
        }
    }

    /// Set the track number
    pub fn with_track_number(mut self, track_number: u32) -> Self {
        self.track_number = Some(track_number);
        self
    }

    /// Set the audio payload location
    pub fn with_media_url<S: Into<String>>(mut self, media_url: S) -> Self {
        self.media_url = Some(media_url.into());
        self
    }

    /// Per-item file name used when the song lands in an archive or on disk
    ///
    /// `position` is the 1-based position within the bundle and stands in
    /// for a missing track number. The title is capped at 50 characters and
    /// reduced to alphanumerics plus ` `, `-` and `_`; a title that
    /// sanitizes to nothing falls back to `track_{position}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use album_download_dispatcher::Song;
    ///
    /// let song = Song::new("s1", "Opening Tide (Live!)").with_track_number(3);
    /// assert_eq!(song.archive_file_name(1), "03 - Opening Tide Live.mp3");
    /// ```
    pub fn archive_file_name(&self, position: usize) -> String {
        let track = self.track_number.map(|n| n as usize).unwrap_or(position);

        let sanitized: String = self
            .title
            .chars()
            .take(FILE_NAME_TITLE_CAP)
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
            .collect();
        let sanitized = sanitized.trim();

        if sanitized.is_empty() {
            format!("{track:02} - track_{position}.mp3")
        } else {
            format!("{track:02} - {sanitized}.mp3")
        }
    }
}

/// An album plus its ordered songs, as assembled by the caller
///
/// The bundle is read-only to this crate; nothing here mutates or retains
/// it. An empty song list is valid input and still routes normally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBundle {
    /// The album the songs belong to
    pub album: Album,
    /// Songs in presentation order
    pub songs: Vec<Song>,
}

impl ContentBundle {
    /// Create a bundle from an album and its songs
    pub fn new(album: Album, songs: Vec<Song>) -> Self {
        Self { album, songs }
    }

    /// Validate bundle integrity
    pub fn validate(&self) -> Result<(), String> {
        if self.album.id.is_empty() {
            return Err("album identifier cannot be empty".to_string());
        }

        for (index, song) in self.songs.iter().enumerate() {
            if song.id.is_empty() {
                return Err(format!("song at position {index} has an empty identifier"));
            }
        }

        Ok(())
    }
}
