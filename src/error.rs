//! Error types for timeline construction and session loading.
//!
//! Only construction can fail. Runtime conditions (drift, a player that
//! stops answering, a correction that does not land) are absorbed by the
//! synchronizer and never show up here.

use std::path::PathBuf;

/// Data integrity failures detected while building an [`EventTimeline`].
///
/// [`EventTimeline`]: crate::timeline::EventTimeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("{timeline}: item {index} starts at {start}s, before the previous item at {previous}s")]
    Unsorted {
        timeline: String,
        index: usize,
        previous: f64,
        start: f64,
    },

    #[error("{timeline}: item {index} ends at {end}s, before its start at {start}s")]
    InvertedInterval {
        timeline: String,
        index: usize,
        start: f64,
        end: f64,
    },

    #[error("{timeline}: item {index} has a negative or non-finite timestamp")]
    InvalidTimestamp { timeline: String, index: usize },
}

impl TimelineError {
    /// Name of the timeline that failed validation.
    pub fn timeline(&self) -> &str {
        match self {
            Self::Unsorted { timeline, .. }
            | Self::InvertedInterval { timeline, .. }
            | Self::InvalidTimestamp { timeline, .. } => timeline,
        }
    }
}

/// Errors that can occur while loading a recorded session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read session: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse session JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid session data: {0}")]
    Integrity(#[from] TimelineError),
}
