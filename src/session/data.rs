//! Serialized form of a recorded session.
//!
//! A session document is a single JSON object. Every array is optional and
//! must already be sorted by time; sorting is checked when the timelines are
//! built, not here.
//!
//! ```json
//! {
//!   "metadata": { "name": "Weekly sync", "epoch": 1600000000000, "duration": 95.0 },
//!   "chat": [{ "timestamp": 0.0, "name": "Ada", "message": "hello" }],
//!   "cursor": [{ "timestamp": 1.0, "x": 0.5, "y": 0.5 }],
//!   "panzooms": [{ "timestamp": 0.0, "x": 0.0, "y": 0.0, "width": 1600.0, "height": 1200.0 }],
//!   "slides": [{ "id": "slide-1", "src": "slides/1.png", "start": 0.0, "end": 40.0 }],
//!   "screenshare": [{ "start": 40.0, "end": 70.0 }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    pub metadata: Metadata,
    pub chat: Vec<ChatMessage>,
    pub cursor: Vec<CursorSample>,
    pub panzooms: Vec<PanZoom>,
    pub slides: Vec<Slide>,
    pub screenshare: Vec<ScreenshareWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub name: String,
    /// Recording start, milliseconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<i64>,
    /// Recording length in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// A public chat line, current from its timestamp until the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: f64,
    pub name: String,
    pub message: String,
}

/// Presenter cursor position, normalized to the slide (0..1).
///
/// Negative coordinates mean the cursor is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
}

impl CursorSample {
    pub fn is_visible(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

/// Slide viewBox keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanZoom {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub src: String,
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Period during which the screen-share recording is frontmost.
///
/// A window with no end was never explicitly stopped and stays open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenshareWindow {
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl SessionData {
    /// Read a session document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SessionError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(content)?)
    }
}
