//! Timeline items and their time spans.

use serde::{Deserialize, Serialize};

/// Time span of a single timeline item, in seconds.
///
/// `end == None` means the item is sticky: it stays current until a later
/// item starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl Span {
    pub fn point(start: f64) -> Self {
        Self { start, end: None }
    }

    pub fn interval(start: f64, end: f64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Whether `t` lies inside `[start, end)`, or `[start, ∞)` when open-ended.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && self.end.map_or(true, |end| t < end)
    }

    /// End of the span, `f64::INFINITY` when open-ended.
    pub fn end_or_infinity(&self) -> f64 {
        self.end.unwrap_or(f64::INFINITY)
    }
}

/// A discrete event or interval anchored to the recording clock.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedItem<T> {
    pub start: f64,
    pub end: Option<f64>,
    pub payload: T,
}

impl<T> TimedItem<T> {
    /// An item with no end (sticky until superseded).
    pub fn point(start: f64, payload: T) -> Self {
        Self {
            start,
            end: None,
            payload,
        }
    }

    /// An item active on `[start, end)`.
    pub fn interval(start: f64, end: f64, payload: T) -> Self {
        Self {
            start,
            end: Some(end),
            payload,
        }
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }
}

/// What a lookup returns once the most recently started item has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Keep reporting the last started item (chat, slides, cursor).
    #[default]
    Hold,
    /// Report nothing between an item's end and the next start (screen-share windows).
    Gaps,
}
