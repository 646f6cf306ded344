//! Recorded session: one validated timeline per data category.
//!
//! - [`data`] - serde model of the session document
//!
//! Building a [`Session`] is the only place data integrity is checked. An
//! unsorted timeline or an inverted interval rejects the whole session, so
//! the playback engine never sees data its lookups cannot handle.

mod data;

use std::path::Path;

pub use data::{
    ChatMessage, CursorSample, Metadata, PanZoom, ScreenshareWindow, SessionData, Slide,
};

use crate::error::{SessionError, TimelineError};
use crate::format::format_title;
use crate::resolver::TimelineId;
use crate::timeline::{EventTimeline, GapPolicy, TimeIndex, TimedItem};

/// A loaded recording with its timelines.
#[derive(Debug, Clone)]
pub struct Session {
    pub metadata: Metadata,
    pub chat: EventTimeline<ChatMessage>,
    pub cursor: EventTimeline<CursorSample>,
    pub panzooms: EventTimeline<PanZoom>,
    pub slides: EventTimeline<Slide>,
    pub screenshare: EventTimeline<ScreenshareWindow>,
}

impl Session {
    /// Build and validate every timeline.
    ///
    /// # Errors
    /// The first integrity error found, naming the offending timeline.
    pub fn from_data(data: SessionData) -> Result<Self, TimelineError> {
        let SessionData {
            metadata,
            chat,
            cursor,
            panzooms,
            slides,
            screenshare,
        } = data;

        let session = Self {
            chat: build(
                TimelineId::Chat,
                chat.into_iter()
                    .map(|m| TimedItem::point(m.timestamp, m))
                    .collect(),
            )?,
            cursor: build(
                TimelineId::Cursor,
                cursor
                    .into_iter()
                    .map(|c| TimedItem::point(c.timestamp, c))
                    .collect(),
            )?,
            panzooms: build(
                TimelineId::PanZooms,
                panzooms
                    .into_iter()
                    .map(|p| TimedItem::point(p.timestamp, p))
                    .collect(),
            )?,
            slides: build(
                TimelineId::Slides,
                slides
                    .into_iter()
                    .map(|s| TimedItem {
                        start: s.start,
                        end: s.end,
                        payload: s,
                    })
                    .collect(),
            )?,
            screenshare: build(
                TimelineId::Screenshare,
                screenshare
                    .into_iter()
                    .map(|w| TimedItem {
                        start: w.start,
                        end: w.end,
                        payload: w,
                    })
                    .collect(),
            )?,
            metadata,
        };

        tracing::info!(
            name = %session.metadata.name,
            chat = session.chat.len(),
            slides = session.slides.len(),
            screenshare = session.screenshare.len(),
            "session loaded"
        );
        Ok(session)
    }

    /// Read, parse and validate a session document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let data = SessionData::load(path)?;
        Ok(Self::from_data(data)?)
    }

    pub fn from_json(content: &str) -> Result<Self, SessionError> {
        let data = SessionData::from_json(content)?;
        Ok(Self::from_data(data)?)
    }

    /// Gap policy each timeline is built with.
    pub fn policy(id: TimelineId) -> GapPolicy {
        match id {
            TimelineId::Screenshare => GapPolicy::Gaps,
            TimelineId::Chat | TimelineId::Cursor | TimelineId::PanZooms | TimelineId::Slides => {
                GapPolicy::Hold
            }
        }
    }

    pub fn index(&self, id: TimelineId) -> &TimeIndex {
        match id {
            TimelineId::Chat => self.chat.index(),
            TimelineId::Cursor => self.cursor.index(),
            TimelineId::PanZooms => self.panzooms.index(),
            TimelineId::Slides => self.slides.index(),
            TimelineId::Screenshare => self.screenshare.index(),
        }
    }

    /// Whether a screen-share recording exists (and a secondary player is expected).
    pub fn has_screenshare(&self) -> bool {
        !self.screenshare.is_empty()
    }

    /// Header title, `name - date`.
    pub fn title(&self) -> String {
        format_title(&self.metadata.name, self.metadata.epoch)
    }

    /// Recording length: the metadata duration, or the latest timestamp seen.
    pub fn duration(&self) -> f64 {
        if let Some(duration) = self.metadata.duration {
            return duration;
        }
        TimelineId::ALL
            .iter()
            .flat_map(|&id| self.index(id).spans().last().copied())
            .map(|span| span.end.filter(|end| end.is_finite()).unwrap_or(span.start))
            .fold(0.0, f64::max)
    }

    /// Item count per timeline, in [`TimelineId::ALL`] order.
    pub fn counts(&self) -> Vec<(TimelineId, usize)> {
        TimelineId::ALL
            .iter()
            .map(|&id| (id, self.index(id).len()))
            .collect()
    }
}

fn build<T>(id: TimelineId, items: Vec<TimedItem<T>>) -> Result<EventTimeline<T>, TimelineError> {
    EventTimeline::new(id.name(), items, Session::policy(id)).map_err(|err| {
        tracing::warn!(timeline = %id, error = %err, "rejected session timeline");
        err
    })
}
