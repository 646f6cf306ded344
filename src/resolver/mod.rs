//! Resolvers that turn a logical playback time into "current" indices.
//!
//! - `active`: `ActiveIndexResolver`, index of the current item per timeline
//!   with a forward-scan fast path for normal playback
//! - `visibility`: `VisibilityWindowResolver`, interval membership and the
//!   frontmost window among overlapping ones

mod active;
mod visibility;

use serde::{Deserialize, Serialize};

pub use active::{ActiveIndexResolver, ResolverStats};
pub use visibility::VisibilityWindowResolver;

/// Identifies one timeline of a recorded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineId {
    Chat,
    Cursor,
    PanZooms,
    Slides,
    Screenshare,
}

impl TimelineId {
    pub const ALL: [TimelineId; 5] = [
        TimelineId::Chat,
        TimelineId::Cursor,
        TimelineId::PanZooms,
        TimelineId::Slides,
        TimelineId::Screenshare,
    ];

    /// Name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Cursor => "cursor",
            Self::PanZooms => "panzooms",
            Self::Slides => "slides",
            Self::Screenshare => "screenshare",
        }
    }
}

impl std::fmt::Display for TimelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
