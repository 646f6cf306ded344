//! recsync - synchronized playback of multi-track session recordings.
//!
//! A recording consists of a main video, an optional screen-share video, and
//! several time-indexed data tracks (chat, cursor, pan-zoom, slides,
//! screen-share windows). This crate keeps the two videos on one clock and
//! answers, for any playback time, which item of each track is current.
//!
//! # Architecture
//!
//! - `timeline`: immutable sorted timelines with O(log n) lookup
//! - `resolver`: per-timeline active index with a forward-scan fast path,
//!   and visibility windows
//! - `sync`: the clock synchronizer and the `PlayerHandle` seam to the host
//! - `scroll`: chat auto-scroll offsets
//! - `session`: the recorded session document and its validation
//! - `playback`: the engine tying all of the above into one frame per update
//!
//! # Usage
//!
//! ```no_run
//! use recsync::{Config, Playback, PlayerEvent, Session, SimulatedPlayer, Slot};
//!
//! let session = Session::load("session.json").unwrap();
//! let mut playback = Playback::new(session, Config::default());
//! playback.register(Slot::Master, SimulatedPlayer::new(0.0));
//! if let Some(frame) = playback.handle_event(PlayerEvent::TimeUpdate) {
//!     println!("chat index: {:?}", frame.chat_index);
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod playback;
pub mod resolver;
pub mod scroll;
pub mod session;
pub mod sync;
pub mod timeline;

pub use config::Config;
pub use error::{SessionError, TimelineError};
pub use playback::{ActiveMain, Playback, PlaybackFrame};
pub use resolver::{ActiveIndexResolver, TimelineId, VisibilityWindowResolver};
pub use scroll::{compute_scroll, ScrollAnchor, ScrollAnchorCalculator, ScrollDelta, ScrollEdge};
pub use session::{Session, SessionData};
pub use sync::{
    ClockSynchronizer, PlayerError, PlayerEvent, PlayerHandle, SimulatedPlayer, Slot, SyncState,
};
pub use timeline::{EventTimeline, GapPolicy, Span, TimeIndex, TimedItem};
