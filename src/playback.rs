//! Playback engine: one clock, one frame of outputs per update.
//!
//! The host forwards master player notifications to [`Playback::handle_event`].
//! Each accepted update produces a [`PlaybackFrame`] with the current index of
//! every timeline and flags saying what changed since the previous frame, so
//! the rendering layer only redraws what moved.

use std::fmt::Write as _;

use crate::config::Config;
use crate::format::format_timestamp;
use crate::resolver::{ActiveIndexResolver, TimelineId, VisibilityWindowResolver};
use crate::scroll::{ScrollAnchor, ScrollAnchorCalculator, ScrollDelta};
use crate::session::{ChatMessage, CursorSample, PanZoom, Session, Slide};
use crate::sync::{ClockSynchronizer, PlayerEvent, PlayerHandle, Slot, SyncState, SyncStats};

/// Which main view is frontmost. Exactly one of the two is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMain {
    pub presentation: bool,
    pub screenshare: bool,
}

impl ActiveMain {
    pub fn new(screenshare: bool) -> Self {
        Self {
            presentation: !screenshare,
            screenshare,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.screenshare {
            "screenshare"
        } else {
            "presentation"
        }
    }
}

/// Resolved outputs for one logical time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackFrame {
    /// Logical playback time in seconds
    pub time: f64,
    /// Logical time rounded to the second, for the clock display
    pub display_second: u64,
    pub chat_index: Option<usize>,
    pub slide_index: Option<usize>,
    pub cursor_index: Option<usize>,
    pub panzoom_index: Option<usize>,
    pub screenshare_active: bool,
    pub main: ActiveMain,
    pub chat_changed: bool,
    pub slide_changed: bool,
    pub main_changed: bool,
}

impl PlaybackFrame {
    /// Whether anything the presentation layer renders changed.
    pub fn changed(&self) -> bool {
        self.chat_changed || self.slide_changed || self.main_changed
    }

    /// Human-readable summary of the frame (used by `recsync inspect`).
    pub fn describe(&self, session: &Session) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "t={:.2}s ({})", self.time, format_timestamp(self.time));

        let chat = describe_item(self.chat_index, |i| {
            session.chat.get(i).map(|m| {
                format!("[{}] {}: {}", format_timestamp(m.timestamp), m.name, m.message)
            })
        });
        let slide = describe_item(self.slide_index, |i| {
            session.slides.get(i).map(|s| s.id.clone())
        });
        let cursor = describe_item(self.cursor_index, |i| {
            session.cursor.get(i).map(|c| {
                if c.is_visible() {
                    format!("({:.2}, {:.2})", c.x, c.y)
                } else {
                    "hidden".to_string()
                }
            })
        });
        let panzoom = describe_item(self.panzoom_index, |i| {
            session
                .panzooms
                .get(i)
                .map(|p| format!("{},{} {}x{}", p.x, p.y, p.width, p.height))
        });

        let _ = writeln!(out, "  chat:    {}", chat);
        let _ = writeln!(out, "  slide:   {}", slide);
        let _ = writeln!(out, "  cursor:  {}", cursor);
        let _ = writeln!(out, "  panzoom: {}", panzoom);
        let _ = writeln!(out, "  main:    {}", self.main.name());
        out
    }
}

fn describe_item(index: Option<usize>, detail: impl FnOnce(usize) -> Option<String>) -> String {
    match index {
        Some(i) => match detail(i) {
            Some(text) => format!("#{} {}", i, text),
            None => format!("#{}", i),
        },
        None => "-".to_string(),
    }
}

/// Ties a session's timelines to the two media players.
pub struct Playback<P> {
    session: Session,
    config: Config,
    clock: ClockSynchronizer<P>,
    resolver: ActiveIndexResolver<TimelineId>,
    windows: VisibilityWindowResolver<TimelineId>,
    scroll: ScrollAnchorCalculator,
    frame: Option<PlaybackFrame>,
}

impl<P: PlayerHandle> Playback<P> {
    pub fn new(session: Session, config: Config) -> Self {
        let step = config.resolver.max_forward_step;
        let mut resolver = ActiveIndexResolver::new(step);
        for id in [
            TimelineId::Chat,
            TimelineId::Cursor,
            TimelineId::PanZooms,
            TimelineId::Slides,
        ] {
            resolver.insert(id, session.index(id).clone());
        }
        let mut windows = VisibilityWindowResolver::new(step);
        windows.insert(
            TimelineId::Screenshare,
            session.index(TimelineId::Screenshare).clone(),
        );

        Self {
            clock: ClockSynchronizer::new(config.sync.clone()),
            scroll: ScrollAnchorCalculator::new(config.scroll.edge),
            session,
            config,
            resolver,
            windows,
            frame: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A player reported ready.
    pub fn register(&mut self, slot: Slot, handle: P) -> Option<P> {
        if slot == Slot::Secondary && !self.session.has_screenshare() {
            tracing::debug!(
                "secondary player registered for a session without screen-share windows"
            );
        }
        self.clock.register(slot, handle)
    }

    pub fn unregister(&mut self, slot: Slot) -> Option<P> {
        self.clock.unregister(slot)
    }

    pub fn sync_state(&self) -> SyncState {
        self.clock.state()
    }

    pub fn sync_stats(&self) -> SyncStats {
        self.clock.stats()
    }

    pub fn last_drift(&self) -> Option<f64> {
        self.clock.last_drift()
    }

    /// Forward a master player notification.
    ///
    /// Returns the new frame, or `None` when no logical time is available
    /// (no master registered, or it is not answering).
    pub fn handle_event(&mut self, event: PlayerEvent) -> Option<PlaybackFrame> {
        let time = self.clock.handle_event(event)?;
        Some(self.resolve(time))
    }

    /// Resolve every timeline at `time` and record the frame.
    pub fn resolve(&mut self, time: f64) -> PlaybackFrame {
        let chat_index = self.resolver.resolve(TimelineId::Chat, time);
        let slide_index = self.resolver.resolve(TimelineId::Slides, time);
        let cursor_index = self.resolver.resolve(TimelineId::Cursor, time);
        let panzoom_index = self.resolver.resolve(TimelineId::PanZooms, time);
        let screenshare_active = self.windows.is_active(TimelineId::Screenshare, time);
        let main = ActiveMain::new(screenshare_active);

        let previous = self.frame.as_ref();
        let frame = PlaybackFrame {
            time,
            display_second: time.round().max(0.0) as u64,
            chat_index,
            slide_index,
            cursor_index,
            panzoom_index,
            screenshare_active,
            main,
            chat_changed: previous.map_or(true, |p| p.chat_index != chat_index),
            slide_changed: previous.map_or(true, |p| p.slide_index != slide_index),
            main_changed: previous.map_or(true, |p| p.main != main),
        };

        self.frame = Some(frame.clone());
        frame
    }

    /// Most recent frame.
    pub fn frame(&self) -> Option<&PlaybackFrame> {
        self.frame.as_ref()
    }

    /// Seek the master (and, through the seek path, the secondary).
    ///
    /// `None` when the seek was rejected or the master stopped answering; the
    /// previous frame is kept in that case.
    pub fn seek(&mut self, seconds: f64) -> Option<PlaybackFrame> {
        let time = self.clock.seek(seconds)?;
        Some(self.resolve(time))
    }

    /// Jump to a chat message (click on its avatar).
    ///
    /// Returns `false` for an unknown index or when the master rejects the seek.
    pub fn seek_to_chat(&mut self, index: usize) -> bool {
        match self.session.chat.span(index) {
            Some(span) => self.seek(span.start).is_some(),
            None => false,
        }
    }

    /// Whether the chat message at `index` has been said by now.
    pub fn is_chat_spoken(&self, index: usize) -> bool {
        self.frame
            .as_ref()
            .and_then(|f| f.chat_index)
            .map_or(false, |current| index <= current)
    }

    pub fn current_chat(&self) -> Option<&ChatMessage> {
        let index = self.frame.as_ref()?.chat_index?;
        self.session.chat.get(index)
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        let index = self.frame.as_ref()?.slide_index?;
        self.session.slides.get(index)
    }

    /// Current cursor sample, if the cursor is shown.
    pub fn current_cursor(&self) -> Option<&CursorSample> {
        let index = self.frame.as_ref()?.cursor_index?;
        self.session.cursor.get(index).filter(|c| c.is_visible())
    }

    pub fn current_panzoom(&self) -> Option<&PanZoom> {
        let index = self.frame.as_ref()?.panzoom_index?;
        self.session.panzooms.get(index)
    }

    /// Scroll change for the chat view after it rendered the current frame.
    pub fn scroll_delta(&mut self, anchor: &ScrollAnchor) -> ScrollDelta {
        if !self.config.scroll.auto_scroll {
            return ScrollDelta::NONE;
        }
        let index = self.frame.as_ref().and_then(|f| f.chat_index);
        self.scroll.update(index, anchor)
    }
}
