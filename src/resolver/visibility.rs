//! Interval membership for visibility windows (screen-share, overlays).
//!
//! Windows are `[start, end)`; a window with no end stays open for the rest
//! of the recording. Overlapping windows are tolerated: a time is visible if
//! any window contains it, and the most recently started containing window
//! is the frontmost one.

use std::hash::Hash;

use crate::resolver::{ActiveIndexResolver, ResolverStats, TimelineId};
use crate::timeline::TimeIndex;

/// Answers "is time t inside any window" per interval timeline.
#[derive(Debug, Clone)]
pub struct VisibilityWindowResolver<K = TimelineId> {
    entered: ActiveIndexResolver<K>,
}

impl<K: Copy + Eq + Hash> VisibilityWindowResolver<K> {
    pub fn new(max_forward_step: f64) -> Self {
        Self {
            entered: ActiveIndexResolver::new(max_forward_step),
        }
    }

    pub fn insert(&mut self, id: K, windows: TimeIndex) {
        self.entered.insert(id, windows);
    }

    pub fn contains(&self, id: K) -> bool {
        self.entered.contains(id)
    }

    /// Whether `t` falls inside any window of timeline `id`.
    ///
    /// Unknown or empty timelines are never active.
    pub fn is_active(&mut self, id: K, t: f64) -> bool {
        self.entered
            .advance(id, t)
            .map_or(false, |(windows, entered)| windows.covers_entered(entered, t))
    }

    /// Index of the most recently started window that contains `t`.
    pub fn frontmost(&mut self, id: K, t: f64) -> Option<usize> {
        let (windows, entered) = self.entered.advance(id, t)?;
        windows.frontmost_entered(entered, t)
    }

    /// Among several window timelines, the one whose containing window
    /// started most recently. Later ids win ties.
    pub fn frontmost_among(&mut self, ids: &[K], t: f64) -> Option<K> {
        let mut best: Option<(K, f64)> = None;
        for &id in ids {
            let Some(window) = self.frontmost(id, t) else {
                continue;
            };
            let start = self
                .entered
                .index(id)
                .and_then(|windows| windows.span(window))
                .map_or(f64::NEG_INFINITY, |span| span.start);
            if best.map_or(true, |(_, best_start)| start >= best_start) {
                best = Some((id, start));
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn stats(&self) -> ResolverStats {
        self.entered.stats()
    }
}

impl<K: Copy + Eq + Hash> Default for VisibilityWindowResolver<K> {
    fn default() -> Self {
        Self::new(ActiveIndexResolver::<K>::DEFAULT_MAX_FORWARD_STEP)
    }
}
