//! Active index resolution with a monotonic fast path.
//!
//! Playback mostly moves forward in small steps, so each timeline remembers
//! where the previous query landed and scans forward from there. Seeks
//! backwards, or jumps further than `max_forward_step`, fall back to a
//! binary search. Both paths produce the same answer.

use std::collections::HashMap;
use std::hash::Hash;

use crate::resolver::TimelineId;
use crate::timeline::TimeIndex;

/// Counters for how queries were answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Queries answered by scanning forward from the previous position
    pub fast_path: u64,
    /// Queries answered by a full binary search
    pub binary_searches: u64,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    t: f64,
    entered: usize,
}

#[derive(Debug, Clone)]
struct Track {
    index: TimeIndex,
    cursor: Option<Cursor>,
}

/// Resolves "which item is current at time t" for a set of timelines.
#[derive(Debug, Clone)]
pub struct ActiveIndexResolver<K = TimelineId> {
    tracks: HashMap<K, Track>,
    max_forward_step: f64,
    stats: ResolverStats,
}

impl<K: Copy + Eq + Hash> ActiveIndexResolver<K> {
    /// Default forward gap (seconds) that still uses the scan path.
    pub const DEFAULT_MAX_FORWARD_STEP: f64 = 2.0;

    /// Create a resolver.
    ///
    /// # Arguments
    /// * `max_forward_step` - Largest forward jump (seconds) answered by scanning
    pub fn new(max_forward_step: f64) -> Self {
        Self {
            tracks: HashMap::new(),
            max_forward_step: max_forward_step.max(0.0),
            stats: ResolverStats::default(),
        }
    }

    pub fn max_forward_step(&self) -> f64 {
        self.max_forward_step
    }

    /// Register (or replace) a timeline. Any cached position is dropped.
    pub fn insert(&mut self, id: K, index: TimeIndex) {
        self.tracks.insert(
            id,
            Track {
                index,
                cursor: None,
            },
        );
    }

    pub fn remove(&mut self, id: K) -> Option<TimeIndex> {
        self.tracks.remove(&id).map(|track| track.index)
    }

    pub fn contains(&self, id: K) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn index(&self, id: K) -> Option<&TimeIndex> {
        self.tracks.get(&id).map(|track| &track.index)
    }

    /// Index active at `t` on timeline `id`.
    ///
    /// Never fails: unknown timelines, empty timelines, and times before the
    /// first item all resolve to `None`.
    pub fn resolve(&mut self, id: K, t: f64) -> Option<usize> {
        let (index, entered) = self.advance(id, t)?;
        index.active_for(entered, t)
    }

    /// Move the cached position of `id` to `t` and return how many items
    /// have started by then.
    pub(crate) fn advance(&mut self, id: K, t: f64) -> Option<(&TimeIndex, usize)> {
        let max_step = self.max_forward_step;
        let track = self.tracks.get_mut(&id)?;

        let entered = match track.cursor {
            Some(cursor) if t >= cursor.t && t - cursor.t <= max_step => {
                self.stats.fast_path += 1;
                track.index.entered_from(cursor.entered, t)
            }
            _ => {
                self.stats.binary_searches += 1;
                track.index.entered(t)
            }
        };

        if t.is_finite() {
            track.cursor = Some(Cursor { t, entered });
        }

        Some((&track.index, entered))
    }

    /// Forget every cached position (the next query per timeline binary-searches).
    pub fn reset(&mut self) {
        for track in self.tracks.values_mut() {
            track.cursor = None;
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }
}

impl<K: Copy + Eq + Hash> Default for ActiveIndexResolver<K> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FORWARD_STEP)
    }
}
