//! Payload-free time index over a sorted sequence of spans.
//!
//! The index is what resolvers hold on to: a cheap-to-clone, immutable view
//! of the start/end times of one timeline, independent of the payload type.

use std::sync::Arc;

use crate::error::TimelineError;
use crate::timeline::item::{GapPolicy, Span};

/// Sorted spans of one timeline plus the prefix maximum of their ends.
#[derive(Debug, Clone)]
pub struct TimeIndex {
    spans: Arc<[Span]>,
    /// `reach[i]` is the latest end among `spans[..=i]` (infinity when any is open).
    reach: Arc<[f64]>,
    /// Max-tree over span ends: node 1 is the root, leaves start at `leaves`.
    ends: Arc<[f64]>,
    leaves: usize,
    policy: GapPolicy,
}

impl TimeIndex {
    /// Validate `spans` and build the index.
    ///
    /// # Arguments
    /// * `timeline` - Name used in error messages
    /// * `spans` - Spans in recording order
    /// * `policy` - What lookups report after the last started item ends
    ///
    /// # Errors
    /// Fails on the first negative/non-finite start, decreasing start, or
    /// end before start.
    pub fn build(
        timeline: &str,
        spans: Vec<Span>,
        policy: GapPolicy,
    ) -> Result<Self, TimelineError> {
        let mut reach = Vec::with_capacity(spans.len());
        let mut furthest = f64::NEG_INFINITY;
        let mut previous: Option<f64> = None;

        for (index, span) in spans.iter().enumerate() {
            if !span.start.is_finite() || span.start < 0.0 {
                return Err(TimelineError::InvalidTimestamp {
                    timeline: timeline.to_string(),
                    index,
                });
            }
            if let Some(previous) = previous {
                if span.start < previous {
                    return Err(TimelineError::Unsorted {
                        timeline: timeline.to_string(),
                        index,
                        previous,
                        start: span.start,
                    });
                }
            }
            if let Some(end) = span.end {
                if end.is_nan() {
                    return Err(TimelineError::InvalidTimestamp {
                        timeline: timeline.to_string(),
                        index,
                    });
                }
                if end < span.start {
                    return Err(TimelineError::InvertedInterval {
                        timeline: timeline.to_string(),
                        index,
                        start: span.start,
                        end,
                    });
                }
            }

            previous = Some(span.start);
            furthest = furthest.max(span.end_or_infinity());
            reach.push(furthest);
        }

        let leaves = spans.len().next_power_of_two();
        let mut ends = vec![f64::NEG_INFINITY; 2 * leaves];
        for (i, span) in spans.iter().enumerate() {
            ends[leaves + i] = span.end_or_infinity();
        }
        for node in (1..leaves).rev() {
            ends[node] = ends[2 * node].max(ends[2 * node + 1]);
        }

        Ok(Self {
            spans: spans.into(),
            reach: reach.into(),
            ends: ends.into(),
            leaves,
            policy,
        })
    }

    pub fn empty(policy: GapPolicy) -> Self {
        Self {
            spans: Arc::from(Vec::new()),
            reach: Arc::from(Vec::new()),
            ends: Arc::from(vec![f64::NEG_INFINITY; 2]),
            leaves: 1,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn policy(&self) -> GapPolicy {
        self.policy
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    /// Number of items whose start is `<= t` (binary search).
    ///
    /// Equal starts all count, so the last of a group of simultaneous items
    /// ends up being the one reported.
    pub fn entered(&self, t: f64) -> usize {
        self.spans.partition_point(|span| span.start <= t)
    }

    /// Continue counting entered items from a known lower bound.
    ///
    /// `from` must not exceed `entered(t)`; the result equals `entered(t)`.
    pub fn entered_from(&self, from: usize, t: f64) -> usize {
        let mut entered = from.min(self.spans.len());
        while entered < self.spans.len() && self.spans[entered].start <= t {
            entered += 1;
        }
        entered
    }

    /// Turn an entered count into the active index under this index's gap policy.
    pub fn active_for(&self, entered: usize, t: f64) -> Option<usize> {
        let last = entered.checked_sub(1)?;
        match self.policy {
            GapPolicy::Hold => Some(last),
            GapPolicy::Gaps => self.spans[last].contains(t).then_some(last),
        }
    }

    /// Index of the item active at `t`: the last item with `start <= t`,
    /// subject to the gap policy.
    pub fn lookup(&self, t: f64) -> Option<usize> {
        self.active_for(self.entered(t), t)
    }

    /// Whether any span contains `t`, overlaps included.
    pub fn covers(&self, t: f64) -> bool {
        self.covers_entered(self.entered(t), t)
    }

    pub(crate) fn covers_entered(&self, entered: usize, t: f64) -> bool {
        entered
            .checked_sub(1)
            .map_or(false, |last| self.reach[last] > t)
    }

    /// Most recently started span that contains `t`.
    ///
    /// Among the `entered` spans every one has started, so the answer is the
    /// last of them whose end lies past `t`. Found in O(log n) on the end tree.
    pub fn frontmost_entered(&self, entered: usize, t: f64) -> Option<usize> {
        if !self.covers_entered(entered, t) {
            return None;
        }
        self.last_open(1, 0, self.leaves, entered.min(self.spans.len()), t)
    }

    /// Rightmost leaf below `limit` under `node` (covering `lo..hi`) with end > `t`.
    fn last_open(&self, node: usize, lo: usize, hi: usize, limit: usize, t: f64) -> Option<usize> {
        if lo >= limit || self.ends[node] <= t {
            return None;
        }
        if hi - lo == 1 {
            return Some(lo);
        }
        let mid = lo + (hi - lo) / 2;
        self.last_open(2 * node + 1, mid, hi, limit, t)
            .or_else(|| self.last_open(2 * node, lo, mid, limit, t))
    }
}
