//! Immutable, time-ordered sequence of payloads.

use crate::error::TimelineError;
use crate::timeline::index::TimeIndex;
use crate::timeline::item::{GapPolicy, Span, TimedItem};

/// One category of recorded events, sorted by start time.
///
/// Built once at session load and read-only afterwards. Lookups are a
/// binary search over the start times.
#[derive(Debug, Clone)]
pub struct EventTimeline<T> {
    name: String,
    index: TimeIndex,
    payloads: Vec<T>,
}

impl<T> EventTimeline<T> {
    /// Build a timeline, failing fast if the items are not sorted by start
    /// or an interval ends before it starts.
    pub fn new(
        name: impl Into<String>,
        items: Vec<TimedItem<T>>,
        policy: GapPolicy,
    ) -> Result<Self, TimelineError> {
        let name = name.into();
        let (spans, payloads): (Vec<Span>, Vec<T>) = items
            .into_iter()
            .map(|item| (item.span(), item.payload))
            .unzip();
        let index = TimeIndex::build(&name, spans, policy)?;

        tracing::debug!(timeline = %name, items = payloads.len(), "built timeline");

        Ok(Self {
            name,
            index,
            payloads,
        })
    }

    pub fn empty(name: impl Into<String>, policy: GapPolicy) -> Self {
        Self {
            name: name.into(),
            index: TimeIndex::empty(policy),
            payloads: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// The payload-free index, shareable with resolvers.
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Index of the item active at `t`, or `None` before the first item
    /// (and inside gaps, for [`GapPolicy::Gaps`] timelines).
    pub fn lookup_active_index(&self, t: f64) -> Option<usize> {
        self.index.lookup(t)
    }

    /// Payload of the item active at `t`.
    pub fn active(&self, t: f64) -> Option<&T> {
        self.lookup_active_index(t).and_then(|i| self.payloads.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.payloads.get(index)
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.index.span(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Span, &T)> {
        self.index.spans().iter().copied().zip(self.payloads.iter())
    }
}
