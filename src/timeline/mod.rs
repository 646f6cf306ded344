//! Time-ordered event timelines.
//!
//! A recorded session is a handful of independent, pre-sorted sequences
//! (chat lines, cursor samples, pan-zoom keyframes, slides, screen-share
//! windows). Each one is loaded once into an [`EventTimeline`] and never
//! mutated afterwards.
//!
//! # Module Structure
//!
//! - [`item`] - `TimedItem`, `Span` and the per-timeline `GapPolicy`
//! - [`index`] - `TimeIndex`, the payload-free lookup structure shared with resolvers
//! - [`event_timeline`] - `EventTimeline<T>`, spans plus payloads

mod event_timeline;
mod index;
mod item;

pub use event_timeline::EventTimeline;
pub use index::TimeIndex;
pub use item::{GapPolicy, Span, TimedItem};
