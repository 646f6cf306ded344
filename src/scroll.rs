//! Auto-scroll for the chat/transcript view.
//!
//! Keeps the current message visible by aligning it with the top or bottom
//! edge of its container, and leaves the scroll position alone when the
//! message is already fully in view.

use serde::{Deserialize, Serialize};

/// Offsets closer than this are the same position (layout values are fractional pixels).
const EPSILON: f64 = 1e-6;

/// Container edge the current node is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollEdge {
    Top,
    #[default]
    Bottom,
}

/// Layout snapshot taken after render.
///
/// Offsets are measured in the same coordinate space (e.g. offsetTop of
/// the nodes); the first node's offset is the origin of the scroll range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollAnchor {
    pub first_node_offset: f64,
    pub current_node_offset: f64,
    pub current_node_height: f64,
    pub container_height: f64,
    /// Current scroll position of the container
    pub scroll_top: f64,
}

/// Change to apply to the container's scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub delta: f64,
}

impl ScrollDelta {
    pub const NONE: ScrollDelta = ScrollDelta { delta: 0.0 };

    pub fn is_none(&self) -> bool {
        self.delta == 0.0
    }

    /// Scroll position after applying this delta.
    pub fn apply(&self, scroll_top: f64) -> f64 {
        scroll_top + self.delta
    }
}

/// Compute the minimal scroll change that brings the current node into view.
///
/// # Arguments
/// * `anchor` - Geometry of the first and current nodes and the container
/// * `edge` - Edge the current node should line up with when it is out of view
///
/// # Returns
/// `ScrollDelta::NONE` when the node is already fully visible, when the
/// container is already at the aligned position, or when the geometry is
/// not finite.
pub fn compute_scroll(anchor: &ScrollAnchor, edge: ScrollEdge) -> ScrollDelta {
    let finite = [
        anchor.first_node_offset,
        anchor.current_node_offset,
        anchor.current_node_height,
        anchor.container_height,
        anchor.scroll_top,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return ScrollDelta::NONE;
    }

    let node_top = anchor.current_node_offset - anchor.first_node_offset;
    let node_bottom = node_top + anchor.current_node_height;
    let view_top = anchor.scroll_top;
    let view_bottom = view_top + anchor.container_height;

    if node_top >= view_top - EPSILON && node_bottom <= view_bottom + EPSILON {
        return ScrollDelta::NONE;
    }

    let target = match edge {
        ScrollEdge::Top => node_top,
        ScrollEdge::Bottom => node_bottom - anchor.container_height,
    }
    .max(0.0);

    let delta = target - anchor.scroll_top;
    if delta.abs() < EPSILON {
        return ScrollDelta::NONE;
    }
    ScrollDelta { delta }
}

/// Runs [`compute_scroll`] only when the current node changes.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnchorCalculator {
    edge: ScrollEdge,
    last_index: Option<usize>,
}

impl ScrollAnchorCalculator {
    pub fn new(edge: ScrollEdge) -> Self {
        Self {
            edge,
            last_index: None,
        }
    }

    pub fn edge(&self) -> ScrollEdge {
        self.edge
    }

    /// Scroll change for the node at `index`.
    ///
    /// Returns `ScrollDelta::NONE` without looking at the geometry when
    /// `index` is the node handled last time, or when there is no node.
    pub fn update(&mut self, index: Option<usize>, anchor: &ScrollAnchor) -> ScrollDelta {
        if index.is_none() || index == self.last_index {
            return ScrollDelta::NONE;
        }
        self.last_index = index;
        compute_scroll(anchor, self.edge)
    }

    /// Force the next update to recompute (e.g. after the container resized).
    pub fn invalidate(&mut self) {
        self.last_index = None;
    }
}
