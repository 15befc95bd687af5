//! Main-axis distribution.
//!
//! Axis-agnostic: inputs are measured main-axis sizes and trailing spacings of
//! the visible children, output is one span per child plus any gap spacers.
//! In every mode the first child starts at the leading edge and the last
//! child's far edge is pinned to the container's far edge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Distribution;
use crate::gap::{self, GapAnchor, GapSpan};

/// A 1D extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Leading coordinate
    pub start: f32,
    /// Length
    pub len: f32,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub const fn new(start: f32, len: f32) -> Self {
        Self { start, len }
    }

    /// Trailing coordinate.
    #[must_use]
    pub fn end(&self) -> f32 {
        self.start + self.len
    }
}

/// Main-axis input for one visible child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MainItem {
    /// Measured main-axis size
    pub measured: f32,
    /// Space after this child
    pub spacing: f32,
}

impl MainItem {
    pub(crate) const fn new(measured: f32, spacing: f32) -> Self {
        Self { measured, spacing }
    }
}

/// Spans for every child plus gap spacers.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct MainAxisPlan {
    pub spans: Vec<Span>,
    pub gaps: Vec<GapSpan>,
}

/// Sum of the spacings between children; the last child's spacing is unused.
fn inner_spacing(items: &[MainItem]) -> f32 {
    let total: f32 = items.iter().map(|i| i.spacing).sum();
    total - items.last().map_or(0.0, |i| i.spacing)
}

/// Lay spans out edge to edge, with `len_of` choosing each length.
///
/// The last child is pinned to the far edge when `pin_last` is set.
fn flow(
    items: &[MainItem],
    container: f32,
    pin_last: bool,
    mut len_of: impl FnMut(usize, &MainItem) -> f32,
) -> Vec<Span> {
    let last = items.len().saturating_sub(1);
    let mut pos = 0.0;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let len = if pin_last && i == last {
                (container - pos).max(0.0)
            } else {
                len_of(i, item)
            };
            let span = Span::new(pos, len);
            pos += len + item.spacing;
            span
        })
        .collect()
}

/// Equal share for `FillEqually`.
///
/// Falls back to the last item with a positive measured size when the share
/// is not positive, and to zero when there is none.
pub(crate) fn equal_share(items: &[MainItem], container: f32) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let share = (container - inner_spacing(items)) / items.len() as f32;
    if share > 0.0 {
        return share;
    }
    let fallback = items
        .iter()
        .rev()
        .find(|i| i.measured > 0.0)
        .map_or(0.0, |i| i.measured);
    debug!(share, fallback, "fill-equally share not positive, using fallback");
    fallback
}

/// Compute the main-axis plan for the visible children.
pub(crate) fn plan(distribution: Distribution, items: &[MainItem], container: f32) -> MainAxisPlan {
    match items.len() {
        0 => return MainAxisPlan::default(),
        1 => {
            return MainAxisPlan {
                spans: vec![Span::new(0.0, container.max(0.0))],
                gaps: Vec::new(),
            }
        }
        _ => {}
    }

    match distribution {
        Distribution::Fill => MainAxisPlan {
            spans: flow(items, container, true, |_, item| item.measured),
            gaps: Vec::new(),
        },
        Distribution::FillEqually => {
            let share = equal_share(items, container);
            MainAxisPlan {
                spans: flow(items, container, false, |_, _| share),
                gaps: Vec::new(),
            }
        }
        Distribution::FillProportionally => {
            let total: f32 = items.iter().map(|i| i.measured).sum::<f32>() + inner_spacing(items);
            MainAxisPlan {
                spans: flow(items, container, true, |_, item| {
                    if total > 0.0 {
                        container * (item.measured / total)
                    } else {
                        0.0
                    }
                }),
                gaps: Vec::new(),
            }
        }
        Distribution::EqualSpacing | Distribution::EqualCentering => {
            let anchor = if distribution == Distribution::EqualSpacing {
                GapAnchor::Edges
            } else {
                GapAnchor::Centers
            };
            let alloc = gap::allocate(anchor, items, container);
            MainAxisPlan {
                spans: alloc.spans,
                gaps: alloc.gaps,
            }
        }
    }
}
