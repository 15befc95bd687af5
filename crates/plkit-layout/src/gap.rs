//! Gap spacers for the equal-spacing and equal-centering distributions.
//!
//! One gap sits between each adjacent pair of visible children. The first gap
//! is the leader: its length is the ideal gap, floored at the spacing the
//! first child asked for. Every later gap follows the leader exactly, so the
//! spacing stays uniform even when the ideal gap is not attainable.

use serde::{Deserialize, Serialize};

use crate::distribute::{MainItem, Span};

/// Whether a gap's length is resolved independently or copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapRole {
    /// First gap, authoritative length
    Leader,
    /// Copies the leader's length
    Follower,
}

/// What a gap measures between two neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GapAnchor {
    /// Trailing edge of one child to leading edge of the next
    Edges,
    /// Center of one child to center of the next
    Centers,
}

/// Main-axis extent of one gap spacer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GapSpan {
    /// Index of the child before the gap
    pub after: usize,
    /// Main-axis extent
    pub span: Span,
    /// Leader or follower
    pub role: GapRole,
}

/// Resolved gaps plus the child spans they imply.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct GapAllocation {
    pub spans: Vec<Span>,
    pub gaps: Vec<GapSpan>,
    /// Length every gap resolved to
    pub gap: f32,
}

/// Ideal gap before the leader floor is applied.
fn ideal_gap(anchor: GapAnchor, items: &[MainItem], container: f32) -> f32 {
    let slots = (items.len() - 1) as f32;
    let occupied = match anchor {
        GapAnchor::Edges => items.iter().map(|i| i.measured).sum::<f32>(),
        GapAnchor::Centers => {
            let first = items.first().map_or(0.0, |i| i.measured);
            let last = items.last().map_or(0.0, |i| i.measured);
            (first + last) / 2.0
        }
    };
    (container - occupied) / slots
}

/// Allocate gaps for at least two items.
///
/// The leader's floor is the first item's spacing. Any shortfall against the
/// far edge is absorbed by the last child, floored at zero.
pub(crate) fn allocate(anchor: GapAnchor, items: &[MainItem], container: f32) -> GapAllocation {
    if items.len() < 2 {
        return GapAllocation::default();
    }

    let floor = items[0].spacing;
    let gap = ideal_gap(anchor, items, container).max(floor);
    let last = items.len() - 1;

    let mut spans = Vec::with_capacity(items.len());
    let mut gaps = Vec::with_capacity(last);

    match anchor {
        GapAnchor::Edges => {
            let mut pos = 0.0;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    gaps.push(GapSpan {
                        after: i - 1,
                        span: Span::new(pos, gap),
                        role: role_for(i - 1),
                    });
                    pos += gap;
                }
                let len = if i == last {
                    (container - pos).max(0.0)
                } else {
                    item.measured
                };
                spans.push(Span::new(pos, len));
                pos += len;
            }
        }
        GapAnchor::Centers => {
            let mut center = items[0].measured / 2.0;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    gaps.push(GapSpan {
                        after: i - 1,
                        span: Span::new(center, gap),
                        role: role_for(i - 1),
                    });
                    center += gap;
                }
                let len = if i == last {
                    (2.0 * (container - center)).max(0.0)
                } else {
                    item.measured
                };
                spans.push(Span::new(center - len / 2.0, len));
            }
        }
    }

    GapAllocation { spans, gaps, gap }
}

const fn role_for(index: usize) -> GapRole {
    if index == 0 {
        GapRole::Leader
    } else {
        GapRole::Follower
    }
}
