//! Stack layout computation.
//!
//! [`compute_stack_layout`] is a pure function from the visible children,
//! the config and the container bounds to a [`StackLayout`]. [`StackView`]
//! feeds it and applies the result to the view tree.
//!
//! [`StackView`]: crate::StackView

use plkit_core::{Axis, Rect, Size, ViewId};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{Alignment, StackConfig};
use crate::distribute::{self, MainItem, Span};
use crate::gap::GapRole;

/// Input for one visible child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackItem {
    /// The child view
    pub view: ViewId,
    /// Measured size from the host
    pub measured: Size,
    /// Space after this child
    pub spacing: f32,
}

impl StackItem {
    /// Create an item.
    #[must_use]
    pub const fn new(view: ViewId, measured: Size, spacing: f32) -> Self {
        Self {
            view,
            measured,
            spacing,
        }
    }
}

/// Frame assigned to one child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangedFrame {
    /// The child view
    pub view: ViewId,
    /// Assigned frame, in the container's coordinate space
    pub frame: Rect,
}

/// Synthetic spacer between two visible children.
///
/// Zero-thickness on the cross axis; positioned on the center line of the
/// child before the leader gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapSpacer {
    /// Child before the gap
    pub after: ViewId,
    /// Child after the gap
    pub before: ViewId,
    /// Spacer geometry
    pub frame: Rect,
    /// Leader or follower
    pub role: GapRole,
}

impl GapSpacer {
    /// Main-axis length of the gap.
    #[must_use]
    pub const fn length(&self, axis: Axis) -> f32 {
        axis.main_of(self.frame.size())
    }
}

/// Result of one layout computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StackLayout {
    /// One frame per visible child, in order
    pub frames: Vec<ArrangedFrame>,
    /// Gap spacers, empty unless the distribution uses them
    pub gaps: Vec<GapSpacer>,
    /// Largest measured cross size among visible children
    pub intrinsic_cross: f32,
    /// Whether `intrinsic_cross` differs from the previous pass
    #[serde(default)]
    pub intrinsic_changed: bool,
}

impl StackLayout {
    /// Frame assigned to `view`, if it took part.
    #[must_use]
    pub fn frame_of(&self, view: ViewId) -> Option<Rect> {
        self.frames.iter().find(|f| f.view == view).map(|f| f.frame)
    }
}

/// Cross-axis span of a child under `alignment`.
pub(crate) fn cross_span(alignment: Alignment, container: f32, measured: f32) -> Span {
    match alignment {
        Alignment::Fill => Span::new(0.0, container),
        Alignment::Leading => Span::new(0.0, measured),
        Alignment::Center => Span::new((container - measured) / 2.0, measured),
        Alignment::Trailing => Span::new(container - measured, measured),
    }
}

/// Compute frames for `items` (already filtered to visible children).
///
/// Frames are offset by the bounds origin. An empty item list yields an empty
/// layout.
#[must_use]
pub fn compute_stack_layout(config: StackConfig, bounds: Rect, items: &[StackItem]) -> StackLayout {
    let axis = config.axis;
    let container_main = axis.main_of(bounds.size());
    let container_cross = axis.cross_of(bounds.size());
    let origin_main = axis.start_of(bounds);
    let origin_cross = axis.cross().start_of(bounds);

    let main_items: Vec<MainItem> = items
        .iter()
        .map(|i| MainItem::new(axis.main_of(i.measured), i.spacing))
        .collect();
    let plan = distribute::plan(config.distribution, &main_items, container_main);

    let mut cross_spans = Vec::with_capacity(items.len());
    let frames: Vec<ArrangedFrame> = items
        .iter()
        .zip(&plan.spans)
        .map(|(item, main)| {
            let cross = cross_span(config.alignment, container_cross, axis.cross_of(item.measured));
            cross_spans.push(cross);
            ArrangedFrame {
                view: item.view,
                frame: axis.rect(
                    origin_main + main.start,
                    origin_cross + cross.start,
                    main.len,
                    cross.len,
                ),
            }
        })
        .collect();

    // Every gap shares the leader's cross line: the center of the first child.
    let gap_cross = cross_spans
        .first()
        .map_or(0.0, |s: &Span| s.start + s.len / 2.0);
    let gaps: Vec<GapSpacer> = plan
        .gaps
        .iter()
        .map(|g| GapSpacer {
            after: items[g.after].view,
            before: items[g.after + 1].view,
            frame: axis.rect(origin_main + g.span.start, origin_cross + gap_cross, g.span.len, 0.0),
            role: g.role,
        })
        .collect();

    let intrinsic_cross = items
        .iter()
        .map(|i| axis.cross_of(i.measured))
        .fold(0.0f32, f32::max);

    trace!(
        distribution = ?config.distribution,
        axis = ?axis,
        children = items.len(),
        "stack layout computed"
    );

    StackLayout {
        frames,
        gaps,
        intrinsic_cross,
        intrinsic_changed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Distribution;
    use plkit_core::ViewTree;

    fn three(tree: &mut ViewTree, sizes: [(f32, f32); 3], spacings: [f32; 3]) -> Vec<StackItem> {
        sizes
            .iter()
            .zip(spacings)
            .map(|(&(w, h), s)| {
                let size = Size::new(w, h);
                StackItem::new(tree.insert(size), size, s)
            })
            .collect()
    }

    #[test]
    fn test_cross_span_alignment() {
        assert_eq!(cross_span(Alignment::Fill, 40.0, 10.0), Span::new(0.0, 40.0));
        assert_eq!(cross_span(Alignment::Leading, 40.0, 10.0), Span::new(0.0, 10.0));
        assert_eq!(cross_span(Alignment::Center, 40.0, 10.0), Span::new(15.0, 10.0));
        assert_eq!(cross_span(Alignment::Trailing, 40.0, 10.0), Span::new(30.0, 10.0));
    }

    #[test]
    fn test_empty_items() {
        let layout = compute_stack_layout(StackConfig::new(), Rect::new(0.0, 0.0, 10.0, 10.0), &[]);
        assert!(layout.frames.is_empty());
        assert_eq!(layout.intrinsic_cross, 0.0);
    }

    #[test]
    fn test_horizontal_fill_frames() {
        let mut tree = ViewTree::new();
        let items = three(&mut tree, [(40.0, 10.0), (60.0, 30.0), (50.0, 20.0)], [10.0, 10.0, 0.0]);
        let config = StackConfig::new().alignment(Alignment::Center);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, 200.0, 40.0), &items);

        assert_eq!(layout.frames[0].frame, Rect::new(0.0, 15.0, 40.0, 10.0));
        assert_eq!(layout.frames[1].frame, Rect::new(50.0, 5.0, 60.0, 30.0));
        assert_eq!(layout.frames[2].frame, Rect::new(120.0, 10.0, 80.0, 20.0));
        assert_eq!(layout.intrinsic_cross, 30.0);
    }

    #[test]
    fn test_vertical_swaps_axes() {
        let mut tree = ViewTree::new();
        let items = three(&mut tree, [(10.0, 40.0), (30.0, 60.0), (20.0, 50.0)], [10.0, 10.0, 0.0]);
        let config = StackConfig::new().axis(Axis::Vertical).alignment(Alignment::Leading);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, 50.0, 200.0), &items);

        assert_eq!(layout.frames[1].frame, Rect::new(0.0, 50.0, 30.0, 60.0));
        assert_eq!(layout.frames[2].frame, Rect::new(0.0, 120.0, 20.0, 80.0));
        assert_eq!(layout.intrinsic_cross, 30.0);
    }

    #[test]
    fn test_bounds_origin_offsets_frames() {
        let mut tree = ViewTree::new();
        let items = three(&mut tree, [(10.0, 10.0); 3], [0.0; 3]);
        let config = StackConfig::new().distribution(Distribution::FillEqually);
        let layout = compute_stack_layout(config, Rect::new(100.0, 50.0, 30.0, 10.0), &items);
        assert_eq!(layout.frames[0].frame, Rect::new(100.0, 50.0, 10.0, 10.0));
        assert_eq!(layout.frames[2].frame, Rect::new(120.0, 50.0, 10.0, 10.0));
    }

    #[test]
    fn test_gaps_sit_on_leader_center_line() {
        let mut tree = ViewTree::new();
        let items = three(&mut tree, [(40.0, 10.0), (60.0, 30.0), (50.0, 20.0)], [10.0, 10.0, 0.0]);
        let config = StackConfig::new()
            .distribution(Distribution::EqualSpacing)
            .alignment(Alignment::Leading);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, 300.0, 40.0), &items);

        assert_eq!(layout.gaps.len(), 2);
        assert_eq!(layout.gaps[0].frame, Rect::new(40.0, 5.0, 75.0, 0.0));
        assert_eq!(layout.gaps[1].frame.y, 5.0);
        assert_eq!(layout.gaps[0].after, items[0].view);
        assert_eq!(layout.gaps[0].before, items[1].view);
        assert_eq!(layout.gaps[1].length(Axis::Horizontal), 75.0);
    }

    #[test]
    fn test_frame_of() {
        let mut tree = ViewTree::new();
        let items = three(&mut tree, [(10.0, 10.0); 3], [0.0; 3]);
        let layout = compute_stack_layout(StackConfig::new(), Rect::new(0.0, 0.0, 30.0, 10.0), &items);
        assert_eq!(layout.frame_of(items[1].view), Some(Rect::new(10.0, 0.0, 10.0, 10.0)));
    }
}
