//! Integration tests for plkit-layout.
//!
//! These tests drive a `StackView` against a `ViewTree` the way a host would:
//! mutate, let visibility flips schedule work, then run the coalesced pass.

use plkit_core::{Axis, Rect, Size, ViewId, ViewTree};
use plkit_layout::{
    compute_stack_layout, Alignment, Distribution, GapRole, StackConfig, StackItem, StackView,
};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn host(widths: &[f32], height: f32) -> (ViewTree, Vec<ViewId>) {
    let mut tree = ViewTree::new();
    let ids = widths
        .iter()
        .map(|&w| tree.insert(Size::new(w, height)))
        .collect();
    (tree, ids)
}

fn stack_of(tree: &ViewTree, ids: &[ViewId], spacings: &[f32], config: StackConfig) -> StackView {
    let mut stack = StackView::with_config(tree.visibility_hub(), config);
    for (&id, &spacing) in ids.iter().zip(spacings) {
        stack.add_child(id, spacing);
    }
    stack
}

fn xs(tree: &ViewTree, ids: &[ViewId]) -> Vec<f32> {
    ids.iter().filter_map(|&id| tree.frame(id)).map(|f| f.x).collect()
}

fn widths(tree: &ViewTree, ids: &[ViewId]) -> Vec<f32> {
    ids.iter()
        .filter_map(|&id| tree.frame(id))
        .map(|f| f.width)
        .collect()
}

// =============================================================================
// Distribution Scenarios
// =============================================================================

#[test]
fn test_fill_pins_last_child_to_far_edge() {
    let (mut tree, ids) = host(&[40.0, 60.0, 50.0], 20.0);
    let mut stack = stack_of(&tree, &ids, &[10.0, 10.0, 0.0], StackConfig::new());

    stack.layout(&mut tree, Rect::new(0.0, 0.0, 200.0, 20.0));

    assert_eq!(xs(&tree, &ids), vec![0.0, 50.0, 120.0]);
    assert_eq!(widths(&tree, &ids), vec![40.0, 60.0, 80.0]);
}

#[test]
fn test_fill_equally_shares_main_axis() {
    let (mut tree, ids) = host(&[40.0, 60.0, 50.0], 20.0);
    let config = StackConfig::new().distribution(Distribution::FillEqually);
    let mut stack = stack_of(&tree, &ids, &[10.0, 10.0, 0.0], config);

    stack.layout(&mut tree, Rect::new(0.0, 0.0, 200.0, 20.0));

    assert_eq!(xs(&tree, &ids), vec![0.0, 70.0, 140.0]);
    assert_eq!(widths(&tree, &ids), vec![60.0, 60.0, 60.0]);
}

#[test]
fn test_equal_spacing_overrides_nominal_spacing() {
    let (mut tree, ids) = host(&[40.0, 60.0, 50.0], 20.0);
    let config = StackConfig::new().distribution(Distribution::EqualSpacing);
    let mut stack = stack_of(&tree, &ids, &[10.0, 10.0, 0.0], config);

    let layout = stack
        .layout(&mut tree, Rect::new(0.0, 0.0, 300.0, 20.0))
        .cloned()
        .expect("visible children");

    assert_eq!(layout.gaps.len(), 2);
    assert!(layout.gaps.iter().all(|g| g.length(Axis::Horizontal) == 75.0));
    assert_eq!(layout.gaps[0].role, GapRole::Leader);
    assert_eq!(layout.gaps[1].role, GapRole::Follower);
    assert_eq!(xs(&tree, &ids), vec![0.0, 115.0, 250.0]);
}

#[test]
fn test_equal_spacing_leader_floor() {
    // Ideal gap is negative; the first child's spacing wins.
    let (mut tree, ids) = host(&[80.0, 80.0, 80.0], 10.0);
    let config = StackConfig::new().distribution(Distribution::EqualSpacing);
    let mut stack = stack_of(&tree, &ids, &[12.0, 1.0, 0.0], config);

    let layout = stack
        .layout(&mut tree, Rect::new(0.0, 0.0, 200.0, 10.0))
        .cloned()
        .expect("visible children");

    assert!(layout.gaps.iter().all(|g| g.length(Axis::Horizontal) == 12.0));
    assert_eq!(xs(&tree, &ids), vec![0.0, 92.0, 184.0]);
    assert_eq!(widths(&tree, &ids)[2], 16.0);
}

#[test]
fn test_vertical_stack_with_center_alignment() {
    let mut tree = ViewTree::new();
    let a = tree.insert(Size::new(20.0, 30.0));
    let b = tree.insert(Size::new(40.0, 30.0));
    let config = StackConfig::new()
        .axis(Axis::Vertical)
        .alignment(Alignment::Center);
    let mut stack = stack_of(&tree, &[a, b], &[5.0, 0.0], config);

    stack.layout(&mut tree, Rect::new(10.0, 10.0, 100.0, 100.0));

    assert_eq!(tree.frame(a), Some(Rect::new(50.0, 10.0, 20.0, 30.0)));
    assert_eq!(tree.frame(b), Some(Rect::new(40.0, 45.0, 40.0, 65.0)));
    assert_eq!(stack.intrinsic_cross_size(), Some(40.0));
}

// =============================================================================
// Visibility Integration
// =============================================================================

#[test]
fn test_hidden_children_are_skipped_and_return() {
    let (mut tree, ids) = host(&[30.0, 30.0, 30.0, 30.0], 10.0);
    let config = StackConfig::new().distribution(Distribution::FillEqually);
    let mut stack = stack_of(&tree, &ids, &[0.0; 4], config);
    let bounds = Rect::new(0.0, 0.0, 120.0, 10.0);
    stack.layout(&mut tree, bounds);

    tree.set_hidden(ids[0], true);
    tree.set_hidden(ids[2], true);
    assert!(stack.needs_layout());
    stack.layout_if_needed(&mut tree, bounds);

    assert_eq!(tree.frame(ids[0]), None);
    assert_eq!(tree.frame(ids[2]), None);
    assert_eq!(tree.frame(ids[1]), Some(Rect::new(0.0, 0.0, 60.0, 10.0)));
    assert_eq!(tree.frame(ids[3]), Some(Rect::new(60.0, 0.0, 60.0, 10.0)));
    assert_eq!(stack.arranged_views(), ids);

    tree.set_hidden(ids[0], false);
    tree.set_hidden(ids[2], false);
    stack.layout_if_needed(&mut tree, bounds);
    assert_eq!(widths(&tree, &ids), vec![30.0; 4]);
}

#[test]
fn test_one_tree_many_stacks() {
    let (mut tree, ids) = host(&[10.0, 10.0], 10.0);
    let mut left = stack_of(&tree, &ids[..1], &[0.0], StackConfig::new());
    let mut right = stack_of(&tree, &ids[1..], &[0.0], StackConfig::new());
    left.layout(&mut tree, Rect::new(0.0, 0.0, 50.0, 10.0));
    right.layout(&mut tree, Rect::new(50.0, 0.0, 50.0, 10.0));

    tree.set_hidden(ids[1], true);
    assert!(!left.needs_layout());
    assert!(right.needs_layout());
}

#[test]
fn test_view_moved_between_stacks_keeps_new_frame() {
    let (mut tree, ids) = host(&[20.0, 30.0], 10.0);
    let mut first = stack_of(&tree, &ids, &[0.0, 0.0], StackConfig::new());
    first.layout(&mut tree, Rect::new(0.0, 0.0, 50.0, 10.0));

    first.remove_child(ids[1]);
    let mut second = StackView::new(tree.visibility_hub());
    second.add_child(ids[1], 0.0);
    let target = Rect::new(100.0, 0.0, 30.0, 10.0);
    second.layout(&mut tree, target);
    assert_eq!(tree.frame(ids[1]), Some(target));

    first.layout_if_needed(&mut tree, Rect::new(0.0, 0.0, 50.0, 10.0));
    assert_eq!(tree.frame(ids[1]), Some(target));
    assert_eq!(tree.frame(ids[0]), Some(Rect::new(0.0, 0.0, 50.0, 10.0)));
}

#[test]
fn test_removing_view_from_tree_schedules_layout() {
    let (mut tree, ids) = host(&[10.0, 10.0], 10.0);
    let mut stack = stack_of(&tree, &ids, &[0.0, 0.0], StackConfig::new());
    let bounds = Rect::new(0.0, 0.0, 50.0, 10.0);
    stack.layout(&mut tree, bounds);

    tree.remove(ids[0]);
    assert!(stack.needs_layout());
    stack.layout_if_needed(&mut tree, bounds);
    assert_eq!(tree.frame(ids[1]), Some(bounds));
}

#[test]
fn test_teardown_releases_every_subscription() {
    let (tree, ids) = host(&[10.0, 10.0, 10.0], 10.0);
    let stack = stack_of(&tree, &ids, &[0.0; 3], StackConfig::new());
    assert_eq!(tree.visibility_hub().len(), 3);
    drop(stack);
    assert!(tree.visibility_hub().is_empty());
}

#[test]
fn test_changing_distribution_relayouts() {
    let (mut tree, ids) = host(&[40.0, 60.0, 50.0], 20.0);
    let mut stack = stack_of(&tree, &ids, &[10.0, 10.0, 0.0], StackConfig::new());
    let bounds = Rect::new(0.0, 0.0, 200.0, 20.0);
    stack.layout(&mut tree, bounds);

    stack.set_distribution(Distribution::FillEqually);
    assert!(stack.layout_if_needed(&mut tree, bounds).is_some());
    assert_eq!(widths(&tree, &ids), vec![60.0; 3]);
}

// =============================================================================
// Property Tests
// =============================================================================

fn items_strategy() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((0.0f32..200.0, 0.0f32..20.0), 2..8)
}

fn build_items(tree: &mut ViewTree, raw: &[(f32, f32)]) -> Vec<StackItem> {
    raw.iter()
        .map(|&(w, s)| {
            let size = Size::new(w, 10.0);
            StackItem::new(tree.insert(size), size, s)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_fill_last_child_reaches_far_edge(raw in items_strategy(), width in 0.0f32..2000.0) {
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let layout = compute_stack_layout(StackConfig::new(), Rect::new(0.0, 0.0, width, 10.0), &items);
        let last = layout.frames.last().map(|f| f.frame).expect("frames");
        prop_assert!(last.width >= 0.0);
        if last.x <= width {
            prop_assert!((last.max_x() - width).abs() < 1e-2);
        }
    }

    #[test]
    fn prop_fill_equally_sizes_are_equal(raw in items_strategy(), width in 0.0f32..2000.0) {
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::FillEqually);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, width, 10.0), &items);
        let first = layout.frames[0].frame.width;
        prop_assert!(layout.frames.iter().all(|f| f.frame.width == first));

        let inner: f32 = raw[..raw.len() - 1].iter().map(|&(_, s)| s).sum();
        let share = (width - inner) / raw.len() as f32;
        if share > 0.0 {
            prop_assert!((first - share).abs() < 1e-2);
        }
    }

    #[test]
    fn prop_fill_proportionally_last_child_reaches_far_edge(
        raw in items_strategy(),
        width in 0.0f32..2000.0,
    ) {
        let content: f32 = raw.iter().map(|&(w, _)| w).sum::<f32>()
            + raw[..raw.len() - 1].iter().map(|&(_, s)| s).sum::<f32>();
        prop_assume!(content > 0.0 && content <= width);
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::FillProportionally);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, width, 10.0), &items);
        let last = layout.frames.last().map(|f| f.frame).expect("frames");
        prop_assert!(last.width >= 0.0);
        prop_assert!((last.max_x() - width).abs() < 1e-2);
    }

    #[test]
    fn prop_equal_spacing_last_child_reaches_far_edge(
        raw in items_strategy(),
        width in 0.0f32..2000.0,
    ) {
        let measured: f32 = raw.iter().map(|&(w, _)| w).sum();
        let slots = (raw.len() - 1) as f32;
        prop_assume!((width - measured) / slots >= raw[0].1);
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::EqualSpacing);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, width, 10.0), &items);
        let last = layout.frames.last().map(|f| f.frame).expect("frames");
        prop_assert!((last.max_x() - width).abs() < 1e-2);
        prop_assert!((last.width - raw[raw.len() - 1].0).abs() < 1e-2);
    }

    #[test]
    fn prop_equal_centering_last_child_reaches_far_edge(
        raw in items_strategy(),
        width in 0.0f32..2000.0,
    ) {
        let ends = (raw[0].0 + raw[raw.len() - 1].0) / 2.0;
        let slots = (raw.len() - 1) as f32;
        prop_assume!((width - ends) / slots >= raw[0].1);
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::EqualCentering);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, width, 10.0), &items);
        let last = layout.frames.last().map(|f| f.frame).expect("frames");
        prop_assert!((last.max_x() - width).abs() < 1e-2);
    }

    #[test]
    fn prop_equal_spacing_gaps_are_uniform(raw in items_strategy(), width in 0.0f32..2000.0) {
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::EqualSpacing);
        let layout = compute_stack_layout(config, Rect::new(0.0, 0.0, width, 10.0), &items);
        prop_assert_eq!(layout.gaps.len(), items.len() - 1);
        let leader = layout.gaps[0].length(Axis::Horizontal);
        prop_assert!(leader >= items[0].spacing);
        prop_assert!(layout.gaps.iter().all(|g| g.length(Axis::Horizontal) == leader));
    }

    #[test]
    fn prop_layout_is_deterministic(raw in items_strategy(), width in 0.0f32..2000.0) {
        let mut tree = ViewTree::new();
        let items = build_items(&mut tree, &raw);
        let config = StackConfig::new().distribution(Distribution::EqualCentering);
        let bounds = Rect::new(0.0, 0.0, width, 10.0);
        prop_assert_eq!(
            compute_stack_layout(config, bounds, &items),
            compute_stack_layout(config, bounds, &items)
        );
    }
}
