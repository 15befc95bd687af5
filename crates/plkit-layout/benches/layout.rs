//! Benchmarks for stack layout.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plkit_core::{Rect, Size, ViewTree};
use plkit_layout::{compute_stack_layout, Distribution, StackConfig, StackItem, StackView};

fn items(tree: &mut ViewTree, n: usize) -> Vec<StackItem> {
    (0..n)
        .map(|i| {
            let size = Size::new(20.0 + (i % 7) as f32, 30.0);
            StackItem::new(tree.insert(size), size, 4.0)
        })
        .collect()
}

fn bench_compute_each_distribution(c: &mut Criterion) {
    let mut tree = ViewTree::new();
    let items = items(&mut tree, 100);
    let bounds = Rect::new(0.0, 0.0, 4000.0, 40.0);

    for (name, distribution) in [
        ("stack_fill_100", Distribution::Fill),
        ("stack_fill_equally_100", Distribution::FillEqually),
        ("stack_fill_proportionally_100", Distribution::FillProportionally),
        ("stack_equal_spacing_100", Distribution::EqualSpacing),
        ("stack_equal_centering_100", Distribution::EqualCentering),
    ] {
        let config = StackConfig::new().distribution(distribution);
        c.bench_function(name, |b| {
            b.iter(|| compute_stack_layout(black_box(config), black_box(bounds), black_box(&items)))
        });
    }
}

fn bench_stack_view_cached(c: &mut Criterion) {
    let mut tree = ViewTree::new();
    let ids: Vec<_> = (0..50).map(|_| tree.insert(Size::new(20.0, 20.0))).collect();
    let mut stack = StackView::new(tree.visibility_hub());
    for &id in &ids {
        stack.add_child(id, 2.0);
    }
    let bounds = Rect::new(0.0, 0.0, 2000.0, 20.0);

    c.bench_function("stack_view_relayout_cached_50", |b| {
        b.iter(|| {
            stack.layout(&mut tree, black_box(bounds));
        })
    });
}

fn bench_visibility_toggle(c: &mut Criterion) {
    let mut tree = ViewTree::new();
    let ids: Vec<_> = (0..50).map(|_| tree.insert(Size::new(20.0, 20.0))).collect();
    let mut stack = StackView::new(tree.visibility_hub());
    for &id in &ids {
        stack.add_child(id, 2.0);
    }
    let bounds = Rect::new(0.0, 0.0, 2000.0, 20.0);
    let mut hidden = false;

    c.bench_function("stack_view_toggle_and_relayout_50", |b| {
        b.iter(|| {
            hidden = !hidden;
            tree.set_hidden(ids[25], hidden);
            stack.layout_if_needed(&mut tree, black_box(bounds));
        })
    });
}

criterion_group!(
    benches,
    bench_compute_each_distribution,
    bench_stack_view_cached,
    bench_visibility_toggle,
);
criterion_main!(benches);
