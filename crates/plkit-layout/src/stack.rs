//! The stack container.

use plkit_core::{
    Axis, LayoutRequest, Rect, Subscription, ViewId, ViewTree, VisibilityHub,
};
use tracing::{debug, trace};

use crate::cache::{CacheKey, LayoutCache};
use crate::config::{Alignment, Distribution, StackConfig};
use crate::engine::{compute_stack_layout, StackItem, StackLayout};
use crate::error::StackError;

/// One arranged view. Dropping it releases the visibility subscription.
#[derive(Debug)]
struct Child {
    view: ViewId,
    spacing: f32,
    _subscription: Subscription,
}

/// Container that arranges views along one axis.
///
/// Mutations never lay out synchronously: they schedule the container's
/// [`LayoutRequest`], and the host runs [`layout_if_needed`] from its layout
/// callback. Hidden children stay arranged but take no part in a pass.
///
/// [`layout_if_needed`]: Self::layout_if_needed
#[derive(Debug)]
pub struct StackView {
    config: StackConfig,
    children: Vec<Child>,
    hub: VisibilityHub,
    request: LayoutRequest,
    /// Frames the last pass wrote, per arranged view
    applied: Vec<(ViewId, Rect)>,
    /// Frames written for views that have since left the stack
    retired: Vec<(ViewId, Rect)>,
    last_bounds: Option<Rect>,
    intrinsic_cross: Option<f32>,
    last_layout: Option<StackLayout>,
    cache: LayoutCache,
}

impl StackView {
    /// Create an empty stack watching visibility through `hub`.
    #[must_use]
    pub fn new(hub: &VisibilityHub) -> Self {
        Self::with_config(hub, StackConfig::default())
    }

    /// Create an empty stack with a config.
    #[must_use]
    pub fn with_config(hub: &VisibilityHub, config: StackConfig) -> Self {
        Self {
            config,
            children: Vec::new(),
            hub: hub.clone(),
            request: LayoutRequest::new(),
            applied: Vec::new(),
            retired: Vec::new(),
            last_bounds: None,
            intrinsic_cross: None,
            last_layout: None,
            cache: LayoutCache::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Current config.
    #[must_use]
    pub const fn config(&self) -> StackConfig {
        self.config
    }

    /// Replace the whole config.
    pub fn set_config(&mut self, config: StackConfig) {
        if self.config != config {
            self.config = config;
            self.request.schedule();
        }
    }

    /// Set the main axis.
    pub fn set_axis(&mut self, axis: Axis) {
        self.set_config(self.config.axis(axis));
    }

    /// Set the distribution.
    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.set_config(self.config.distribution(distribution));
    }

    /// Set the cross-axis alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.set_config(self.config.alignment(alignment));
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Arranged views in order, hidden ones included.
    #[must_use]
    pub fn arranged_views(&self) -> Vec<ViewId> {
        self.children.iter().map(|c| c.view).collect()
    }

    /// Trailing spacing of every arranged view, in order.
    #[must_use]
    pub fn spacings(&self) -> Vec<f32> {
        self.children.iter().map(|c| c.spacing).collect()
    }

    /// Number of arranged views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when nothing is arranged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether `view` is arranged here.
    #[must_use]
    pub fn contains(&self, view: ViewId) -> bool {
        self.children.iter().any(|c| c.view == view)
    }

    fn make_child(&self, view: ViewId, spacing: f32) -> Result<Child, StackError> {
        if !spacing.is_finite() {
            return Err(StackError::InvalidSpacing(spacing));
        }
        Ok(Child {
            view,
            spacing,
            _subscription: self.hub.subscribe(view, &self.request),
        })
    }

    /// Append a view followed by `spacing`.
    pub fn try_add_child(&mut self, view: ViewId, spacing: f32) -> Result<(), StackError> {
        let child = self.make_child(view, spacing)?;
        self.children.push(child);
        self.request.schedule();
        Ok(())
    }

    /// Insert a view at `index`, which may equal the current length.
    pub fn try_insert_child(
        &mut self,
        view: ViewId,
        index: usize,
        spacing: f32,
    ) -> Result<(), StackError> {
        if index > self.children.len() {
            return Err(StackError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        let child = self.make_child(view, spacing)?;
        self.children.insert(index, child);
        self.request.schedule();
        Ok(())
    }

    /// Replace the view at `index`. The old entry's subscription is released
    /// before the new one is installed.
    pub fn try_replace_child(
        &mut self,
        view: ViewId,
        index: usize,
        spacing: f32,
    ) -> Result<(), StackError> {
        if index >= self.children.len() {
            return Err(StackError::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        if !spacing.is_finite() {
            return Err(StackError::InvalidSpacing(spacing));
        }
        let old = self.children.remove(index).view;
        let child = self.make_child(view, spacing)?;
        self.children.insert(index, child);
        self.retire(old);
        self.request.schedule();
        Ok(())
    }

    /// Remove the first entry for `view`.
    pub fn try_remove_child(&mut self, view: ViewId) -> Result<(), StackError> {
        let index = self
            .children
            .iter()
            .position(|c| c.view == view)
            .ok_or(StackError::NotArranged(view))?;
        self.children.remove(index);
        self.retire(view);
        self.request.schedule();
        Ok(())
    }

    /// Append a view. Misuse is logged and ignored.
    pub fn add_child(&mut self, view: ViewId, spacing: f32) {
        if let Err(err) = self.try_add_child(view, spacing) {
            debug!(%err, "add_child ignored");
        }
    }

    /// Insert a view. Out-of-range indices are logged and ignored.
    pub fn insert_child(&mut self, view: ViewId, index: usize, spacing: f32) {
        if let Err(err) = self.try_insert_child(view, index, spacing) {
            debug!(%err, "insert_child ignored");
        }
    }

    /// Replace a view. Out-of-range indices are logged and ignored.
    pub fn replace_child(&mut self, view: ViewId, index: usize, spacing: f32) {
        if let Err(err) = self.try_replace_child(view, index, spacing) {
            debug!(%err, "replace_child ignored");
        }
    }

    /// Remove a view. Unknown views are logged and ignored.
    pub fn remove_child(&mut self, view: ViewId) {
        if let Err(err) = self.try_remove_child(view) {
            debug!(%err, "remove_child ignored");
        }
    }

    /// Remove every child, releasing all subscriptions.
    pub fn clear(&mut self) {
        if !self.children.is_empty() {
            self.children.clear();
            self.retired.append(&mut self.applied);
            self.request.schedule();
        }
    }

    /// Move the frames written for `view` to the retired list once it is no
    /// longer arranged here.
    fn retire(&mut self, view: ViewId) {
        if self.contains(view) {
            return;
        }
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.applied)
            .into_iter()
            .partition(|(v, _)| *v == view);
        self.applied = kept;
        self.retired.extend(gone);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// The container's re-layout flag.
    #[must_use]
    pub const fn request(&self) -> &LayoutRequest {
        &self.request
    }

    /// Whether a pass is pending.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.request.is_pending()
    }

    /// Request a pass without changing anything.
    pub fn set_needs_layout(&self) {
        self.request.schedule();
    }

    /// Result of the most recent pass that produced geometry.
    #[must_use]
    pub const fn last_layout(&self) -> Option<&StackLayout> {
        self.last_layout.as_ref()
    }

    /// Intrinsic cross-axis size reported by the last pass.
    #[must_use]
    pub const fn intrinsic_cross_size(&self) -> Option<f32> {
        self.intrinsic_cross
    }

    /// Layout cache, for diagnostics.
    #[must_use]
    pub const fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Run a pass if one is pending or the bounds changed.
    pub fn layout_if_needed(&mut self, tree: &mut ViewTree, bounds: Rect) -> Option<&StackLayout> {
        if !self.request.is_pending() && self.last_bounds == Some(bounds) {
            return None;
        }
        self.layout(tree, bounds)
    }

    /// Lay out visible children inside `bounds` and write their frames to
    /// `tree`.
    ///
    /// Frames written for views that have left the stack are cleared first.
    /// Returns `None` when a pass is already running or no child is visible;
    /// arranged children keep their frames in both cases. Otherwise every
    /// frame the previous pass assigned is cleared before the new ones are
    /// written. A frame is only cleared while it still holds the value this
    /// stack wrote, so a view moved to another container keeps its new frame.
    pub fn layout(&mut self, tree: &mut ViewTree, bounds: Rect) -> Option<&StackLayout> {
        let Some(_pass) = self.request.begin_pass() else {
            debug!("re-entrant layout ignored");
            return None;
        };
        self.last_bounds = Some(bounds);

        for (view, frame) in std::mem::take(&mut self.retired) {
            retract(tree, view, frame);
        }

        let items: Vec<StackItem> = self
            .children
            .iter()
            .filter(|c| !tree.is_hidden(c.view))
            .filter_map(|c| {
                tree.measured_size(c.view)
                    .map(|size| StackItem::new(c.view, size, c.spacing))
            })
            .collect();

        if items.is_empty() {
            trace!(arranged = self.children.len(), "no visible children, layout skipped");
            return None;
        }

        for (view, frame) in std::mem::take(&mut self.applied) {
            retract(tree, view, frame);
        }

        self.cache.advance_pass();
        let key = CacheKey::new(self.config, bounds, &items);
        let mut layout = if let Some(hit) = self.cache.get(key) {
            hit
        } else {
            let computed = compute_stack_layout(self.config, bounds, &items);
            self.cache.insert(key, computed.clone());
            computed
        };

        for arranged in &layout.frames {
            tree.set_frame(arranged.view, Some(arranged.frame));
            self.applied.push((arranged.view, arranged.frame));
        }

        layout.intrinsic_changed = self.intrinsic_cross != Some(layout.intrinsic_cross);
        self.intrinsic_cross = Some(layout.intrinsic_cross);

        trace!(
            visible = items.len(),
            arranged = self.children.len(),
            gaps = layout.gaps.len(),
            "stack layout applied"
        );

        self.last_layout = Some(layout);
        self.last_layout.as_ref()
    }
}

/// Clear `view`'s frame if it still holds `written`.
fn retract(tree: &mut ViewTree, view: ViewId, written: Rect) {
    if tree.frame(view) == Some(written) {
        tree.set_frame(view, None);
    }
}
