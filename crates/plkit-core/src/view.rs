//! Host view arena.
//!
//! The host owns a [`ViewTree`]: each view carries the size reported by the
//! host's measurement pass, a hidden flag, and the frame most recently
//! assigned by a container.

use crate::geometry::{Rect, Size};
use crate::observer::VisibilityHub;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Identity of a view in a [`ViewTree`].
    pub struct ViewId;
}

/// State of one hosted view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewNode {
    /// Intrinsic size from the host's measurement pass
    pub measured: Size,
    /// Hidden views take no part in layout
    pub hidden: bool,
    /// Frame assigned by the owning container, if any
    pub frame: Option<Rect>,
}

impl ViewNode {
    /// Visible node with the given measured size and no frame.
    #[must_use]
    pub const fn new(measured: Size) -> Self {
        Self {
            measured,
            hidden: false,
            frame: None,
        }
    }
}

/// Arena of views plus the visibility hub watching them.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
    hub: VisibilityHub,
}

impl ViewTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visible view with the given measured size.
    pub fn insert(&mut self, measured: Size) -> ViewId {
        self.nodes.insert(ViewNode::new(measured))
    }

    /// Add a fully specified node.
    pub fn insert_node(&mut self, node: ViewNode) -> ViewId {
        self.nodes.insert(node)
    }

    /// Remove a view. Watchers are notified since it no longer participates.
    pub fn remove(&mut self, id: ViewId) -> Option<ViewNode> {
        let node = self.nodes.remove(id)?;
        self.hub.notify(id);
        Some(node)
    }

    /// True when the id refers to a live view.
    #[must_use]
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    #[must_use]
    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    /// Measured size of a view.
    #[must_use]
    pub fn measured_size(&self, id: ViewId) -> Option<Size> {
        self.nodes.get(id).map(|n| n.measured)
    }

    /// Update the measured size. Returns false for unknown ids.
    pub fn set_measured_size(&mut self, id: ViewId, size: Size) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.measured = size;
                true
            }
            None => false,
        }
    }

    /// Whether a view is hidden. Unknown ids count as hidden.
    #[must_use]
    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.nodes.get(id).map_or(true, |n| n.hidden)
    }

    /// Show or hide a view, notifying watchers when the flag actually flips.
    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.hidden == hidden {
            return;
        }
        node.hidden = hidden;
        let hit = self.hub.notify(id);
        trace!(view = ?id, hidden, watchers = hit, "visibility changed");
    }

    /// Frame last assigned to a view.
    #[must_use]
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(id).and_then(|n| n.frame)
    }

    /// Assign or clear a frame. Unknown ids are ignored.
    pub fn set_frame(&mut self, id: ViewId, frame: Option<Rect>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.frame = frame;
        }
    }

    /// Hub that containers subscribe through.
    #[must_use]
    pub const fn visibility_hub(&self) -> &VisibilityHub {
        &self.hub
    }
}
