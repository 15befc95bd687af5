//! Visibility subscriptions and coalesced layout requests.
//!
//! A [`VisibilityHub`] is shared by a [`ViewTree`](crate::ViewTree) and every
//! container laid out against it. Containers subscribe once per child and hold
//! the returned [`Subscription`]; dropping the handle unsubscribes. A
//! visibility flip schedules the subscriber's [`LayoutRequest`], and any number
//! of flips before the next pass collapse into a single pass.

use crate::view::ViewId;
use slotmap::{new_key_type, SlotMap};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::trace;

new_key_type! {
    /// Key of a live visibility subscription.
    pub struct SubscriptionId;
}

#[derive(Debug, Default)]
struct RequestState {
    pending: Cell<bool>,
    in_pass: Cell<bool>,
    coalesced: Cell<u64>,
    passes: Cell<u64>,
}

/// Idempotent re-layout flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct LayoutRequest {
    state: Rc<RequestState>,
}

impl LayoutRequest {
    /// Create a clean request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark layout as needed. Scheduling an already pending request is a no-op.
    pub fn schedule(&self) {
        if self.state.pending.replace(true) {
            self.state.coalesced.set(self.state.coalesced.get() + 1);
            trace!("layout request coalesced");
        }
    }

    /// Whether a pass has been requested since the last one began.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    /// Whether a pass is currently running.
    #[must_use]
    pub fn in_pass(&self) -> bool {
        self.state.in_pass.get()
    }

    /// Start a pass, clearing the pending flag.
    ///
    /// Returns `None` while another pass is still running; the guard ends the
    /// pass when dropped.
    #[must_use]
    pub fn begin_pass(&self) -> Option<LayoutPass> {
        if self.state.in_pass.replace(true) {
            return None;
        }
        self.state.pending.set(false);
        self.state.passes.set(self.state.passes.get() + 1);
        Some(LayoutPass {
            state: Rc::clone(&self.state),
        })
    }

    /// Number of schedule calls absorbed by an already pending request.
    #[must_use]
    pub fn coalesced(&self) -> u64 {
        self.state.coalesced.get()
    }

    /// Number of passes started.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.state.passes.get()
    }
}

/// Guard for a running layout pass.
#[derive(Debug)]
pub struct LayoutPass {
    state: Rc<RequestState>,
}

impl Drop for LayoutPass {
    fn drop(&mut self) {
        self.state.in_pass.set(false);
    }
}

#[derive(Debug)]
struct Entry {
    view: ViewId,
    request: LayoutRequest,
}

#[derive(Debug, Default)]
struct HubState {
    entries: SlotMap<SubscriptionId, Entry>,
}

/// Registry of visibility subscriptions.
#[derive(Debug, Clone, Default)]
pub struct VisibilityHub {
    state: Rc<RefCell<HubState>>,
}

impl VisibilityHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `request` whenever `view` changes visibility.
    #[must_use]
    pub fn subscribe(&self, view: ViewId, request: &LayoutRequest) -> Subscription {
        let id = self.state.borrow_mut().entries.insert(Entry {
            view,
            request: request.clone(),
        });
        trace!(?view, ?id, "visibility subscribed");
        Subscription {
            hub: Rc::downgrade(&self.state),
            id: Some(id),
            view,
        }
    }

    /// Schedule every request subscribed to `view`. Returns how many were hit.
    pub fn notify(&self, view: ViewId) -> usize {
        let state = self.state.borrow();
        let mut hit = 0;
        for entry in state.entries.values().filter(|e| e.view == view) {
            entry.request.schedule();
            hit += 1;
        }
        hit
    }

    /// Total live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// True when nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Live subscriptions watching `view`.
    #[must_use]
    pub fn subscribers_of(&self, view: ViewId) -> usize {
        self.state
            .borrow()
            .entries
            .values()
            .filter(|e| e.view == view)
            .count()
    }
}

/// Handle for one visibility subscription. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<RefCell<HubState>>,
    id: Option<SubscriptionId>,
    view: ViewId,
}

impl Subscription {
    /// The watched view.
    #[must_use]
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// False after [`cancel`](Self::cancel) or once the hub is gone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.hub.strong_count() > 0
    }

    /// Unsubscribe now. Calling it again does nothing.
    pub fn cancel(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().entries.remove(id);
            trace!(view = ?self.view, ?id, "visibility unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
