//! Core types for the PLKit view toolkit.
//!
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`EdgeInsets`]
//! - Axis-agnostic accessors: [`Axis`]
//! - The host view arena: [`ViewTree`], [`ViewId`]
//! - Visibility subscriptions and coalesced re-layout: [`VisibilityHub`],
//!   [`Subscription`], [`LayoutRequest`]
//!
//! Everything here is single-threaded; handles are `!Send`.

mod axis;
mod geometry;
mod observer;
mod view;

pub use axis::Axis;
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use observer::{LayoutPass, LayoutRequest, Subscription, SubscriptionId, VisibilityHub};
pub use view::{ViewId, ViewNode, ViewTree};
