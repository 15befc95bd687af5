#![allow(clippy::missing_const_for_fn)]
//! Widget models for PLKit.
//!
//! Headless state and geometry for the toolkit's controls. Drawing, text
//! measurement, networking and image decoding stay with the host; these
//! types decide what goes where.
//!
//! - [`IconButton`]: title plus four state-dependent icons
//! - [`PhotoBrowser`], [`PhotoSlot`]: paging and load state
//! - [`PhotoPage`], [`DismissGesture`]: zoom and swipe-to-dismiss

mod button;
mod image;
mod page;
mod photo;

pub use button::{
    ButtonLayout, ContentLayout, ControlState, IconButton, IconEdge, IconSlot, IconUpdate,
};
pub use image::Image;
pub use page::{
    present_target, DismissGesture, DismissOutcome, DismissUpdate, DoubleTap, PhotoPage,
    ZoomLimits, DISMISS_DISTANCE, DISMISS_MIN_SCALE, DISMISS_SLOP, DISMISS_THRESHOLD,
};
pub use photo::{
    ImageDecoder, ImageLoader, LoadCompletion, PageChangeCallback, Photo, PhotoBrowser,
    PhotoSlot, PhotoSource,
};
