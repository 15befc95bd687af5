#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
//! Stack layout engine for PLKit.
//!
//! A [`StackView`] arranges its visible children along one axis using one of
//! five [`Distribution`] modes and a cross-axis [`Alignment`]. The geometry
//! itself comes from [`compute_stack_layout`], a pure function that can be
//! used without a container.
//!
//! - `Fill`, `FillEqually`, `FillProportionally` place children edge to edge
//! - `EqualSpacing`, `EqualCentering` insert [`GapSpacer`]s that share one
//!   length, floored by the first child's spacing
//!
//! Hiding a child through the [`ViewTree`](plkit_core::ViewTree) schedules a
//! single coalesced pass on every stack that arranges it.

mod cache;
mod config;
mod distribute;
mod engine;
mod error;
mod gap;
mod stack;

pub use cache::{CacheKey, LayoutCache};
pub use config::{Alignment, Distribution, StackConfig};
pub use distribute::Span;
pub use engine::{compute_stack_layout, ArrangedFrame, GapSpacer, StackItem, StackLayout};
pub use error::StackError;
pub use gap::GapRole;
pub use stack::StackView;
