//! YAML manifests for PLKit stacks.
//!
//! A manifest names a stack's config, its bounds and its children; loading
//! it validates sizes and names, and [`Manifest::build`] turns it into a
//! [`ViewTree`](plkit_core::ViewTree) plus a [`StackView`](plkit_layout::StackView).

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{
    BoundsSpec, BuiltStack, ChildReport, ChildSpec, GapReport, LayoutReport, Manifest, StackSpec,
};
