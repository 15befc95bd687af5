//! Host image handles.

use plkit_core::Size;

/// Anything the widgets can lay out as an image.
///
/// Widgets only need pixel dimensions; decoding and drawing stay with the
/// host. Implement it for the host's (cheaply clonable) image handle.
pub trait Image: Clone {
    /// Natural size in points.
    fn size(&self) -> Size;
}

/// A bare size stands in for an image in headless layout.
impl Image for Size {
    fn size(&self) -> Size {
        *self
    }
}
