//! Error types for stack mutations.

use plkit_core::ViewId;
use thiserror::Error;

/// Caller misuse of a [`StackView`](crate::StackView).
///
/// Returned by the `try_*` mutators. The plain mutators log these at debug
/// level and carry on, since layout callbacks have nowhere to report them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackError {
    /// Index outside the arranged list.
    #[error("index {index} out of range for {len} arranged views")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of arranged views
        len: usize,
    },

    /// View is not arranged in this stack.
    #[error("view {0:?} is not arranged in this stack")]
    NotArranged(ViewId),

    /// Spacing was NaN or infinite.
    #[error("spacing must be finite, got {0}")]
    InvalidSpacing(f32),
}
