//! PLKit: headless stack view layout and UI models.
//!
//! Re-exports the workspace crates:
//!
//! - core types ([`Rect`], [`ViewTree`], [`VisibilityHub`], ...) at the root
//! - [`layout`]: the stack view and its distributions
//! - [`widgets`]: icon button, photo browser, photo page
//! - [`yaml`]: stack manifests
//!
//! ```
//! use plkit::layout::{Distribution, StackConfig, StackView};
//! use plkit::{Rect, Size, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let a = tree.insert(Size::new(40.0, 20.0));
//! let b = tree.insert(Size::new(60.0, 20.0));
//!
//! let config = StackConfig::new().distribution(Distribution::FillEqually);
//! let mut stack = StackView::with_config(tree.visibility_hub(), config);
//! stack.add_child(a, 10.0);
//! stack.add_child(b, 0.0);
//! stack.layout(&mut tree, Rect::new(0.0, 0.0, 110.0, 20.0));
//!
//! assert_eq!(tree.frame(b), Some(Rect::new(60.0, 0.0, 50.0, 20.0)));
//! ```

pub use plkit_core::*;
pub use plkit_layout as layout;
pub use plkit_widgets as widgets;
pub use plkit_yaml as yaml;
