//! YAML stack manifests.
//!
//! ```yaml
//! stack:
//!   axis: horizontal
//!   distribution: equal_spacing
//!   alignment: center
//!   bounds: { width: 300, height: 44 }
//!   children:
//!     - { name: back, width: 40, height: 20, spacing: 10 }
//!     - { name: title, width: 60, height: 30, spacing: 10 }
//!     - { name: done, width: 50, height: 20, hidden: true }
//! ```

use plkit_core::{Axis, Rect, Size, ViewId, ViewTree};
use plkit_layout::{Alignment, Distribution, GapRole, StackConfig, StackLayout, StackView};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::ManifestError;

/// Stack manifest loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The stack to build
    pub stack: StackSpec,
}

/// Stack configuration and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackSpec {
    /// Main axis
    #[serde(default)]
    pub axis: Axis,
    /// Main-axis distribution
    #[serde(default)]
    pub distribution: Distribution,
    /// Cross-axis alignment
    #[serde(default)]
    pub alignment: Alignment,
    /// Container size
    #[serde(default)]
    pub bounds: Option<BoundsSpec>,
    /// Arranged children, in order
    #[serde(default)]
    pub children: Vec<ChildSpec>,
}

/// Container size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundsSpec {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// One child view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildSpec {
    /// Unique name
    pub name: String,
    /// Measured width
    pub width: f32,
    /// Measured height
    pub height: f32,
    /// Space after this child
    #[serde(default)]
    pub spacing: f32,
    /// Start hidden
    #[serde(default)]
    pub hidden: bool,
}

fn check_size(field: String, value: f32) -> Result<(), ManifestError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ManifestError::invalid(field, "must be finite and non-negative"))
    }
}

impl Manifest {
    /// Parse and validate a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = yaml.len(), "manifest read");
        Self::from_yaml(&yaml)
    }

    /// Serialize manifest to YAML string.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check sizes, spacings and names.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if let Some(bounds) = self.stack.bounds {
            check_size("stack.bounds.width".into(), bounds.width)?;
            check_size("stack.bounds.height".into(), bounds.height)?;
        }

        let mut names = HashSet::new();
        for (i, child) in self.stack.children.iter().enumerate() {
            if child.name.trim().is_empty() {
                return Err(ManifestError::invalid(
                    format!("children[{i}].name"),
                    "must not be empty",
                ));
            }
            if !names.insert(child.name.as_str()) {
                return Err(ManifestError::DuplicateName(child.name.clone()));
            }
            check_size(format!("children[{i}].width"), child.width)?;
            check_size(format!("children[{i}].height"), child.height)?;
            if !child.spacing.is_finite() {
                return Err(ManifestError::invalid(
                    format!("children[{i}].spacing"),
                    "must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Stack config described by the manifest.
    #[must_use]
    pub fn config(&self) -> StackConfig {
        StackConfig::new()
            .axis(self.stack.axis)
            .distribution(self.stack.distribution)
            .alignment(self.stack.alignment)
    }

    /// Container bounds at the origin, if the manifest gives them.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.stack
            .bounds
            .map(|b| Rect::from_size(Size::new(b.width, b.height)))
    }

    /// Build the view tree and stack the manifest describes.
    pub fn build(&self) -> Result<BuiltStack, ManifestError> {
        self.validate()?;
        let mut tree = ViewTree::new();
        let mut stack = StackView::with_config(tree.visibility_hub(), self.config());
        let mut views = Vec::with_capacity(self.stack.children.len());

        for child in &self.stack.children {
            let id = tree.insert(Size::new(child.width, child.height));
            tree.set_hidden(id, child.hidden);
            stack.try_add_child(id, child.spacing).map_err(|err| {
                ManifestError::invalid(format!("{}.spacing", child.name), err.to_string())
            })?;
            views.push((child.name.clone(), id));
        }

        debug!(children = views.len(), config = ?self.config(), "stack built");
        Ok(BuiltStack { tree, stack, views })
    }
}

/// A stack built from a manifest, ready to lay out.
#[derive(Debug)]
pub struct BuiltStack {
    /// Host view arena
    pub tree: ViewTree,
    /// The container
    pub stack: StackView,
    /// Child names and ids, in manifest order
    pub views: Vec<(String, ViewId)>,
}

impl BuiltStack {
    /// Id of the child called `name`.
    #[must_use]
    pub fn view(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Name of the child with `id`.
    #[must_use]
    pub fn name_of(&self, id: ViewId) -> Option<&str> {
        self.views
            .iter()
            .find(|(_, v)| *v == id)
            .map(|(n, _)| n.as_str())
    }

    /// Lay the stack out in `bounds`.
    pub fn layout(&mut self, bounds: Rect) -> Option<StackLayout> {
        self.stack.layout(&mut self.tree, bounds).cloned()
    }

    /// Lay out and describe the result by child name.
    pub fn report(&mut self, bounds: Rect) -> LayoutReport {
        let layout = self.layout(bounds).unwrap_or_default();
        let children = self
            .views
            .iter()
            .map(|(name, id)| {
                let hidden = self.tree.is_hidden(*id);
                ChildReport {
                    name: name.clone(),
                    hidden,
                    frame: if hidden { None } else { self.tree.frame(*id) },
                }
            })
            .collect();
        let gaps = layout
            .gaps
            .iter()
            .map(|gap| GapReport {
                after: self.name_of(gap.after).unwrap_or_default().to_string(),
                before: self.name_of(gap.before).unwrap_or_default().to_string(),
                frame: gap.frame,
                role: gap.role,
            })
            .collect();
        LayoutReport {
            bounds,
            children,
            gaps,
            intrinsic_cross: layout.intrinsic_cross,
        }
    }
}

/// Named layout result, suitable for printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Container bounds
    pub bounds: Rect,
    /// Every child in manifest order
    pub children: Vec<ChildReport>,
    /// Gap spacers
    pub gaps: Vec<GapReport>,
    /// Largest visible cross-axis size
    pub intrinsic_cross: f32,
}

/// One child in a [`LayoutReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildReport {
    /// Child name
    pub name: String,
    /// Whether it was hidden
    pub hidden: bool,
    /// Assigned frame; always `None` for hidden children
    pub frame: Option<Rect>,
}

/// One gap in a [`LayoutReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    /// Child before the gap
    pub after: String,
    /// Child after the gap
    pub before: String,
    /// Spacer geometry
    pub frame: Rect,
    /// Leader or follower
    pub role: GapRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_YAML: &str = r"
stack:
  axis: horizontal
  distribution: fill
  alignment: center
  bounds: { width: 200, height: 40 }
  children:
    - { name: a, width: 40, height: 20, spacing: 10 }
    - { name: b, width: 60, height: 30, spacing: 10 }
    - { name: c, width: 50, height: 20 }
";

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_yaml(EXAMPLE_YAML).expect("valid manifest");
        assert_eq!(manifest.stack.children.len(), 3);
        assert_eq!(manifest.stack.alignment, Alignment::Center);
        assert_eq!(manifest.bounds(), Some(Rect::new(0.0, 0.0, 200.0, 40.0)));
        assert_eq!(manifest.stack.children[2].spacing, 0.0);
        assert!(!manifest.stack.children[2].hidden);
    }

    #[test]
    fn test_defaults() {
        let manifest = Manifest::from_yaml("stack:\n  children: []\n").expect("valid manifest");
        assert_eq!(manifest.config(), StackConfig::default());
        assert_eq!(manifest.bounds(), None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Manifest::from_yaml("stack:\n  axes: vertical\n").expect_err("unknown field");
        assert!(matches!(err, ManifestError::Yaml(_)));
    }

    #[test]
    fn test_negative_width_rejected() {
        let yaml = "stack:\n  children:\n    - { name: a, width: -1, height: 2 }\n";
        let err = Manifest::from_yaml(yaml).expect_err("negative width");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'children[0].width': must be finite and non-negative"
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = "stack:\n  children:\n    - { name: a, width: 1, height: 1 }\n    - { name: a, width: 1, height: 1 }\n";
        assert!(matches!(
            Manifest::from_yaml(yaml),
            Err(ManifestError::DuplicateName(name)) if name == "a"
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let yaml = "stack:\n  children:\n    - { name: ' ', width: 1, height: 1 }\n";
        assert!(matches!(
            Manifest::from_yaml(yaml),
            Err(ManifestError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_build_and_report() {
        let manifest = Manifest::from_yaml(EXAMPLE_YAML).expect("valid manifest");
        let mut built = manifest.build().expect("built");
        let report = built.report(Rect::new(0.0, 0.0, 200.0, 40.0));

        assert_eq!(report.children[0].frame, Some(Rect::new(0.0, 10.0, 40.0, 20.0)));
        assert_eq!(report.children[1].frame, Some(Rect::new(50.0, 5.0, 60.0, 30.0)));
        assert_eq!(report.children[2].frame, Some(Rect::new(120.0, 10.0, 80.0, 20.0)));
        assert!(report.gaps.is_empty());
        assert_eq!(report.intrinsic_cross, 30.0);
    }

    #[test]
    fn test_hidden_child_reported_without_frame() {
        let yaml = "stack:\n  children:\n    - { name: a, width: 10, height: 10 }\n    - { name: b, width: 10, height: 10, hidden: true }\n";
        let mut built = Manifest::from_yaml(yaml).expect("valid").build().expect("built");
        let report = built.report(Rect::new(0.0, 0.0, 50.0, 10.0));
        assert!(report.children[1].hidden);
        assert_eq!(report.children[1].frame, None);
        assert_eq!(report.children[0].frame, Some(Rect::new(0.0, 0.0, 50.0, 10.0)));
    }

    #[test]
    fn test_all_hidden_report_has_no_frames() {
        let yaml = "stack:\n  children:\n    - { name: a, width: 10, height: 10 }\n";
        let mut built = Manifest::from_yaml(yaml).expect("valid").build().expect("built");
        let bounds = Rect::new(0.0, 0.0, 50.0, 10.0);
        built.report(bounds);

        let id = built.view("a").expect("a");
        built.tree.set_hidden(id, true);
        let report = built.report(bounds);
        assert!(report.children[0].hidden);
        assert_eq!(report.children[0].frame, None);
        assert!(built.tree.frame(id).is_some());
    }

    #[test]
    fn test_yaml_round_trip_preserves_config() {
        let manifest = Manifest::from_yaml(EXAMPLE_YAML).expect("valid manifest");
        let again = Manifest::from_yaml(&manifest.to_yaml().expect("serialize")).expect("reparse");
        assert_eq!(manifest, again);
    }
}
