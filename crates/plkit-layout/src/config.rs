//! Stack configuration types.

use plkit_core::Axis;
use serde::{Deserialize, Serialize};

/// How children share the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Measured sizes, the last child stretches to the far edge
    #[default]
    Fill,
    /// Every child gets the same main size
    FillEqually,
    /// Main sizes proportional to measured sizes
    FillProportionally,
    /// Measured sizes with uniform gaps between edges
    EqualSpacing,
    /// Measured sizes with uniformly spaced centers
    EqualCentering,
}

impl Distribution {
    /// Whether this mode synthesizes gap spacers.
    #[must_use]
    pub const fn uses_gaps(self) -> bool {
        matches!(self, Self::EqualSpacing | Self::EqualCentering)
    }
}

/// Cross axis placement of every child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Stretch to the container's cross size
    #[default]
    Fill,
    /// Top for horizontal stacks, left for vertical ones
    #[serde(alias = "top")]
    Leading,
    /// Center on the cross axis
    Center,
    /// Bottom for horizontal stacks, right for vertical ones
    #[serde(alias = "bottom")]
    Trailing,
}

/// Axis, distribution and alignment of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StackConfig {
    /// Main axis
    #[serde(default)]
    pub axis: Axis,
    /// Main axis distribution
    #[serde(default)]
    pub distribution: Distribution,
    /// Cross axis alignment
    #[serde(default)]
    pub alignment: Alignment,
}

impl StackConfig {
    /// Default config: horizontal, fill, fill.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis.
    #[must_use]
    pub const fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the distribution.
    #[must_use]
    pub const fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the alignment.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StackConfig::default();
        assert_eq!(config.axis, Axis::Horizontal);
        assert_eq!(config.distribution, Distribution::Fill);
        assert_eq!(config.alignment, Alignment::Fill);
    }

    #[test]
    fn test_builder() {
        let config = StackConfig::new()
            .axis(Axis::Vertical)
            .distribution(Distribution::EqualCentering)
            .alignment(Alignment::Trailing);
        assert_eq!(config.axis, Axis::Vertical);
        assert_eq!(config.distribution, Distribution::EqualCentering);
        assert_eq!(config.alignment, Alignment::Trailing);
    }

    #[test]
    fn test_uses_gaps() {
        assert!(Distribution::EqualSpacing.uses_gaps());
        assert!(Distribution::EqualCentering.uses_gaps());
        assert!(!Distribution::Fill.uses_gaps());
        assert!(!Distribution::FillEqually.uses_gaps());
        assert!(!Distribution::FillProportionally.uses_gaps());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Distribution::FillProportionally).unwrap();
        assert_eq!(json, "\"fill_proportionally\"");
        let align: Alignment = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(align, Alignment::Trailing);
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: StackConfig =
            serde_json::from_str(r#"{"distribution":"equal_spacing"}"#).unwrap();
        assert_eq!(config.distribution, Distribution::EqualSpacing);
        assert_eq!(config.axis, Axis::Horizontal);
    }
}
