//! Feature types and the selectors that extract them from observations

use crate::data::Observation;
use serde::Serialize;
use std::fmt;

/// Value of a feature for one observation: a single label or a color pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FeatureKey {
    /// Single categorical value (style, category, pattern, color...)
    Value(String),
    /// Primary and secondary color
    Pair(String, String),
}

impl FeatureKey {
    /// Create a single-valued key
    pub fn value(value: impl Into<String>) -> Self {
        FeatureKey::Value(value.into())
    }

    /// Create a color-pair key
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        FeatureKey::Pair(first.into(), second.into())
    }

    /// Cells written for this key, one per value column
    pub fn fields(&self) -> Vec<&str> {
        match self {
            FeatureKey::Value(v) => vec![v.as_str()],
            FeatureKey::Pair(a, b) => vec![a.as_str(), b.as_str()],
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKey::Value(v) => write!(f, "{}", v),
            FeatureKey::Pair(a, b) => write!(f, "{} / {}", a, b),
        }
    }
}

/// Trimmed value, or `None` when it is absent or blank
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The six feature types forecast independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSelector {
    Style,
    Category,
    SuperCategory,
    Pattern,
    Color,
    ColorPair,
}

impl FeatureSelector {
    /// All feature types, in report section order
    pub const ALL: [FeatureSelector; 6] = [
        FeatureSelector::Style,
        FeatureSelector::Category,
        FeatureSelector::SuperCategory,
        FeatureSelector::Pattern,
        FeatureSelector::Color,
        FeatureSelector::ColorPair,
    ];

    /// Extract this feature from an observation.
    ///
    /// Returns `None` when the value is not applicable: absent, empty or
    /// whitespace only. A color pair needs both colors.
    pub fn extract(&self, observation: &Observation) -> Option<FeatureKey> {
        let single = |value: &Option<String>| present(value).map(FeatureKey::value);

        match self {
            FeatureSelector::Style => single(&observation.style),
            FeatureSelector::Category => single(&observation.category),
            FeatureSelector::SuperCategory => single(&observation.super_category),
            FeatureSelector::Pattern => single(&observation.pattern),
            FeatureSelector::Color => single(&observation.color_1),
            FeatureSelector::ColorPair => {
                match (present(&observation.color_1), present(&observation.color_2)) {
                    (Some(first), Some(second)) => Some(FeatureKey::pair(first, second)),
                    _ => None,
                }
            }
        }
    }

    /// Source columns that must exist for this feature pipeline to run
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            FeatureSelector::Style => &["style"],
            FeatureSelector::Category => &["category"],
            FeatureSelector::SuperCategory => &["super_category"],
            FeatureSelector::Pattern => &["pattern"],
            FeatureSelector::Color => &["color_1"],
            FeatureSelector::ColorPair => &["color_1", "color_2"],
        }
    }

    /// Headers of the value columns in output tables
    pub fn value_columns(&self) -> &'static [&'static str] {
        match self {
            FeatureSelector::Color => &["color_1"],
            other => other.required_columns(),
        }
    }

    /// Stem used for output file names
    pub fn name(&self) -> &'static str {
        match self {
            FeatureSelector::Style => "style",
            FeatureSelector::Category => "category",
            FeatureSelector::SuperCategory => "super_category",
            FeatureSelector::Pattern => "pattern",
            FeatureSelector::Color => "color",
            FeatureSelector::ColorPair => "color_pair",
        }
    }

    /// Whether frequencies carry the mean color area of the group
    pub fn tracks_color_area(&self) -> bool {
        matches!(self, FeatureSelector::Color)
    }
}

impl fmt::Display for FeatureSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            FeatureSelector::Style => "Style",
            FeatureSelector::Category => "Category",
            FeatureSelector::SuperCategory => "Super Category",
            FeatureSelector::Pattern => "Pattern",
            FeatureSelector::Color => "Color",
            FeatureSelector::ColorPair => "Color Pair",
        };
        write!(f, "{}", title)
    }
}
