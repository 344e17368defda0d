//! Chart Color Palette
//!
//! Maps a series (or slice) index to a stable display color. Lookup wraps
//! around the palette, so every non-negative index has a color.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartError, ChartResult};

/// Default chart colors - customize per client
pub const DEFAULT_COLORS: [&str; 5] = [
    "#2563EB", // Blue (primary)
    "#16A34A", // Green
    "#F59E0B", // Amber
    "#9333EA", // Purple
    "#E11D48", // Rose
];

/// Semantic colors for values with a direction
pub struct SemanticColors;

impl SemanticColors {
    pub const POSITIVE: &'static str = "#16A34A";
    pub const NEGATIVE: &'static str = "#EF4444";
    pub const NEUTRAL: &'static str = "#6B7280";
}

/// Ordered, fixed-size set of color tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ChartColorPalette {
    colors: Vec<String>,
}

impl ChartColorPalette {
    /// Create a palette from color tokens. An empty list is rejected so that
    /// lookup stays total.
    pub fn new<I, S>(colors: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Color for an index, wrapping around the palette
    pub fn color_at(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for ChartColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for ChartColorPalette {
    type Error = ChartError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<ChartColorPalette> for Vec<String> {
    fn from(palette: ChartColorPalette) -> Self {
        palette.colors
    }
}

/// Color by index on the default palette
#[inline]
pub fn color_at(index: usize) -> &'static str {
    DEFAULT_COLORS[index % DEFAULT_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_around() {
        for i in 0..20 {
            assert_eq!(color_at(i), color_at(i + DEFAULT_COLORS.len()));
        }
        assert_eq!(color_at(5), DEFAULT_COLORS[0]);
        assert_eq!(color_at(7), DEFAULT_COLORS[2]);
    }

    #[test]
    fn test_default_palette_matches_free_function() {
        let palette = ChartColorPalette::default();
        for i in 0..12 {
            assert_eq!(palette.color_at(i), color_at(i));
        }
    }

    #[test]
    fn test_custom_palette() {
        let palette = ChartColorPalette::new(["#000", "#fff"]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color_at(0), "#000");
        assert_eq!(palette.color_at(3), "#fff");
        assert_eq!(palette.color_at(usize::MAX - 1), "#000");
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = ChartColorPalette::new(Vec::<String>::new());
        assert!(matches!(result, Err(ChartError::EmptyPalette)));

        let parsed: Result<ChartColorPalette, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_distinct_default_colors() {
        for (i, a) in DEFAULT_COLORS.iter().enumerate() {
            for (j, b) in DEFAULT_COLORS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "duplicate colors at {i} and {j}");
                }
            }
        }
    }
}
