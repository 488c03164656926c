//! Grid configuration
//!
//! Everything is fixed at startup: the flag count, the square the grid fills,
//! and the handful of display choices below. The JSON form uses camelCase keys
//! and every field has a default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::codec::FlagCount;
use crate::error::{BitquadError, Result};

/// Default side length of the grid square, in clip-space units.
pub const DEFAULT_SIZE: f32 = 2.0;

/// Default gap between cells and around the border.
pub const DEFAULT_PADDING: f32 = 0.05;

/// Default clear color (light gray, opaque).
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

/// How the decoded remainder is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Flags in RGB, remainder in alpha (blended over the clear color)
    #[default]
    Alpha,
    /// Flags in RGB scaled by the remainder, opaque
    Grayscale,
}

impl ColorMode {
    pub fn all() -> &'static [ColorMode] {
        &[ColorMode::Alpha, ColorMode::Grayscale]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ColorMode::Alpha => "alpha",
            ColorMode::Grayscale => "grayscale",
        }
    }

    /// Parse from string ID, case-insensitive
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "alpha" => Some(ColorMode::Alpha),
            "grayscale" => Some(ColorMode::Grayscale),
            _ => None,
        }
    }

    /// Whether the pipeline needs alpha blending
    pub fn blends(&self) -> bool {
        matches!(self, ColorMode::Alpha)
    }
}

/// How the packed byte varying reaches the fragment stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Each triangle uses its first vertex's byte
    #[default]
    Flat,
    /// Bytes blend across the triangle
    Smooth,
}

impl Interpolation {
    pub fn all() -> &'static [Interpolation] {
        &[Interpolation::Flat, Interpolation::Smooth]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Interpolation::Flat => "flat",
            Interpolation::Smooth => "smooth",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "flat" => Some(Interpolation::Flat),
            "smooth" => Some(Interpolation::Smooth),
            _ => None,
        }
    }
}

/// Which of a quad's six vertex slots carry the value=1 byte
///
/// Slots follow the quad's vertex order: top-left, bottom-left,
/// bottom-right, bottom-right, top-right, top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerPattern {
    /// Top-left and top-right corners
    #[default]
    TopEdge,
    /// Bottom-left and bottom-right corners
    BottomEdge,
    /// Top-left and bottom-right corners
    Diagonal,
    /// Bottom-left and top-right corners
    AntiDiagonal,
}

impl CornerPattern {
    pub fn all() -> &'static [CornerPattern] {
        &[
            CornerPattern::TopEdge,
            CornerPattern::BottomEdge,
            CornerPattern::Diagonal,
            CornerPattern::AntiDiagonal,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            CornerPattern::TopEdge => "topEdge",
            CornerPattern::BottomEdge => "bottomEdge",
            CornerPattern::Diagonal => "diagonal",
            CornerPattern::AntiDiagonal => "antiDiagonal",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(id))
    }

    /// `true` where the vertex slot takes the value=1 byte.
    pub fn slots(&self) -> [bool; 6] {
        match self {
            CornerPattern::TopEdge => [true, false, false, false, true, true],
            CornerPattern::BottomEdge => [false, true, true, true, false, false],
            CornerPattern::Diagonal => [true, false, true, true, false, true],
            CornerPattern::AntiDiagonal => [false, true, false, false, true, false],
        }
    }
}

/// Startup configuration for one quad grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub flag_count: FlagCount,
    pub size: f32,
    pub padding: f32,
    pub color_mode: ColorMode,
    pub corner_pattern: CornerPattern,
    pub interpolation: Interpolation,
    pub clear_color: [f32; 4],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            flag_count: FlagCount::default(),
            size: DEFAULT_SIZE,
            padding: DEFAULT_PADDING,
            color_mode: ColorMode::default(),
            corner_pattern: CornerPattern::default(),
            interpolation: Interpolation::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

impl GridConfig {
    /// Config with the given flag count and defaults elsewhere.
    pub fn with_flags(flag_count: usize) -> Result<Self> {
        Ok(Self {
            flag_count: FlagCount::new(flag_count)?,
            ..Default::default()
        })
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)
            .map_err(|e| BitquadError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check size and padding. The layout itself checks that cells fit.
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(BitquadError::InvalidSize(self.size));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(BitquadError::InvalidPadding(self.padding));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.flag_count.get(), 3);
        assert!((config.size - 2.0).abs() < 0.001);
        assert!((config.padding - 0.05).abs() < 0.001);
        assert_eq!(config.color_mode, ColorMode::Alpha);
        assert_eq!(config.corner_pattern, CornerPattern::TopEdge);
        assert_eq!(config.interpolation, Interpolation::Flat);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn test_json_camel_case() {
        let config = GridConfig::from_json(
            r#"{"flagCount": 2, "colorMode": "grayscale", "cornerPattern": "antiDiagonal", "interpolation": "smooth"}"#,
        )
        .unwrap();
        assert_eq!(config.flag_count.get(), 2);
        assert_eq!(config.color_mode, ColorMode::Grayscale);
        assert_eq!(config.corner_pattern, CornerPattern::AntiDiagonal);
        assert_eq!(config.interpolation, Interpolation::Smooth);
    }

    #[test]
    fn test_json_rejects_too_many_flags() {
        let err = GridConfig::from_json(r#"{"flagCount": 12}"#).unwrap_err();
        assert!(matches!(err, BitquadError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GridConfig {
            padding: 0.1,
            corner_pattern: CornerPattern::Diagonal,
            ..GridConfig::with_flags(4).unwrap()
        };
        let parsed = GridConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_geometry() {
        let mut config = GridConfig::default();
        config.size = 0.0;
        assert_eq!(config.validate(), Err(BitquadError::InvalidSize(0.0)));

        config.size = 2.0;
        config.padding = -0.1;
        assert_eq!(config.validate(), Err(BitquadError::InvalidPadding(-0.1)));

        config.padding = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_flags_bounds() {
        assert!(GridConfig::with_flags(8).is_ok());
        assert!(GridConfig::with_flags(9).is_err());
    }

    #[test]
    fn test_enum_ids_roundtrip() {
        for mode in ColorMode::all() {
            assert_eq!(ColorMode::from_id(mode.id()), Some(*mode));
        }
        for interp in Interpolation::all() {
            assert_eq!(Interpolation::from_id(interp.id()), Some(*interp));
        }
        for pattern in CornerPattern::all() {
            assert_eq!(CornerPattern::from_id(pattern.id()), Some(*pattern));
        }
        assert_eq!(CornerPattern::from_id("TOPEDGE"), Some(CornerPattern::TopEdge));
        assert_eq!(ColorMode::from_id("invalid"), None);
    }

    #[test]
    fn test_enum_serde_matches_id() {
        for pattern in CornerPattern::all() {
            let json = serde_json::to_string(pattern).unwrap();
            assert_eq!(json, format!("\"{}\"", pattern.id()));
        }
        for mode in ColorMode::all() {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.id()));
        }
    }

    #[test]
    fn test_corner_slots_use_two_corners() {
        // slots 0 and 5 are the same corner, as are 2 and 3
        for pattern in CornerPattern::all() {
            let s = pattern.slots();
            assert_eq!(s[0], s[5]);
            assert_eq!(s[2], s[3]);
            let corners = [s[0], s[1], s[2], s[4]];
            assert_eq!(corners.iter().filter(|&&c| c).count(), 2, "{:?}", pattern);
        }
    }
}
