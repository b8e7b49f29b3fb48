//! Tint/shade ramps on the 50…950 design-token scale.
//!
//! Every level has a fixed OKLCH lightness anchor. The base color only
//! contributes its hue and chroma; chroma is compressed at both extremes
//! (×0.3 for 50/100, ×0.6 for 900/950) so the lightest tints don't clip
//! and the darkest shades don't turn muddy.

use std::fmt;

use prism_color::{ColorError, Oklch, Rgb8};
use serde::{Deserialize, Serialize};

/// One step of the 11-level shade scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ShadeLevel {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ShadeLevel {
    /// Numeric token value (50, 100, … 950).
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
            Self::S600 => 600,
            Self::S700 => 700,
            Self::S800 => 800,
            Self::S900 => 900,
            Self::S950 => 950,
        }
    }

    /// Target OKLCH lightness for this level.
    #[must_use]
    pub const fn anchor_lightness(self) -> f64 {
        match self {
            Self::S50 => 0.97,
            Self::S100 => 0.93,
            Self::S200 => 0.87,
            Self::S300 => 0.78,
            Self::S400 => 0.68,
            Self::S500 => 0.58,
            Self::S600 => 0.50,
            Self::S700 => 0.42,
            Self::S800 => 0.34,
            Self::S900 => 0.27,
            Self::S950 => 0.20,
        }
    }

    /// Multiplier applied to the base chroma at this level.
    #[must_use]
    pub const fn chroma_scale(self) -> f64 {
        match self {
            Self::S50 | Self::S100 => 0.3,
            Self::S900 | Self::S950 => 0.6,
            _ => 1.0,
        }
    }

    /// Look a level up by its token value.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownShadeLevel`] for values off the scale.
    pub fn from_value(value: u16) -> Result<Self, ColorError> {
        Self::all()
            .iter()
            .find(|level| level.value() == value)
            .copied()
            .ok_or(ColorError::UnknownShadeLevel(value))
    }

    /// All levels, light to dark.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::S50, Self::S100, Self::S200, Self::S300, Self::S400, Self::S500,
            Self::S600, Self::S700, Self::S800, Self::S900, Self::S950,
        ]
    }
}

impl fmt::Display for ShadeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<ShadeLevel> for u16 {
    fn from(level: ShadeLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u16> for ShadeLevel {
    type Error = ColorError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// One generated entry of a shade ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shade {
    pub level: ShadeLevel,
    /// The level's anchor lightness, before any chroma scaling.
    pub lightness: f64,
    pub color: Rgb8,
}

/// Generate the color for a single `level` of `base`'s ramp.
#[must_use]
pub fn shade(base: Rgb8, level: ShadeLevel) -> Shade {
    let lch = base.to_oklch();
    let lightness = level.anchor_lightness();
    let color = Oklch::new(lightness, lch.c * level.chroma_scale(), lch.h).to_rgb8();
    Shade { level, lightness, color }
}

/// Generate the full 11-step ramp for `base`, ordered 50 → 950.
#[must_use]
pub fn generate_shades(base: Rgb8) -> Vec<Shade> {
    ShadeLevel::all().iter().map(|&level| shade(base, level)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
