// SPDX-License-Identifier: MIT
//
// Error type shared by the prism engine crates.
//
// Every failure the engine can report is malformed input: a hex string that
// isn't one, a fraction that isn't a number, a name outside a closed
// catalogue. Unreachable contrast targets are not errors; the corrector
// hands back its best candidate and the caller re-checks the ratio.

use thiserror::Error;

/// Errors produced by the colour and palette engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// Not `#RRGGBB` / `RRGGBB` hexadecimal text.
    #[error("invalid hex color {0:?}: expected 6 hex digits with an optional leading '#'")]
    InvalidHex(String),

    /// An interpolation fraction that is NaN or infinite.
    #[error("invalid interpolation fraction {0}: must be a finite number")]
    InvalidFraction(f64),

    /// A contrast target outside the attainable WCAG range.
    #[error("invalid contrast ratio {0}: must be between 1 and 21")]
    InvalidRatio(f64),

    /// A 2-D coordinate with a NaN or infinite component.
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition { x: f64, y: f64 },

    /// Harmony scheme name not in the catalogue.
    #[error("unknown harmony scheme: {0}")]
    UnknownScheme(String),

    /// Vision-deficiency name not in the catalogue.
    #[error("unknown vision deficiency: {0}")]
    UnknownDeficiency(String),

    /// Palette strategy name not in the registry.
    #[error("unknown palette strategy: {0}")]
    UnknownStrategy(String),

    /// Shade level outside the 50…950 scale.
    #[error("unknown shade level: {0}")]
    UnknownShadeLevel(u16),

    /// Weighted blend called without any anchor points.
    #[error("weighted blend needs at least one anchor point")]
    EmptyAnchors,

    /// Gradient built without any stops.
    #[error("gradient needs at least one stop")]
    EmptyGradient,

    /// Gradient stop positioned outside [0, 1] or not a number.
    #[error("invalid gradient stop position {0}: must be within [0, 1]")]
    InvalidStopPosition(f64),

    /// Raster buffer whose layout doesn't match its channel count.
    #[error("invalid pixel buffer: {len} bytes is not a whole number of {channels}-channel pixels")]
    InvalidPixelBuffer { len: usize, channels: usize },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, ColorError>;
