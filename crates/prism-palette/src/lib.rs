//! # prism-palette: palettes, vision simulation and contrast
//!
//! Builds on `prism-color` to derive families of related colors and to
//! check them for accessibility.
//!
//! ```text
//! Rgb8 base (+ RandomSource)
//!     │
//!     ├─▶ harmony.rs:  hue rotations in OKLCH (12 schemes)
//!     ├─▶ shade.rs:    50…950 lightness ramp
//!     ├─▶ strategy.rs: named palette generators over the two above
//!     │
//!     ├─▶ vision.rs:   deficiency matrices, per color or per raster
//!     └─▶ contrast.rs: WCAG ratio, classification, lightness correction
//! ```
//!
//! Everything here is a pure function of its arguments. Randomised
//! strategies take their randomness as a [`RandomSource`] parameter.

// Mathematical code uses small integer-to-float casts (loop indices, angles).
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod harmony;
pub mod random;
pub mod shade;
pub mod strategy;
pub mod vision;

pub use contrast::{
    Compliance, ContrastResult, analyze, classify, contrast_ratio, fix_contrast,
    relative_luminance, suggest_text_color,
};
pub use harmony::{HarmonyScheme, generate_harmony};
pub use prism_color::ColorError;
pub use random::{RandomSource, Sequence, Xorshift32};
pub use shade::{Shade, ShadeLevel, generate_shades, shade};
pub use strategy::{Category, Strategy};
pub use vision::{Deficiency, simulate, simulate_image, simulate_pixels};

/// Canonical lookup form of a user-supplied name: trimmed, lowercase,
/// with `_` and spaces folded to `-`.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
