// SPDX-License-Identifier: MIT
//
// prism-color: the leaf layer of the prism colour engine.
//
// Parses and formats hex colours, converts between 8-bit sRGB, linear
// light, OKLab/OKLCH and HSL, and blends colours in RGB or OKLab space
// (two-point interpolation, multi-stop gradients, inverse-distance-weighted
// colour fields). Every function is pure: no I/O, no shared state, no
// caching. Invalid input comes back as a typed `ColorError`, never as a
// best-guess colour.

// Mathematical code uses small integer-to-float casts (loop indices, steps).
#![allow(clippy::cast_precision_loss)]
// Lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod blend;
pub mod color;
pub mod error;
pub mod gradient;

pub use blend::{Anchor, BlendSpace, lerp_oklab, lerp_rgb, weighted_blend};
pub use color::{
    Hsl, LinearRgb, Oklab, Oklch, Rgb8, format_hex, parse_hex, to_linear, to_oklab, to_oklch,
    to_srgb8,
};
pub use error::{ColorError, Result};
pub use gradient::{Gradient, GradientStop};
