// SPDX-License-Identifier: MIT
//
// prism color system: 8-bit sRGB at the edges, OKLab/OKLCH in the middle.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Hex strings go in, hex strings come out. Everything in between happens in
// whichever space makes the operation honest: linear light for luminance,
// OKLab for blending, OKLCH for "rotate the hue" and "set the lightness".
//
// Conversion pipeline:
//
//   hex ↔ Rgb8 ↔ LinearRgb ↔ (LMS) ↔ Oklab ↔ Oklch
//                 └────────── Hsl (gamma-encoded, for lightness scans)
//
// All arithmetic is f64. The only lossy step is the final quantisation to
// 8 bits, which rounds to nearest and clamps to [0, 255].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ColorError, Result};

/// A 3×3 matrix, row-major.
pub type Mat3 = [[f64; 3]; 3];

// ─── Rgb8 ────────────────────────────────────────────────────────────────────

/// An opaque 8-bit-per-channel sRGB color.
///
/// This is the public currency of the engine: every operation accepts and
/// returns `Rgb8`, and it round-trips losslessly through `#rrggbb` text.
///
/// # Examples
///
/// ```
/// use prism_color::Rgb8;
///
/// let blue: Rgb8 = "#3B82F6".parse().unwrap();
/// assert_eq!(blue, Rgb8::new(0x3b, 0x82, 0xf6));
/// assert_eq!(blue.to_hex(), "#3b82f6");
///
/// let lch = blue.to_oklch();
/// assert!(lch.h > 250.0 && lch.h < 270.0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantise float channels on the 0–255 scale: round to nearest, clamp.
    #[must_use]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(quantize(r), quantize(g), quantize(b))
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything else.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_hex(s)
    }

    /// Format as `#rrggbb` (always 7 characters, lowercase).
    #[must_use]
    pub fn to_hex(self) -> String {
        format_hex(self)
    }

    /// Format as a CSS `rgb(r, g, b)` function.
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Channels as plain floats on the 0–255 scale (no linearisation).
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Decode to linear light.
    #[must_use]
    pub fn to_linear(self) -> LinearRgb {
        to_linear(self)
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        to_oklab(self)
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        to_oklch(self)
    }

    // `max` is one of the channels, so the equality tests are exact.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let [r, g, b] = self.to_f64().map(|c| c / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let delta = max - min;

        if delta == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = delta / (1.0 - 2.0f64.mul_add(l, -1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Hsl { h: normalize_hue(h), s, l }
    }

    /// Perceptual distance: Euclidean ΔE in OKLab.
    ///
    /// Values below ~0.02 are generally imperceptible.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let p = self.to_oklab();
        let q = other.to_oklab();
        let dl = p.l - q.l;
        let da = p.a - q.a;
        let db = p.b - q.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }
}

impl fmt::Debug for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb8({})", self.to_hex())
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex(s)
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── LinearRgb ───────────────────────────────────────────────────────────────

/// Linear-light RGB (the sRGB gamma curve removed).
///
/// Nominally in [0, 1] per channel but not clamped: values produced by
/// OKLab arithmetic may fall outside until they are quantised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Re-encode with the sRGB transfer curve and quantise.
    #[must_use]
    pub fn to_srgb8(self) -> Rgb8 {
        to_srgb8(self)
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let lms = mat3_mul(&RGB_TO_LMS, [self.r, self.g, self.b]);
        let [l, a, b] = mat3_mul(&LMS_TO_OKLAB, lms.map(f64::cbrt));
        Oklab { l, a, b }
    }
}

// ─── Oklab ───────────────────────────────────────────────────────────────────

/// A color in Björn Ottosson's OKLab space.
///
/// `l` is perceptual lightness (0 = black, 1 = white); `a` runs green→red
/// and `b` blue→yellow. Equal Euclidean steps look roughly equal, which is
/// what makes straight-line interpolation here look right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    #[must_use]
    pub fn to_linear(self) -> LinearRgb {
        let lms_ = mat3_mul(&OKLAB_TO_LMS, [self.l, self.a, self.b]);
        let [r, g, b] = mat3_mul(&LMS_TO_RGB, lms_.map(|v| v * v * v));
        LinearRgb { r, g, b }
    }

    /// Back to 8-bit sRGB. Out-of-gamut values are clamped per channel.
    #[must_use]
    pub fn to_rgb8(self) -> Rgb8 {
        self.to_linear().to_srgb8()
    }

    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let h = if c < ACHROMATIC_EPS {
            0.0 // Achromatic: hue is undefined
        } else {
            self.b.atan2(self.a).to_degrees()
        };
        Oklch::new(self.l, c, h)
    }

    /// Component-wise linear interpolation. `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            a: (other.a - self.a).mul_add(t, self.a),
            b: (other.b - self.b).mul_add(t, self.b),
        }
    }
}

impl fmt::Display for Oklab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklab({:.4} {:.4} {:.4})", self.l, self.a, self.b)
    }
}

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// The polar form of OKLab: lightness, chroma, hue in degrees.
///
/// Hue is kept in [0, 360). Achromatic colors (chroma ≈ 0) report hue 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,
    /// Chroma: 0.0 (gray) to ~0.37 for the most vivid sRGB colors.
    pub c: f64,
    /// Hue angle in degrees.
    pub h: f64,
}

impl Oklch {
    /// Build an OKLCH color; the hue is normalised into [0, 360).
    #[inline]
    #[must_use]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h: normalize_hue(h) }
    }

    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let (sin, cos) = self.h.to_radians().sin_cos();
        Oklab { l: self.l, a: self.c * cos, b: self.c * sin }
    }

    /// Back to 8-bit sRGB. Out-of-gamut values are clamped per channel.
    #[must_use]
    pub fn to_rgb8(self) -> Rgb8 {
        self.to_oklab().to_rgb8()
    }

    /// Shift the hue by `degrees` (wraps around 360°).
    #[inline]
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        Self::new(self.l, self.c, self.h + degrees)
    }

    #[inline]
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Set chroma (clamped to >= 0.0).
    #[inline]
    #[must_use]
    pub fn with_chroma(self, c: f64) -> Self {
        Self { c: c.max(0.0), ..self }
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_EPS
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.2}% {:.4} {:.2})", self.l * 100.0, self.c, self.h)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// Gamma-encoded hue/saturation/lightness.
///
/// Not perceptual, but it is what designers type and what the contrast
/// corrector scans: holding `h` and `s` fixed while stepping `l` keeps the
/// "same color, lighter or darker" intuition users expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, [0, 360).
    pub h: f64,
    /// Saturation, [0, 1].
    pub s: f64,
    /// Lightness, [0, 1].
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h: normalize_hue(h), s: s.clamp(0.0, 1.0), l: l.clamp(0.0, 1.0) }
    }

    #[must_use]
    pub fn to_rgb8(self) -> Rgb8 {
        let c = (1.0 - 2.0f64.mul_add(self.l, -1.0).abs()) * self.s;
        let sector = self.h / 60.0;
        let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let m = self.l - c * 0.5;

        let (r, g, b) = match sector {
            s if s < 1.0 => (c, x, 0.0),
            s if s < 2.0 => (x, c, 0.0),
            s if s < 3.0 => (0.0, c, x),
            s if s < 4.0 => (0.0, x, c),
            s if s < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb8::from_f64((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.1} {:.1}% {:.1}%)", self.h, self.s * 100.0, self.l * 100.0)
    }
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Parse `#RRGGBB` or `RRGGBB` (case-insensitive) into an [`Rgb8`].
///
/// No shorthand, no alpha, no surrounding whitespace.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] for any other input.
pub fn parse_hex(text: &str) -> Result<Rgb8> {
    let invalid = || ColorError::InvalidHex(text.to_string());
    let digits = text.strip_prefix('#').unwrap_or(text).as_bytes();
    if digits.len() != 6 {
        return Err(invalid());
    }

    let r = parse_hex_byte(digits[0], digits[1]).ok_or_else(invalid)?;
    let g = parse_hex_byte(digits[2], digits[3]).ok_or_else(invalid)?;
    let b = parse_hex_byte(digits[4], digits[5]).ok_or_else(invalid)?;
    Ok(Rgb8::new(r, g, b))
}

/// Format as `#rrggbb`.
#[must_use]
pub fn format_hex(color: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn parse_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (parse_hex_digit(hi), parse_hex_digit(lo)) {
        (Some(hi), Some(lo)) => Some(hi << 4 | lo),
        _ => None,
    }
}

// ─── Transfer Curves ─────────────────────────────────────────────────────────
//
// sRGB uses a piecewise transfer function: a short linear toe near black
// and a 2.4 power segment above it.

/// Decode one gamma-encoded component (0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear-light component to gamma-encoded sRGB (0.0–1.0).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// [`Rgb8`] → [`LinearRgb`] through the sRGB EOTF.
#[must_use]
pub fn to_linear(color: Rgb8) -> LinearRgb {
    let [r, g, b] = color.to_f64().map(|c| srgb_to_linear(c / 255.0));
    LinearRgb { r, g, b }
}

/// [`LinearRgb`] → [`Rgb8`]: encode, scale to 255, round, clamp.
#[must_use]
pub fn to_srgb8(color: LinearRgb) -> Rgb8 {
    Rgb8::from_f64(
        linear_to_srgb(color.r) * 255.0,
        linear_to_srgb(color.g) * 255.0,
        linear_to_srgb(color.b) * 255.0,
    )
}

/// [`Rgb8`] → [`Oklab`].
#[must_use]
pub fn to_oklab(color: Rgb8) -> Oklab {
    to_linear(color).to_oklab()
}

/// [`Rgb8`] → [`Oklch`].
#[must_use]
pub fn to_oklch(color: Rgb8) -> Oklch {
    to_oklab(color).to_oklch()
}

// ─── Oklab Matrices ──────────────────────────────────────────────────────────
//
// Linear sRGB ↔ LMS (cone response) ↔ Oklab, with a cube root between the
// two matrices. Coefficients from Björn Ottosson's reference:
// https://bottosson.github.io/posts/oklab/

const RGB_TO_LMS: Mat3 = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

const LMS_TO_OKLAB: Mat3 = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

const OKLAB_TO_LMS: Mat3 = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];

const LMS_TO_RGB: Mat3 = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

/// Multiply a row-major 3×3 matrix by a column vector.
#[inline]
#[must_use]
pub fn mat3_mul(m: &Mat3, v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0].mul_add(v[0], row[1].mul_add(v[1], row[2] * v[2])))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Chroma below this is treated as gray.
const ACHROMATIC_EPS: f64 = 1e-8;

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// Round a 0–255 float to the nearest channel value, clamping to [0, 255].
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
