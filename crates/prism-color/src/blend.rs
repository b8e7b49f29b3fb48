// SPDX-License-Identifier: MIT
//
// Blending: two-color interpolation and multi-point color fields.
//
// Plain RGB interpolation averages gamma-encoded channel values, so the
// midpoint of two saturated complements collapses toward gray. Interpolating
// in OKLab keeps lightness and chroma moving in straight perceptual lines,
// which is why `lerp_oklab(red, green, 0.5)` is a warm ochre, not mud.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb8;
use crate::error::{ColorError, Result};

/// Softening term added to squared distances in [`weighted_blend`], so a
/// query sitting exactly on an anchor doesn't divide by zero.
pub const WEIGHT_EPSILON: f64 = 0.01;

// ─── Two-color interpolation ─────────────────────────────────────────────────

/// Interpolate directly on 8-bit channel values.
///
/// `t` = 0 returns `c1`, `t` = 1 returns `c2`. Values outside [0, 1]
/// extrapolate; each channel is then rounded and clamped.
///
/// # Errors
///
/// [`ColorError::InvalidFraction`] if `t` is NaN or infinite.
pub fn lerp_rgb(c1: Rgb8, c2: Rgb8, t: f64) -> Result<Rgb8> {
    check_fraction(t)?;
    let [r1, g1, b1] = c1.to_f64();
    let [r2, g2, b2] = c2.to_f64();
    Ok(Rgb8::from_f64(
        (r2 - r1).mul_add(t, r1),
        (g2 - g1).mul_add(t, g1),
        (b2 - b1).mul_add(t, b1),
    ))
}

/// Interpolate in OKLab, clamping only when quantising back to 8 bits.
///
/// # Errors
///
/// [`ColorError::InvalidFraction`] if `t` is NaN or infinite.
pub fn lerp_oklab(c1: Rgb8, c2: Rgb8, t: f64) -> Result<Rgb8> {
    check_fraction(t)?;
    Ok(c1.to_oklab().lerp(c2.to_oklab(), t).to_rgb8())
}

fn check_fraction(t: f64) -> Result<()> {
    if t.is_finite() {
        Ok(())
    } else {
        Err(ColorError::InvalidFraction(t))
    }
}

// ─── BlendSpace ──────────────────────────────────────────────────────────────

/// Which space two-color interpolation happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendSpace {
    /// Straight 8-bit channel interpolation.
    Rgb,
    /// Perceptual interpolation through OKLab.
    #[default]
    Oklab,
}

impl BlendSpace {
    /// Interpolate `c1` → `c2` at `t` in this space.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidFraction`] if `t` is NaN or infinite.
    pub fn lerp(self, c1: Rgb8, c2: Rgb8, t: f64) -> Result<Rgb8> {
        match self {
            Self::Rgb => lerp_rgb(c1, c2, t),
            Self::Oklab => lerp_oklab(c1, c2, t),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Oklab => "oklab",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rgb, Self::Oklab]
    }
}

impl fmt::Display for BlendSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendSpace {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .find(|space| space.name() == lower)
            .copied()
            .ok_or_else(|| format!("unknown blend space: {s} (expected rgb or oklab)"))
    }
}

// ─── Multi-point fields ──────────────────────────────────────────────────────

/// A colored anchor in a 2-D color field, nominally in [0, 1]².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub color: Rgb8,
}

impl Anchor {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, color: Rgb8) -> Self {
        Self { x, y, color }
    }
}

/// Inverse-distance-weighted blend of `anchors` at `(x, y)`.
///
/// Each anchor weighs `1 / (d² + ε)` with ε = [`WEIGHT_EPSILON`]; weights
/// are normalised and the 8-bit channels summed. Every query is evaluated
/// independently; fields are small (typically ≤ 9 anchors).
///
/// Weights are computed relative to the nearest anchor, so a field far from
/// the query still blends instead of underflowing to all-zero weights.
///
/// # Errors
///
/// - [`ColorError::EmptyAnchors`] when `anchors` is empty.
/// - [`ColorError::InvalidPosition`] when the query or an anchor has a
///   NaN or infinite coordinate, or every anchor is too far away for its
///   distance to be representable.
pub fn weighted_blend(anchors: &[Anchor], x: f64, y: f64) -> Result<Rgb8> {
    if anchors.is_empty() {
        return Err(ColorError::EmptyAnchors);
    }
    check_position(x, y)?;

    let mut distances = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        check_position(anchor.x, anchor.y)?;
        distances.push((x - anchor.x).hypot(y - anchor.y));
    }
    let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
    if !nearest.is_finite() {
        return Err(ColorError::InvalidPosition { x, y });
    }

    // Distances are rescaled so the nearest anchor's term stays in (0, 1].
    let scale = nearest.max(1.0);
    let soften = WEIGHT_EPSILON / (scale * scale);
    let term = |d: f64| {
        let r = d / scale;
        r.mul_add(r, soften)
    };
    let nearest_term = term(nearest);

    let mut total = 0.0;
    let mut acc = [0.0f64; 3];
    for (anchor, &d) in anchors.iter().zip(&distances) {
        let weight = nearest_term / term(d);
        total += weight;
        for (sum, channel) in acc.iter_mut().zip(anchor.color.to_f64()) {
            *sum = channel.mul_add(weight, *sum);
        }
    }

    let [r, g, b] = acc.map(|sum| sum / total);
    Ok(Rgb8::from_f64(r, g, b))
}

fn check_position(x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(ColorError::InvalidPosition { x, y })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Rgb8 = Rgb8::new(255, 0, 0);
    const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    // ── lerp_rgb ─────────────────────────────────────────────────────────

    #[test]
    fn rgb_endpoints() {
        assert_eq!(lerp_rgb(RED, BLUE, 0.0), Ok(RED));
        assert_eq!(lerp_rgb(RED, BLUE, 1.0), Ok(BLUE));
    }

    #[test]
    fn rgb_midpoint_rounds_half_away_from_zero() {
        assert_eq!(lerp_rgb(RED, GREEN, 0.5), Ok(Rgb8::new(128, 128, 0)));
    }

    #[test]
    fn rgb_extrapolates_then_clamps() {
        let gray = Rgb8::new(100, 100, 100);
        let light = Rgb8::new(200, 200, 200);
        assert_eq!(lerp_rgb(gray, light, 1.5), Ok(Rgb8::new(250, 250, 250)));
        assert_eq!(lerp_rgb(gray, light, 3.0), Ok(Rgb8::WHITE));
        assert_eq!(lerp_rgb(gray, light, -2.0), Ok(Rgb8::BLACK));
    }

    #[test]
    fn non_finite_fraction_is_rejected() {
        assert!(matches!(lerp_rgb(RED, BLUE, f64::NAN), Err(ColorError::InvalidFraction(_))));
        assert_eq!(
            lerp_oklab(RED, BLUE, f64::INFINITY),
            Err(ColorError::InvalidFraction(f64::INFINITY))
        );
    }

    // ── lerp_oklab ───────────────────────────────────────────────────────

    #[test]
    fn oklab_endpoints_roundtrip() {
        assert_eq!(lerp_oklab(RED, BLUE, 0.0), Ok(RED));
        assert_eq!(lerp_oklab(RED, BLUE, 1.0), Ok(BLUE));
    }

    #[test]
    fn oklab_midpoint_differs_from_rgb_midpoint() {
        let perceptual = lerp_oklab(RED, GREEN, 0.5).unwrap();
        let naive = lerp_rgb(RED, GREEN, 0.5).unwrap();
        assert_ne!(perceptual, naive);
        // The perceptual midpoint stays bright and warm.
        assert_eq!(perceptual, Rgb8::new(0xd0, 0xa8, 0x00));
    }

    #[test]
    fn oklab_midpoint_of_grays_is_gray() {
        let mid = lerp_oklab(Rgb8::BLACK, Rgb8::WHITE, 0.5).unwrap();
        assert_eq!(mid.r, mid.g);
        assert_eq!(mid.g, mid.b);
    }

    #[test]
    fn blend_space_dispatch() {
        assert_eq!(BlendSpace::Rgb.lerp(RED, GREEN, 0.5), lerp_rgb(RED, GREEN, 0.5));
        assert_eq!(BlendSpace::Oklab.lerp(RED, GREEN, 0.5), lerp_oklab(RED, GREEN, 0.5));
        assert_eq!("OKLab".parse::<BlendSpace>(), Ok(BlendSpace::Oklab));
        assert!("hsv".parse::<BlendSpace>().is_err());
    }

    // ── weighted_blend ───────────────────────────────────────────────────

    #[test]
    fn single_anchor_is_its_color_everywhere() {
        let anchors = [Anchor::new(0.2, 0.8, BLUE)];
        assert_eq!(weighted_blend(&anchors, 0.9, 0.1), Ok(BLUE));
    }

    #[test]
    fn query_on_anchor_is_dominated_by_it() {
        let anchors = [Anchor::new(0.0, 0.0, RED), Anchor::new(1.0, 1.0, BLUE)];
        let c = weighted_blend(&anchors, 0.0, 0.0).unwrap();
        // weights 1/0.01 vs 1/2.01: red carries ~99.5%.
        assert!(c.r >= 250 && c.b <= 5, "{c:?}");
    }

    #[test]
    fn equidistant_query_averages() {
        let anchors = [Anchor::new(0.0, 0.5, Rgb8::BLACK), Anchor::new(1.0, 0.5, Rgb8::WHITE)];
        let c = weighted_blend(&anchors, 0.5, 0.5).unwrap();
        // Exactly 127.5 before rounding, give or take an ulp.
        assert!((127..=128).contains(&c.r), "{c:?}");
        assert_eq!((c.r, c.r), (c.g, c.b));
    }

    #[test]
    fn weighted_blend_rejects_bad_input() {
        assert_eq!(weighted_blend(&[], 0.5, 0.5), Err(ColorError::EmptyAnchors));
        let anchors = [Anchor::new(0.0, 0.0, RED)];
        assert!(matches!(
            weighted_blend(&anchors, f64::NAN, 0.5),
            Err(ColorError::InvalidPosition { .. })
        ));
        let anchors = [Anchor::new(f64::INFINITY, 0.0, RED)];
        assert!(weighted_blend(&anchors, 0.5, 0.5).is_err());
    }

    #[test]
    fn distant_single_anchor_keeps_its_color() {
        let anchors = [Anchor::new(1e200, 0.0, RED)];
        assert_eq!(weighted_blend(&anchors, 0.0, 0.0), Ok(RED));
    }

    #[test]
    fn distant_field_still_blends() {
        // Both anchors ~1e200 away and nearly equidistant: an even mix.
        let anchors = [Anchor::new(1e200, 0.0, Rgb8::BLACK), Anchor::new(-1e200, 0.0, Rgb8::WHITE)];
        let c = weighted_blend(&anchors, 0.0, 0.0).unwrap();
        assert!((127..=128).contains(&c.r), "{c:?}");
    }

    #[test]
    fn nearest_anchor_dominates_far_field() {
        let anchors = [Anchor::new(1e200, 0.0, RED), Anchor::new(0.0, 0.0, BLUE)];
        assert_eq!(weighted_blend(&anchors, 0.0, 0.0), Ok(BLUE));
    }

    #[test]
    fn unrepresentable_distance_is_rejected() {
        let anchors = [Anchor::new(f64::MAX, 0.0, RED)];
        assert!(matches!(
            weighted_blend(&anchors, -f64::MAX, 0.0),
            Err(ColorError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn anchor_order_does_not_matter() {
        let a = [Anchor::new(0.0, 0.0, RED), Anchor::new(1.0, 0.0, GREEN), Anchor::new(0.5, 1.0, BLUE)];
        let b = [a[2], a[0], a[1]];
        for (x, y) in [(0.1, 0.1), (0.5, 0.5), (0.9, 0.3)] {
            let (p, q) = (weighted_blend(&a, x, y).unwrap(), weighted_blend(&b, x, y).unwrap());
            // Summation order can move a channel sitting on .5 by one step.
            assert!(p.r.abs_diff(q.r) <= 1 && p.g.abs_diff(q.g) <= 1 && p.b.abs_diff(q.b) <= 1);
        }
    }
}
