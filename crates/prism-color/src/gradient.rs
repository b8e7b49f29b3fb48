// SPDX-License-Identifier: MIT
//
// Multi-stop gradients.
//
// A gradient is an ordered list of (position, color) stops on [0, 1].
// Sampling finds the enclosing pair of stops and interpolates between them
// in the gradient's blend space. Outside the first/last stop the end color
// is held, the way CSS gradients behave.

use serde::{Deserialize, Serialize};

use crate::blend::BlendSpace;
use crate::color::Rgb8;
use crate::error::{ColorError, Result};

/// One stop of a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, in [0, 1].
    pub position: f64,
    pub color: Rgb8,
}

impl GradientStop {
    #[inline]
    #[must_use]
    pub const fn new(position: f64, color: Rgb8) -> Self {
        Self { position, color }
    }
}

/// A validated, position-sorted multi-stop gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    space: BlendSpace,
}

impl Gradient {
    /// Build a gradient from stops in any order.
    ///
    /// Stops are sorted by position; stops sharing a position keep their
    /// given order, which produces a hard edge.
    ///
    /// # Errors
    ///
    /// - [`ColorError::EmptyGradient`] when `stops` is empty.
    /// - [`ColorError::InvalidStopPosition`] for a position outside [0, 1]
    ///   or not a number.
    pub fn new(mut stops: Vec<GradientStop>, space: BlendSpace) -> Result<Self> {
        if stops.is_empty() {
            return Err(ColorError::EmptyGradient);
        }
        if let Some(bad) = stops.iter().find(|s| !(0.0..=1.0).contains(&s.position)) {
            return Err(ColorError::InvalidStopPosition(bad.position));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops, space })
    }

    /// Spread `colors` evenly over [0, 1].
    ///
    /// # Errors
    ///
    /// [`ColorError::EmptyGradient`] when `colors` is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn evenly_spaced(colors: &[Rgb8], space: BlendSpace) -> Result<Self> {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| GradientStop::new(i as f64 / last, color))
            .collect();
        Self::new(stops, space)
    }

    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    #[must_use]
    pub const fn space(&self) -> BlendSpace {
        self.space
    }

    /// Sample the gradient at `t`, clamped to [0, 1].
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidFraction`] if `t` is NaN.
    pub fn sample(&self, t: f64) -> Result<Rgb8> {
        if t.is_nan() {
            return Err(ColorError::InvalidFraction(t));
        }
        let t = t.clamp(0.0, 1.0);

        let first = self.stops[0];
        if t <= first.position {
            return Ok(first.color);
        }

        // First stop strictly past t; the segment is (upper - 1, upper).
        let upper = self.stops.partition_point(|s| s.position <= t);
        if upper == self.stops.len() {
            return Ok(self.stops[upper - 1].color);
        }

        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let span = hi.position - lo.position;
        let local = if span > 0.0 { (t - lo.position) / span } else { 1.0 };
        self.space.lerp(lo.color, hi.color, local)
    }

    /// `count` samples evenly spaced from 0 to 1 inclusive.
    ///
    /// A count of 1 samples the start; 0 yields nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`Gradient::sample`] failures (none for finite input).
    #[allow(clippy::cast_precision_loss)]
    pub fn steps(&self, count: usize) -> Result<Vec<Rgb8>> {
        let denom = count.saturating_sub(1).max(1) as f64;
        (0..count).map(|i| self.sample(i as f64 / denom)).collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::{lerp_oklab, lerp_rgb};
    use pretty_assertions::assert_eq;

    const RED: Rgb8 = Rgb8::new(255, 0, 0);
    const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    fn three_stop(space: BlendSpace) -> Gradient {
        Gradient::new(
            vec![
                GradientStop::new(1.0, BLUE),
                GradientStop::new(0.0, RED),
                GradientStop::new(0.5, GREEN),
            ],
            space,
        )
        .unwrap()
    }

    #[test]
    fn stops_are_sorted() {
        let g = three_stop(BlendSpace::Rgb);
        let order: Vec<Rgb8> = g.stops().iter().map(|s| s.color).collect();
        assert_eq!(order, vec![RED, GREEN, BLUE]);
    }

    #[test]
    fn sample_hits_stops_exactly() {
        let g = three_stop(BlendSpace::Oklab);
        assert_eq!(g.sample(0.0), Ok(RED));
        assert_eq!(g.sample(0.5), Ok(GREEN));
        assert_eq!(g.sample(1.0), Ok(BLUE));
    }

    #[test]
    fn sample_interpolates_within_segment() {
        let g = three_stop(BlendSpace::Rgb);
        assert_eq!(g.sample(0.25), lerp_rgb(RED, GREEN, 0.5));
        assert_eq!(g.sample(0.75), lerp_rgb(GREEN, BLUE, 0.5));

        let g = three_stop(BlendSpace::Oklab);
        assert_eq!(g.sample(0.75), lerp_oklab(GREEN, BLUE, 0.5));
    }

    #[test]
    fn sample_clamps_and_holds_ends() {
        let g = Gradient::new(
            vec![GradientStop::new(0.2, RED), GradientStop::new(0.8, BLUE)],
            BlendSpace::Rgb,
        )
        .unwrap();
        assert_eq!(g.sample(-4.0), Ok(RED));
        assert_eq!(g.sample(0.1), Ok(RED));
        assert_eq!(g.sample(0.9), Ok(BLUE));
        assert_eq!(g.sample(7.0), Ok(BLUE));
        assert!(g.sample(f64::NAN).is_err());
    }

    #[test]
    fn coincident_stops_make_a_hard_edge() {
        let g = Gradient::new(
            vec![
                GradientStop::new(0.0, RED),
                GradientStop::new(0.5, RED),
                GradientStop::new(0.5, BLUE),
                GradientStop::new(1.0, BLUE),
            ],
            BlendSpace::Rgb,
        )
        .unwrap();
        assert_eq!(g.sample(0.49), Ok(RED));
        assert_eq!(g.sample(0.5), Ok(BLUE));
    }

    #[test]
    fn single_stop_is_solid() {
        let g = Gradient::new(vec![GradientStop::new(0.3, GREEN)], BlendSpace::Oklab).unwrap();
        assert_eq!(g.steps(3), Ok(vec![GREEN; 3]));
    }

    #[test]
    fn evenly_spaced_steps() {
        let g = Gradient::evenly_spaced(&[Rgb8::BLACK, Rgb8::WHITE], BlendSpace::Rgb).unwrap();
        let steps = g.steps(3).unwrap();
        assert_eq!(steps[0], Rgb8::BLACK);
        assert_eq!(steps[1], Rgb8::new(128, 128, 128));
        assert_eq!(steps[2], Rgb8::WHITE);
        assert_eq!(g.steps(1), Ok(vec![Rgb8::BLACK]));
        assert_eq!(g.steps(0), Ok(vec![]));
    }

    #[test]
    fn rejects_bad_stops() {
        assert_eq!(Gradient::new(vec![], BlendSpace::Rgb), Err(ColorError::EmptyGradient));
        assert_eq!(
            Gradient::new(vec![GradientStop::new(1.5, RED)], BlendSpace::Rgb),
            Err(ColorError::InvalidStopPosition(1.5))
        );
        assert!(Gradient::new(vec![GradientStop::new(f64::NAN, RED)], BlendSpace::Rgb).is_err());
        assert_eq!(Gradient::evenly_spaced(&[], BlendSpace::Rgb), Err(ColorError::EmptyGradient));
    }
}
