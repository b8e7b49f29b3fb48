//! Color-vision deficiency simulation.
//!
//! Each deficiency is a fixed 3×3 matrix applied to the plain 0–255 channel
//! values (no linearisation), then rounded and clamped. Pixels are
//! independent, so raster buffers are processed element by element with no
//! cross-pixel state.

use std::fmt;
use std::str::FromStr;

use prism_color::color::{Mat3, mat3_mul};
use prism_color::{ColorError, Rgb8};
use serde::{Deserialize, Serialize};

/// A simulated color-vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Deficiency {
    #[default]
    Normal,
    /// No red cones.
    Protanopia,
    /// Weak red cones.
    Protanomaly,
    /// No green cones.
    Deuteranopia,
    /// Weak green cones.
    Deuteranomaly,
    /// No blue cones.
    Tritanopia,
    /// Weak blue cones.
    Tritanomaly,
    /// Total color blindness.
    Achromatopsia,
    /// Partial color blindness.
    Achromatomaly,
}

impl Deficiency {
    /// Row-major transform applied to an `[r, g, b]` column vector.
    #[must_use]
    pub const fn matrix(self) -> Mat3 {
        match self {
            Self::Normal => [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            Self::Protanopia => [[0.567, 0.433, 0.0], [0.558, 0.442, 0.0], [0.0, 0.242, 0.758]],
            Self::Protanomaly => [[0.817, 0.183, 0.0], [0.333, 0.667, 0.0], [0.0, 0.125, 0.875]],
            Self::Deuteranopia => [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]],
            Self::Deuteranomaly => [[0.8, 0.2, 0.0], [0.258, 0.742, 0.0], [0.0, 0.142, 0.858]],
            Self::Tritanopia => [[0.95, 0.05, 0.0], [0.0, 0.433, 0.567], [0.0, 0.475, 0.525]],
            Self::Tritanomaly => [[0.967, 0.033, 0.0], [0.0, 0.733, 0.267], [0.0, 0.183, 0.817]],
            Self::Achromatopsia => {
                [[0.299, 0.587, 0.114], [0.299, 0.587, 0.114], [0.299, 0.587, 0.114]]
            }
            Self::Achromatomaly => {
                [[0.618, 0.320, 0.062], [0.163, 0.775, 0.062], [0.163, 0.320, 0.516]]
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Protanopia => "protanopia",
            Self::Protanomaly => "protanomaly",
            Self::Deuteranopia => "deuteranopia",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Tritanopia => "tritanopia",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatopsia => "achromatopsia",
            Self::Achromatomaly => "achromatomaly",
        }
    }

    /// Parse a deficiency from its name (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownDeficiency`] for names outside the list.
    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        let wanted = crate::normalize_name(name);
        Self::all()
            .iter()
            .find(|d| d.name() == wanted)
            .copied()
            .ok_or_else(|| ColorError::UnknownDeficiency(name.to_string()))
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Normal, Self::Protanopia, Self::Protanomaly, Self::Deuteranopia,
            Self::Deuteranomaly, Self::Tritanopia, Self::Tritanomaly, Self::Achromatopsia,
            Self::Achromatomaly,
        ]
    }

    /// Simulate a single color. Shorthand for [`simulate`].
    #[must_use]
    pub fn apply(self, color: Rgb8) -> Rgb8 {
        simulate(color, self)
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deficiency {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// How `color` appears under `deficiency`.
#[must_use]
pub fn simulate(color: Rgb8, deficiency: Deficiency) -> Rgb8 {
    if deficiency == Deficiency::Normal {
        return color;
    }
    let [r, g, b] = mat3_mul(&deficiency.matrix(), color.to_f64());
    Rgb8::from_f64(r, g, b)
}

/// Simulate `deficiency` in place over an interleaved RGB (`channels` = 3)
/// or RGBA (`channels` = 4) buffer. Alpha is left untouched.
///
/// # Errors
///
/// [`ColorError::InvalidPixelBuffer`] if `channels` is not 3 or 4, or the
/// buffer length is not a multiple of it.
pub fn simulate_pixels(
    pixels: &mut [u8],
    channels: usize,
    deficiency: Deficiency,
) -> Result<(), ColorError> {
    if !matches!(channels, 3 | 4) || pixels.len() % channels != 0 {
        return Err(ColorError::InvalidPixelBuffer { len: pixels.len(), channels });
    }
    if deficiency == Deficiency::Normal {
        return Ok(());
    }

    for px in pixels.chunks_exact_mut(channels) {
        let out = simulate(Rgb8::new(px[0], px[1], px[2]), deficiency);
        px[..3].copy_from_slice(&<[u8; 3]>::from(out));
    }

    tracing::trace!(deficiency = deficiency.name(), pixels = pixels.len() / channels, "simulated raster");
    Ok(())
}

/// Allocating variant of [`simulate_pixels`].
///
/// # Errors
///
/// Same as [`simulate_pixels`].
pub fn simulate_image(
    pixels: &[u8],
    channels: usize,
    deficiency: Deficiency,
) -> Result<Vec<u8>, ColorError> {
    let mut out = pixels.to_vec();
    simulate_pixels(&mut out, channels, deficiency)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const RED: Rgb8 = Rgb8::new(255, 0, 0);

    #[test]
    fn protanopia_red() {
        // 0.567·255 = 144.585, 0.558·255 = 142.29.
        assert_eq!(simulate(RED, Deficiency::Protanopia), Rgb8::new(145, 142, 0));
    }

    #[test]
    fn tritanopia_blue() {
        // 0.567·255 = 144.585, 0.525·255 = 133.875.
        assert_eq!(simulate(Rgb8::new(0, 0, 255), Deficiency::Tritanopia), Rgb8::new(0, 145, 134));
    }

    #[test]
    fn achromatopsia_is_gray() {
        assert_eq!(simulate(Rgb8::WHITE, Deficiency::Achromatopsia), Rgb8::WHITE);
        let c = simulate(Rgb8::new(0x3b, 0x82, 0xf6), Deficiency::Achromatopsia);
        assert_eq!((c.r, c.r), (c.g, c.b));
    }

    #[test]
    fn rows_of_every_matrix_sum_to_about_one() {
        // Published constants are rounded to three places.
        for &d in Deficiency::all() {
            for row in d.matrix() {
                let sum: f64 = row.iter().sum();
                assert!((sum - 1.0).abs() < 2e-3, "{d}: {row:?}");
            }
        }
    }

    #[test]
    fn pixels_rgba_keep_alpha() {
        let mut buf = vec![255, 0, 0, 17, 255, 255, 255, 200];
        simulate_pixels(&mut buf, 4, Deficiency::Protanopia).unwrap();
        assert_eq!(buf, vec![145, 142, 0, 17, 255, 255, 255, 200]);
    }

    #[test]
    fn pixels_match_per_color_simulation() {
        let src = vec![10, 200, 30, 250, 5, 90, 0, 0, 0];
        let out = simulate_image(&src, 3, Deficiency::Deuteranomaly).unwrap();
        for (px, chunk) in src.chunks(3).zip(out.chunks(3)) {
            let want = simulate(Rgb8::new(px[0], px[1], px[2]), Deficiency::Deuteranomaly);
            assert_eq!(chunk, &<[u8; 3]>::from(want)[..]);
        }
    }

    #[test]
    fn bad_buffers_are_rejected() {
        let mut buf = vec![0u8; 7];
        assert_eq!(
            simulate_pixels(&mut buf, 3, Deficiency::Tritanopia),
            Err(ColorError::InvalidPixelBuffer { len: 7, channels: 3 })
        );
        assert_eq!(
            simulate_image(&[0; 6], 2, Deficiency::Normal),
            Err(ColorError::InvalidPixelBuffer { len: 6, channels: 2 })
        );
        assert_eq!(simulate_image(&[], 4, Deficiency::Achromatopsia), Ok(vec![]));
    }

    #[test]
    fn names_roundtrip() {
        for &d in Deficiency::all() {
            assert_eq!(d.name().parse::<Deficiency>(), Ok(d));
        }
        assert_eq!(Deficiency::from_name("PROTANOPIA"), Ok(Deficiency::Protanopia));
        assert_eq!(
            Deficiency::from_name("colorblind"),
            Err(ColorError::UnknownDeficiency("colorblind".to_string()))
        );
        assert_eq!(serde_json::to_string(&Deficiency::Achromatomaly).unwrap(), "\"achromatomaly\"");
    }

    proptest! {
        #[test]
        fn normal_is_identity(r: u8, g: u8, b: u8) {
            let c = Rgb8::new(r, g, b);
            prop_assert_eq!(simulate(c, Deficiency::Normal), c);
        }

        #[test]
        fn pixel_order_does_not_matter(px in proptest::collection::vec(any::<u8>(), 0..16).prop_map(|mut v| { v.truncate(v.len() / 3 * 3); v })) {
            let forward = simulate_image(&px, 3, Deficiency::Tritanomaly).unwrap();
            let reversed_in: Vec<u8> = px.chunks(3).rev().flatten().copied().collect();
            let reversed_out = simulate_image(&reversed_in, 3, Deficiency::Tritanomaly).unwrap();
            let unreversed: Vec<u8> = reversed_out.chunks(3).rev().flatten().copied().collect();
            prop_assert_eq!(forward, unreversed);
        }
    }
}
