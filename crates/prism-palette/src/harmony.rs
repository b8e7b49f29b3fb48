//! Harmony schemes: fixed hue-rotation tables applied in OKLCH.
//!
//! Each scheme is a list of hue offsets relative to the base color. The
//! base is converted to OKLCH once; every offset produces a sibling with
//! the same lightness and chroma and a rotated hue. Offset 0 is the base
//! color itself, returned untouched rather than round-tripped.
//!
//! [`HarmonyScheme::Monochromatic`] is the exception: it keeps the hue and
//! walks a fixed set of lightness targets instead.

use std::fmt;
use std::str::FromStr;

use prism_color::{ColorError, Oklch, Rgb8};
use serde::{Deserialize, Serialize};

/// Lightness targets for [`HarmonyScheme::Monochromatic`], dark to light.
pub const MONOCHROMATIC_LIGHTNESS: [f64; 5] = [0.25, 0.40, 0.55, 0.70, 0.85];

/// Above this lightness the monochromatic ramp halves chroma, so the light
/// end doesn't clip into washed-out pastels.
const MONOCHROMATIC_PASTEL_THRESHOLD: f64 = 0.7;

/// A named harmony scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyScheme {
    /// Opposite hues (2 colors).
    Complementary,
    /// Neighbours ±30° (3 colors).
    Analogous,
    /// Analogous plus the complement (4 colors).
    AccentedAnalogous,
    /// The two hues either side of the complement (3 colors).
    SplitComplementary,
    /// Analogous neighbours and split complements together (5 colors).
    DoubleSplitComplementary,
    /// 120° spacing (3 colors).
    Triadic,
    /// Rectangle: two complementary pairs 60° apart (4 colors).
    Tetradic,
    /// 90° spacing (4 colors).
    Square,
    /// A neighbour and its complement plus the base's complement (4 colors).
    Compound,
    /// Both right angles (3 colors).
    Clash,
    /// 72° spacing (5 colors).
    Pentadic,
    /// One hue, five lightness steps.
    Monochromatic,
}

impl HarmonyScheme {
    /// Hue offsets in degrees, in output order.
    ///
    /// Empty for [`Monochromatic`](Self::Monochromatic), which varies
    /// lightness instead of hue.
    #[must_use]
    pub const fn angles(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[0.0, 180.0],
            Self::Analogous => &[0.0, 30.0, 330.0],
            Self::AccentedAnalogous => &[0.0, 30.0, 330.0, 180.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
            Self::DoubleSplitComplementary => &[0.0, 30.0, 150.0, 210.0, 330.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::Tetradic => &[0.0, 60.0, 180.0, 240.0],
            Self::Square => &[0.0, 90.0, 180.0, 270.0],
            Self::Compound => &[0.0, 30.0, 180.0, 210.0],
            Self::Clash => &[0.0, 90.0, 270.0],
            Self::Pentadic => &[0.0, 72.0, 144.0, 216.0, 288.0],
            Self::Monochromatic => &[],
        }
    }

    /// Number of colors this scheme produces.
    #[must_use]
    pub const fn color_count(self) -> usize {
        match self {
            Self::Monochromatic => MONOCHROMATIC_LIGHTNESS.len(),
            other => other.angles().len(),
        }
    }

    /// Generate this scheme's colors from `base`.
    #[must_use]
    pub fn generate(self, base: Rgb8) -> Vec<Rgb8> {
        generate_harmony(base, self)
    }

    /// Kebab-case name of this scheme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::AccentedAnalogous => "accented-analogous",
            Self::SplitComplementary => "split-complementary",
            Self::DoubleSplitComplementary => "double-split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Square => "square",
            Self::Compound => "compound",
            Self::Clash => "clash",
            Self::Pentadic => "pentadic",
            Self::Monochromatic => "monochromatic",
        }
    }

    /// Parse a scheme from its name (case-insensitive; `_` and spaces
    /// accepted in place of `-`).
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownScheme`] for names outside the catalogue.
    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        let wanted = crate::normalize_name(name);
        Self::all()
            .iter()
            .find(|s| s.name() == wanted)
            .copied()
            .ok_or_else(|| ColorError::UnknownScheme(name.to_string()))
    }

    /// All schemes, in catalogue order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary, Self::Analogous, Self::AccentedAnalogous,
            Self::SplitComplementary, Self::DoubleSplitComplementary, Self::Triadic,
            Self::Tetradic, Self::Square, Self::Compound, Self::Clash,
            Self::Pentadic, Self::Monochromatic,
        ]
    }
}

impl fmt::Display for HarmonyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyScheme {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Generate the colors of `scheme` around `base`.
///
/// Output order follows the scheme's angle table; the 0° entry is `base`
/// exactly. Pure and deterministic.
#[must_use]
pub fn generate_harmony(base: Rgb8, scheme: HarmonyScheme) -> Vec<Rgb8> {
    let lch = base.to_oklch();

    if scheme == HarmonyScheme::Monochromatic {
        return MONOCHROMATIC_LIGHTNESS
            .iter()
            .map(|&l| {
                let c = if l > MONOCHROMATIC_PASTEL_THRESHOLD { lch.c * 0.5 } else { lch.c };
                Oklch::new(l, c, lch.h).to_rgb8()
            })
            .collect();
    }

    // Every angle table opens with 0°, which is `base` itself.
    std::iter::once(base)
        .chain(scheme.angles().iter().skip(1).map(|&angle| lch.rotate(angle).to_rgb8()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BLUE_500: Rgb8 = Rgb8::new(0x3b, 0x82, 0xf6);
    /// Low chroma keeps every rotation inside the sRGB gamut.
    const SLATE: Rgb8 = Rgb8::new(0x6b, 0x8e, 0xa8);

    fn hue_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    #[test]
    fn complementary_is_base_then_rotation() {
        let colors = generate_harmony(BLUE_500, HarmonyScheme::Complementary);
        let expected = BLUE_500.to_oklch().rotate(180.0).to_rgb8();
        assert_eq!(colors, vec![BLUE_500, expected]);
    }

    #[test]
    fn complementary_of_blue_is_amber() {
        let colors = generate_harmony(BLUE_500, HarmonyScheme::Complementary);
        assert_eq!(colors[1].to_hex(), "#c17400");
    }

    #[test]
    fn deterministic() {
        for &scheme in HarmonyScheme::all() {
            assert_eq!(generate_harmony(BLUE_500, scheme), generate_harmony(BLUE_500, scheme));
        }
    }

    #[test]
    fn lengths_match_tables() {
        for &scheme in HarmonyScheme::all() {
            assert_eq!(generate_harmony(SLATE, scheme).len(), scheme.color_count(), "{scheme}");
        }
        assert_eq!(HarmonyScheme::Triadic.color_count(), 3);
        assert_eq!(HarmonyScheme::Pentadic.color_count(), 5);
    }

    #[test]
    fn base_comes_first_for_rotation_schemes() {
        for &scheme in HarmonyScheme::all() {
            if scheme != HarmonyScheme::Monochromatic {
                assert_eq!(scheme.generate(SLATE)[0], SLATE, "{scheme}");
            }
        }
    }

    #[test]
    fn angle_tables_open_at_zero() {
        for &scheme in HarmonyScheme::all() {
            if scheme != HarmonyScheme::Monochromatic {
                assert_eq!(scheme.angles().first(), Some(&0.0), "{scheme}");
            }
        }
    }

    #[test]
    fn rotations_land_on_the_table_angles() {
        let base = SLATE.to_oklch();
        for &scheme in HarmonyScheme::all() {
            let colors = scheme.generate(SLATE);
            for (color, &angle) in colors.iter().zip(scheme.angles()) {
                let got = color.to_oklch().h;
                let want = (base.h + angle) % 360.0;
                assert!(hue_diff(got, want) < 3.0, "{scheme} {angle}: {got} vs {want}");
            }
        }
    }

    #[test]
    fn rotations_keep_lightness() {
        let base = SLATE.to_oklch();
        for color in HarmonyScheme::Square.generate(SLATE) {
            let l = color.to_oklch().l;
            assert!((l - base.l).abs() < 0.01, "L drifted: {l} vs {}", base.l);
        }
    }

    #[test]
    fn monochromatic_walks_lightness_at_fixed_hue() {
        let colors = HarmonyScheme::Monochromatic.generate(SLATE);
        let base = SLATE.to_oklch();
        for (color, &target) in colors.iter().zip(&MONOCHROMATIC_LIGHTNESS) {
            let lch = color.to_oklch();
            assert!((lch.l - target).abs() < 0.01, "L {} vs {target}", lch.l);
            assert!(hue_diff(lch.h, base.h) < 5.0, "hue {} vs {}", lch.h, base.h);
        }
        // Ascending lightness.
        let ls: Vec<f64> = colors.iter().map(|c| c.to_oklch().l).collect();
        assert!(ls.windows(2).all(|w| w[0] < w[1]), "{ls:?}");
    }

    #[test]
    fn monochromatic_halves_chroma_at_the_light_end() {
        let colors = HarmonyScheme::Monochromatic.generate(SLATE);
        let c_mid = colors[2].to_oklch().c;
        let c_light = colors[4].to_oklch().c;
        assert!(c_light < c_mid * 0.75, "{c_light} vs {c_mid}");
    }

    #[test]
    fn gray_base_yields_grays() {
        let gray = Rgb8::new(128, 128, 128);
        for color in HarmonyScheme::Triadic.generate(gray) {
            assert_eq!(color, gray);
        }
    }

    #[test]
    fn names_roundtrip() {
        for &scheme in HarmonyScheme::all() {
            assert_eq!(HarmonyScheme::from_name(scheme.name()), Ok(scheme));
        }
        assert_eq!("Split_Complementary".parse::<HarmonyScheme>(), Ok(HarmonyScheme::SplitComplementary));
        assert_eq!(
            HarmonyScheme::from_name("golden"),
            Err(ColorError::UnknownScheme("golden".to_string()))
        );
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&HarmonyScheme::DoubleSplitComplementary).unwrap();
        assert_eq!(json, "\"double-split-complementary\"");
    }
}
