//! Palette strategy registry.
//!
//! Every strategy is one variant of the closed [`Strategy`] enum and
//! [`Strategy::generate`] is a single exhaustive match, so adding one is a
//! compile-checked change. Strategies take an optional seed color and an
//! injected [`RandomSource`]; none of them reach for global randomness.
//!
//! ```text
//! Harmony  complementary … monochromatic   → generate_harmony(seed | random base)
//! Random   random, pastel, vivid, …        → draws from the source
//! Shade    shades, tints, tones, gradient  → ramps built from seed | random base
//! ```

use std::fmt;
use std::str::FromStr;

use prism_color::{ColorError, Oklab, Oklch, Rgb8};
use serde::{Deserialize, Serialize};

use crate::harmony::{HarmonyScheme, generate_harmony};
use crate::random::RandomSource;
use crate::shade::{ShadeLevel, shade};

/// Number of colors produced by the random and shade strategies.
pub const PALETTE_SIZE: usize = 5;

/// The golden angle in degrees, 360 / φ².
pub const GOLDEN_ANGLE: f64 = 137.508;

/// Blend fractions used by `tints` and `tones`.
const RAMP_STEPS: [f64; PALETTE_SIZE] = [0.0, 0.2, 0.4, 0.6, 0.8];

/// UI grouping of strategies. Carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Harmony,
    Random,
    Shade,
}

impl Category {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Harmony => "harmony",
            Self::Random => "random",
            Self::Shade => "shade",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Harmony, Self::Random, Self::Shade]
    }

    /// Strategies in this category, in catalogue order.
    pub fn strategies(self) -> impl Iterator<Item = Strategy> {
        Strategy::all().iter().copied().filter(move |s| s.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named palette generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    // ── Harmony ───────────────────────────────────────────────
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
    Square,
    Monochromatic,

    // ── Random ────────────────────────────────────────────────
    Random,
    Pastel,
    Vivid,
    GoldenRatio,
    RandomHarmony,

    // ── Shade ─────────────────────────────────────────────────
    Shades,
    Tints,
    Tones,
    Gradient,
}

impl Strategy {
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Complementary
            | Self::Analogous
            | Self::Triadic
            | Self::SplitComplementary
            | Self::Tetradic
            | Self::Square
            | Self::Monochromatic => Category::Harmony,
            Self::Random | Self::Pastel | Self::Vivid | Self::GoldenRatio | Self::RandomHarmony => {
                Category::Random
            }
            Self::Shades | Self::Tints | Self::Tones | Self::Gradient => Category::Shade,
        }
    }

    /// The harmony scheme a harmony strategy delegates to.
    #[must_use]
    pub const fn harmony_scheme(self) -> Option<HarmonyScheme> {
        match self {
            Self::Complementary => Some(HarmonyScheme::Complementary),
            Self::Analogous => Some(HarmonyScheme::Analogous),
            Self::Triadic => Some(HarmonyScheme::Triadic),
            Self::SplitComplementary => Some(HarmonyScheme::SplitComplementary),
            Self::Tetradic => Some(HarmonyScheme::Tetradic),
            Self::Square => Some(HarmonyScheme::Square),
            Self::Monochromatic => Some(HarmonyScheme::Monochromatic),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Tetradic => "tetradic",
            Self::Square => "square",
            Self::Monochromatic => "monochromatic",
            Self::Random => "random",
            Self::Pastel => "pastel",
            Self::Vivid => "vivid",
            Self::GoldenRatio => "golden-ratio",
            Self::RandomHarmony => "random-harmony",
            Self::Shades => "shades",
            Self::Tints => "tints",
            Self::Tones => "tones",
            Self::Gradient => "gradient",
        }
    }

    /// One-line description for listings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Complementary => "base and its opposite hue",
            Self::Analogous => "base and its 30° neighbours",
            Self::Triadic => "three hues 120° apart",
            Self::SplitComplementary => "base and the two hues flanking its complement",
            Self::Tetradic => "two complementary pairs 60° apart",
            Self::Square => "four hues 90° apart",
            Self::Monochromatic => "one hue at five lightness levels",
            Self::Random => "five uniformly random colors",
            Self::Pastel => "five light, muted colors",
            Self::Vivid => "five saturated mid-lightness colors",
            Self::GoldenRatio => "hues stepped by the golden angle",
            Self::RandomHarmony => "a randomly chosen harmony scheme",
            Self::Shades => "levels 100 to 900 of the shade ramp",
            Self::Tints => "base blended toward white",
            Self::Tones => "base blended toward gray",
            Self::Gradient => "base blended toward its complement",
        }
    }

    /// Parse a strategy from its name (case-insensitive; `_` and spaces
    /// accepted in place of `-`).
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownStrategy`] for names outside the registry.
    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        let wanted = crate::normalize_name(name);
        Self::all()
            .iter()
            .find(|s| s.name() == wanted)
            .copied()
            .ok_or_else(|| ColorError::UnknownStrategy(name.to_string()))
    }

    /// All strategies, grouped by category.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary, Self::Analogous, Self::Triadic, Self::SplitComplementary,
            Self::Tetradic, Self::Square, Self::Monochromatic,
            Self::Random, Self::Pastel, Self::Vivid, Self::GoldenRatio, Self::RandomHarmony,
            Self::Shades, Self::Tints, Self::Tones, Self::Gradient,
        ]
    }

    /// Generate this strategy's palette.
    ///
    /// `seed` anchors the palette where the strategy uses one; strategies
    /// that need a base and get no seed draw it from `rng`. `random`,
    /// `pastel` and `vivid` ignore the seed.
    pub fn generate(self, seed: Option<Rgb8>, rng: &mut dyn RandomSource) -> Vec<Rgb8> {
        tracing::debug!(strategy = self.name(), seeded = seed.is_some(), "generating palette");

        match self {
            Self::Complementary => seeded_harmony(seed, rng, HarmonyScheme::Complementary),
            Self::Analogous => seeded_harmony(seed, rng, HarmonyScheme::Analogous),
            Self::Triadic => seeded_harmony(seed, rng, HarmonyScheme::Triadic),
            Self::SplitComplementary => seeded_harmony(seed, rng, HarmonyScheme::SplitComplementary),
            Self::Tetradic => seeded_harmony(seed, rng, HarmonyScheme::Tetradic),
            Self::Square => seeded_harmony(seed, rng, HarmonyScheme::Square),
            Self::Monochromatic => seeded_harmony(seed, rng, HarmonyScheme::Monochromatic),

            Self::Random => (0..PALETTE_SIZE).map(|_| random_color(rng)).collect(),
            Self::Pastel => random_lch(rng, (0.86, 0.93), (0.04, 0.08)),
            Self::Vivid => random_lch(rng, (0.62, 0.75), (0.14, 0.20)),
            Self::GoldenRatio => {
                let start = seed.map_or_else(
                    || Oklch::new(0.7, 0.12, rng.range(0.0, 360.0)),
                    Rgb8::to_oklch,
                );
                (0..PALETTE_SIZE)
                    .map(|i| start.rotate(GOLDEN_ANGLE * i as f64).to_rgb8())
                    .collect()
            }
            Self::RandomHarmony => {
                let schemes: Vec<HarmonyScheme> = HarmonyScheme::all()
                    .iter()
                    .copied()
                    .filter(|&s| s != HarmonyScheme::Monochromatic)
                    .collect();
                let scheme = schemes[rng.index(schemes.len())];
                let base = seed.unwrap_or_else(|| random_color(rng));
                tracing::debug!(scheme = scheme.name(), "picked harmony");
                generate_harmony(base, scheme)
            }

            Self::Shades => {
                let base = seed.unwrap_or_else(|| random_color(rng));
                [ShadeLevel::S100, ShadeLevel::S300, ShadeLevel::S500, ShadeLevel::S700, ShadeLevel::S900]
                    .iter()
                    .map(|&level| shade(base, level).color)
                    .collect()
            }
            Self::Tints => {
                let base = seed.unwrap_or_else(|| random_color(rng));
                ramp_toward(base, Rgb8::WHITE.to_oklab())
            }
            Self::Tones => {
                let base = seed.unwrap_or_else(|| random_color(rng));
                let gray = Oklab::new(base.to_oklch().l, 0.0, 0.0);
                ramp_toward(base, gray)
            }
            Self::Gradient => {
                let base = seed.unwrap_or_else(|| random_color(rng));
                let from = base.to_oklab();
                let to = base.to_oklch().rotate(180.0).to_oklab();
                let last = (PALETTE_SIZE - 1) as f64;
                (0..PALETTE_SIZE)
                    .map(|i| from.lerp(to, i as f64 / last).to_rgb8())
                    .collect()
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A uniformly random 8-bit color.
fn random_color(rng: &mut dyn RandomSource) -> Rgb8 {
    let [r, g, b, _] = rng.next_u32().to_le_bytes();
    Rgb8::new(r, g, b)
}

/// `PALETTE_SIZE` colors with random hue and lightness/chroma drawn from
/// the given ranges.
fn seeded_harmony(seed: Option<Rgb8>, rng: &mut dyn RandomSource, scheme: HarmonyScheme) -> Vec<Rgb8> {
    let base = seed.unwrap_or_else(|| random_color(rng));
    generate_harmony(base, scheme)
}

fn random_lch(rng: &mut dyn RandomSource, l: (f64, f64), c: (f64, f64)) -> Vec<Rgb8> {
    (0..PALETTE_SIZE)
        .map(|_| {
            let h = rng.range(0.0, 360.0);
            let l = rng.range(l.0, l.1);
            let c = rng.range(c.0, c.1);
            Oklch::new(l, c, h).to_rgb8()
        })
        .collect()
}

/// Blend `base` toward `target` in OKLab at each of [`RAMP_STEPS`].
fn ramp_toward(base: Rgb8, target: Oklab) -> Vec<Rgb8> {
    let from = base.to_oklab();
    // RAMP_STEPS opens at 0, which is `base` itself.
    std::iter::once(base)
        .chain(RAMP_STEPS.iter().skip(1).map(|&t| from.lerp(target, t).to_rgb8()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
