// SPDX-License-Identifier: MIT
//
// Command-line surface: argument parsing and dispatch to the engine.
//
// Each subcommand maps onto one engine operation and yields a `Report`.
// Engine failures come back as `ColorError` so `main` can tell malformed
// input apart from I/O and configuration problems.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use prism_color::{Anchor, BlendSpace, ColorError, Gradient, Rgb8, weighted_blend};
use prism_palette::{
    Deficiency, HarmonyScheme, Strategy, Xorshift32, analyze, contrast_ratio, fix_contrast,
    generate_harmony, generate_shades, simulate,
};

use crate::config::{Config, OutputFormat};
use crate::report::{CategoryListing, Conversion, FixOutcome, Report, Simulated};

/// Perceptual color toolkit: conversion, blending, harmonies, shades,
/// palettes, vision simulation and WCAG contrast.
#[derive(Debug, Parser)]
#[command(name = "prism", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "PRISM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file).
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log filter used when PRISM_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a color in every supported representation.
    Convert { color: Rgb8 },

    /// Interpolate between two colors.
    Blend {
        a: Rgb8,
        b: Rgb8,
        /// Fraction from A (0) to B (1); values outside extrapolate.
        #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
        t: f64,
        #[arg(long)]
        space: Option<BlendSpace>,
    },

    /// Sample an inverse-distance-weighted color field.
    Mesh {
        /// Anchor as `x,y,hex`; repeat for each anchor.
        #[arg(
            long = "anchor",
            short = 'a',
            required = true,
            allow_hyphen_values = true,
            value_parser = parse_anchor
        )]
        anchors: Vec<Anchor>,
        /// Query position as `x,y`.
        #[arg(long, allow_hyphen_values = true)]
        at: Point,
    },

    /// Evenly spaced samples of a multi-stop gradient.
    Gradient {
        #[arg(required = true)]
        colors: Vec<Rgb8>,
        #[arg(long)]
        steps: Option<usize>,
        #[arg(long)]
        space: Option<BlendSpace>,
    },

    /// Hue-rotation harmony around a base color.
    Harmony {
        color: Rgb8,
        #[arg(long)]
        scheme: Option<HarmonyScheme>,
    },

    /// The 50…950 shade ramp of a color.
    Shades { color: Rgb8 },

    /// Run a palette strategy.
    Palette {
        strategy: Strategy,
        color: Option<Rgb8>,
        /// Seed for randomised strategies.
        #[arg(long)]
        seed: Option<u32>,
    },

    /// List palette strategies by category.
    Strategies,

    /// Simulate color-vision deficiencies.
    Simulate {
        color: Rgb8,
        #[arg(long = "type", conflicts_with = "all")]
        deficiency: Option<Deficiency>,
        /// Every deficiency (the default when --type is absent).
        #[arg(long)]
        all: bool,
    },

    /// WCAG contrast between two colors.
    Contrast { fg: Rgb8, bg: Rgb8 },

    /// Adjust FG's lightness until it reaches the target ratio against BG.
    Fix {
        fg: Rgb8,
        bg: Rgb8,
        #[arg(long)]
        target: Option<f64>,
    },
}

/// A query position, written `x,y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y, got {s:?}"))?;
        let coord = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
        Ok(Self { x: coord(x)?, y: coord(y)? })
    }
}

fn parse_anchor(s: &str) -> Result<Anchor, String> {
    let (pos, color) = s.rsplit_once(',').ok_or_else(|| format!("expected x,y,hex, got {s:?}"))?;
    let Point { x, y } = pos.parse()?;
    let color = color.trim().parse::<Rgb8>().map_err(|e| e.to_string())?;
    Ok(Anchor::new(x, y, color))
}

/// Seed for randomised strategies when neither flag nor config fixes one.
fn entropy_seed() -> u32 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    #[allow(clippy::cast_possible_truncation)]
    let secs = now.as_secs() as u32;
    secs ^ now.subsec_nanos()
}

impl Command {
    /// Run the command against the engine.
    pub fn execute(&self, config: &Config) -> Result<Report, ColorError> {
        Ok(match self {
            Self::Convert { color } => Report::Convert(Conversion::of(*color)),

            Self::Blend { a, b, t, space } => {
                let space = space.unwrap_or(config.blend_space);
                Report::Colors { colors: vec![space.lerp(*a, *b, *t)?] }
            }

            Self::Mesh { anchors, at } => {
                Report::Colors { colors: vec![weighted_blend(anchors, at.x, at.y)?] }
            }

            Self::Gradient { colors, steps, space } => {
                let gradient =
                    Gradient::evenly_spaced(colors, space.unwrap_or(config.blend_space))?;
                Report::Colors { colors: gradient.steps(steps.unwrap_or(config.gradient_steps))? }
            }

            Self::Harmony { color, scheme } => {
                let scheme = scheme.unwrap_or(config.scheme);
                Report::Harmony { scheme, colors: generate_harmony(*color, scheme) }
            }

            Self::Shades { color } => Report::Shades { shades: generate_shades(*color) },

            Self::Palette { strategy, color, seed } => {
                let seed = seed.or(config.seed).unwrap_or_else(entropy_seed);
                tracing::debug!(seed, "palette seed");
                let colors = strategy.generate(*color, &mut Xorshift32::new(seed));
                Report::Palette { strategy: *strategy, seed: Some(seed), colors }
            }

            Self::Strategies => Report::Strategies { categories: CategoryListing::all() },

            Self::Simulate { color, deficiency, all } => {
                let list = match deficiency {
                    Some(d) if !*all => vec![*d],
                    _ => Deficiency::all().to_vec(),
                };
                let simulations = list
                    .into_iter()
                    .map(|deficiency| Simulated { deficiency, color: simulate(*color, deficiency) })
                    .collect();
                Report::Simulation { simulations }
            }

            Self::Contrast { fg, bg } => Report::Contrast(analyze(*fg, *bg)),

            Self::Fix { fg, bg, target } => {
                let target = target.unwrap_or(config.contrast_target);
                let color = fix_contrast(*fg, *bg, target)?;
                let ratio = contrast_ratio(color, *bg);
                Report::Fix(FixOutcome { color, ratio, target, met: ratio >= target })
            }
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
