// SPDX-License-Identifier: MIT
//
// Optional TOML configuration for the `prism` binary.
//
// Every field has a default, so an absent file and an empty file behave
// the same. Command-line flags override whatever the file sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, ensure};
use clap::ValueEnum;
use prism_color::BlendSpace;
use prism_palette::HarmonyScheme;
use serde::{Deserialize, Serialize};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One color or field per line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scheme used by `harmony` when `--scheme` is not given.
    pub scheme: HarmonyScheme,
    /// Ratio `fix` aims for when `--target` is not given.
    pub contrast_target: f64,
    /// Space used by `blend` and `gradient`.
    pub blend_space: BlendSpace,
    /// Sample count for `gradient`.
    pub gradient_steps: usize,
    pub format: OutputFormat,
    /// Fixed seed for randomised palette strategies.
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: HarmonyScheme::Complementary,
            contrast_target: 4.5,
            blend_space: BlendSpace::Oklab,
            gradient_steps: 5,
            format: OutputFormat::Text,
            seed: None,
        }
    }
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.contrast_target.is_finite() && (1.0..=21.0).contains(&self.contrast_target),
            "contrast_target must be between 1 and 21, got {}",
            self.contrast_target
        );
        ensure!(self.gradient_steps >= 1, "gradient_steps must be at least 1");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
