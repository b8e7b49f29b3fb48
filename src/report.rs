// SPDX-License-Identifier: MIT
//
// Command results and their text/JSON rendering.
//
// Every command produces one `Report`. Text output puts one color (or one
// labelled field) per line; JSON output is a single document.

use std::fmt::{self, Write as _};

use prism_color::Rgb8;
use prism_palette::{Category, ContrastResult, Deficiency, HarmonyScheme, Shade, Strategy};
use serde::Serialize;

use crate::config::OutputFormat;

/// Every representation `convert` prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub hex: Rgb8,
    pub rgb: [u8; 3],
    pub hsl: [f64; 3],
    pub linear: [f64; 3],
    pub oklab: [f64; 3],
    pub oklch: [f64; 3],
}

impl Conversion {
    #[must_use]
    pub fn of(color: Rgb8) -> Self {
        let hsl = color.to_hsl();
        let lin = color.to_linear();
        let lab = color.to_oklab();
        let lch = color.to_oklch();
        Self {
            hex: color,
            rgb: color.into(),
            hsl: [hsl.h, hsl.s, hsl.l],
            linear: [lin.r, lin.g, lin.b],
            oklab: [lab.l, lab.a, lab.b],
            oklch: [lch.l, lch.c, lch.h],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyEntry {
    pub name: Strategy,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    pub category: Category,
    pub strategies: Vec<StrategyEntry>,
}

impl CategoryListing {
    /// The full registry, grouped by category.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Category::all()
            .iter()
            .map(|&category| Self {
                category,
                strategies: category
                    .strategies()
                    .map(|s| StrategyEntry { name: s, description: s.description() })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Simulated {
    pub deficiency: Deficiency,
    pub color: Rgb8,
}

/// Result of `fix`: the corrected color and whether it reached the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixOutcome {
    pub color: Rgb8,
    pub ratio: f64,
    pub target: f64,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Colors { colors: Vec<Rgb8> },
    Harmony { scheme: HarmonyScheme, colors: Vec<Rgb8> },
    Palette { strategy: Strategy, seed: Option<u32>, colors: Vec<Rgb8> },
    Convert(Conversion),
    Shades { shades: Vec<Shade> },
    Strategies { categories: Vec<CategoryListing> },
    Simulation { simulations: Vec<Simulated> },
    Contrast(ContrastResult),
    Fix(FixOutcome),
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_string(),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                out
            }
        })
    }
}

fn pass(ok: bool) -> &'static str {
    if ok { "pass" } else { "fail" }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        match self {
            Self::Colors { colors }
            | Self::Harmony { colors, .. }
            | Self::Palette { colors, .. } => {
                for c in colors {
                    writeln!(out, "{c}")?;
                }
            }
            Self::Convert(conv) => {
                let [r, g, b] = conv.rgb;
                let [h, s, l] = conv.hsl;
                let [lr, lg, lb] = conv.linear;
                let [ol, oa, ob] = conv.oklab;
                let [cl, cc, ch] = conv.oklch;
                writeln!(out, "hex     {}", conv.hex)?;
                writeln!(out, "rgb     rgb({r}, {g}, {b})")?;
                writeln!(out, "hsl     hsl({h:.1} {:.1}% {:.1}%)", s * 100.0, l * 100.0)?;
                writeln!(out, "linear  {lr:.4} {lg:.4} {lb:.4}")?;
                writeln!(out, "oklab   oklab({ol:.4} {oa:.4} {ob:.4})")?;
                writeln!(out, "oklch   oklch({:.2}% {cc:.4} {ch:.2})", cl * 100.0)?;
            }
            Self::Shades { shades } => {
                for s in shades {
                    writeln!(out, "{:<4} {}", s.level.value(), s.color)?;
                }
            }
            Self::Strategies { categories } => {
                for listing in categories {
                    writeln!(out, "{}", listing.category)?;
                    for entry in &listing.strategies {
                        writeln!(out, "  {:<20} {}", entry.name.name(), entry.description)?;
                    }
                }
            }
            Self::Simulation { simulations } => {
                for sim in simulations {
                    writeln!(out, "{:<14} {}", sim.deficiency.name(), sim.color)?;
                }
            }
            Self::Contrast(result) => {
                writeln!(out, "ratio       {:.2}:1", result.ratio)?;
                writeln!(out, "AA normal   {}", pass(result.aa_normal()))?;
                writeln!(out, "AA large    {}", pass(result.aa_large()))?;
                writeln!(out, "AAA normal  {}", pass(result.aaa_normal()))?;
                writeln!(out, "AAA large   {}", pass(result.aaa_large()))?;
            }
            Self::Fix(fix) => {
                writeln!(out, "{}", fix.color)?;
                let verdict = if fix.met { "met" } else { "not met" };
                writeln!(out, "ratio {:.2}:1 (target {:.2}, {verdict})", fix.ratio, fix.target)?;
            }
        }
        f.write_str(&out)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prism_palette::classify;

    const BLUE: Rgb8 = Rgb8::new(0x3b, 0x82, 0xf6);

    #[test]
    fn colors_one_per_line() {
        let report = Report::Colors { colors: vec![BLUE, Rgb8::WHITE] };
        assert_eq!(report.render(OutputFormat::Text).unwrap(), "#3b82f6\n#ffffff\n");
    }

    #[test]
    fn colors_as_json() {
        let report = Report::Harmony { scheme: HarmonyScheme::Complementary, colors: vec![BLUE] };
        let value: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "scheme": "complementary", "colors": ["#3b82f6"] }));
    }

    #[test]
    fn convert_text_lists_every_space() {
        let text = Report::Convert(Conversion::of(BLUE)).to_string();
        let labels: Vec<&str> = text.lines().filter_map(|l| l.split_whitespace().next()).collect();
        assert_eq!(labels, vec!["hex", "rgb", "hsl", "linear", "oklab", "oklch"]);
        assert!(text.contains("rgb(59, 130, 246)"));
    }

    #[test]
    fn contrast_text() {
        let text = Report::Contrast(classify(5.0)).to_string();
        assert_eq!(
            text,
            "ratio       5.00:1\nAA normal   pass\nAA large    pass\nAAA normal  fail\nAAA large   pass\n"
        );
    }

    #[test]
    fn fix_reports_verdict() {
        let report = Report::Fix(FixOutcome { color: Rgb8::BLACK, ratio: 4.48, target: 15.0, met: false });
        assert_eq!(report.to_string(), "#000000\nratio 4.48:1 (target 15.00, not met)\n");
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["met"], serde_json::json!(false));
        assert_eq!(json["color"], serde_json::json!("#000000"));
    }

    #[test]
    fn strategies_grouped_by_category() {
        let listing = CategoryListing::all();
        assert_eq!(listing.len(), 3);
        let total: usize = listing.iter().map(|l| l.strategies.len()).sum();
        assert_eq!(total, Strategy::all().len());
        let text = Report::Strategies { categories: listing }.to_string();
        assert!(text.starts_with("harmony\n  complementary"));
    }

    #[test]
    fn shades_json_uses_token_levels() {
        let report = Report::Shades { shades: prism_palette::generate_shades(BLUE) };
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["shades"][0]["level"], serde_json::json!(50));
        assert_eq!(json["shades"].as_array().map(Vec::len), Some(11));
    }
}
