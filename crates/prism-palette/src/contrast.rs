//! WCAG contrast analysis and correction.
//!
//! Luminance and ratio follow WCAG 2.x exactly (including its 0.03928
//! linearisation threshold). Correction walks HSL lightness one integer
//! percent at a time with hue and saturation held fixed, starting from the
//! color's own lightness and moving away from the reference, so the first
//! passing step is also the closest one.

use std::cmp::Ordering;

use prism_color::{ColorError, Hsl, Rgb8};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// WCAG AA, normal text.
pub const AA_NORMAL: f64 = 4.5;
/// WCAG AA, large text.
pub const AA_LARGE: f64 = 3.0;
/// WCAG AAA, normal text.
pub const AAA_NORMAL: f64 = 7.0;
/// WCAG AAA, large text.
pub const AAA_LARGE: f64 = 4.5;

/// Smallest and largest possible contrast ratios.
pub const MIN_RATIO: f64 = 1.0;
pub const MAX_RATIO: f64 = 21.0;

/// Linearise one 8-bit channel the WCAG way.
fn channel_luminance(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.039_28 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// WCAG 2.x relative luminance, in [0, 1].
#[must_use]
pub fn relative_luminance(color: Rgb8) -> f64 {
    let r = channel_luminance(color.r);
    let g = channel_luminance(color.g);
    let b = channel_luminance(color.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// WCAG contrast ratio, in [1, 21]. Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb8, b: Rgb8) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

bitflags::bitflags! {
    /// Which WCAG levels a ratio satisfies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Compliance: u8 {
        const AA_NORMAL  = 0b0001;
        const AA_LARGE   = 0b0010;
        const AAA_NORMAL = 0b0100;
        const AAA_LARGE  = 0b1000;
    }
}

/// A contrast ratio and the levels it passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResult {
    pub ratio: f64,
    pub passes: Compliance,
}

impl ContrastResult {
    #[must_use]
    pub fn aa_normal(&self) -> bool {
        self.passes.contains(Compliance::AA_NORMAL)
    }

    #[must_use]
    pub fn aa_large(&self) -> bool {
        self.passes.contains(Compliance::AA_LARGE)
    }

    #[must_use]
    pub fn aaa_normal(&self) -> bool {
        self.passes.contains(Compliance::AAA_NORMAL)
    }

    #[must_use]
    pub fn aaa_large(&self) -> bool {
        self.passes.contains(Compliance::AAA_LARGE)
    }
}

impl Serialize for ContrastResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ContrastResult", 5)?;
        s.serialize_field("ratio", &self.ratio)?;
        s.serialize_field("aa_normal", &self.aa_normal())?;
        s.serialize_field("aa_large", &self.aa_large())?;
        s.serialize_field("aaa_normal", &self.aaa_normal())?;
        s.serialize_field("aaa_large", &self.aaa_large())?;
        s.end()
    }
}

/// Classify a ratio against the four WCAG thresholds.
#[must_use]
pub fn classify(ratio: f64) -> ContrastResult {
    let mut passes = Compliance::empty();
    passes.set(Compliance::AA_NORMAL, ratio >= AA_NORMAL);
    passes.set(Compliance::AA_LARGE, ratio >= AA_LARGE);
    passes.set(Compliance::AAA_NORMAL, ratio >= AAA_NORMAL);
    passes.set(Compliance::AAA_LARGE, ratio >= AAA_LARGE);
    ContrastResult { ratio, passes }
}

/// Ratio and classification for a color pair.
#[must_use]
pub fn analyze(a: Rgb8, b: Rgb8) -> ContrastResult {
    classify(contrast_ratio(a, b))
}

/// Adjust `to_fix`'s HSL lightness until it reaches `target_ratio` against
/// `reference`.
///
/// Returns `to_fix` unchanged if it already passes. Otherwise scans integer
/// lightness from the color's own value toward 100 (if it is lighter than
/// `reference`) or toward 0 (if darker) and returns the first passing step.
/// When no step passes, the highest-ratio step seen is returned; callers
/// must re-check the ratio.
///
/// # Errors
///
/// [`ColorError::InvalidRatio`] if `target_ratio` is not a finite value in
/// [1, 21].
pub fn fix_contrast(to_fix: Rgb8, reference: Rgb8, target_ratio: f64) -> Result<Rgb8, ColorError> {
    if !target_ratio.is_finite() || !(MIN_RATIO..=MAX_RATIO).contains(&target_ratio) {
        return Err(ColorError::InvalidRatio(target_ratio));
    }

    let initial = contrast_ratio(to_fix, reference);
    if initial >= target_ratio {
        return Ok(to_fix);
    }

    // Equal luminance: head for whichever extreme contrasts more.
    let lighten = match relative_luminance(to_fix).partial_cmp(&relative_luminance(reference)) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Less) => false,
        _ => suggest_text_color(reference) == Rgb8::WHITE,
    };

    let hsl = to_fix.to_hsl();
    #[allow(clippy::cast_possible_truncation)]
    let start = (hsl.l * 100.0).round() as i32;
    let (direction, remaining) = if lighten { (1, 100 - start) } else { (-1, start) };

    let mut best = (to_fix, initial);
    let mut scanned = 0u32;
    for offset in 0..=remaining {
        scanned += 1;
        let step = start + direction * offset;
        let candidate = Hsl::new(hsl.h, hsl.s, f64::from(step) / 100.0).to_rgb8();
        let ratio = contrast_ratio(candidate, reference);
        if ratio >= target_ratio {
            tracing::debug!(lighten, scanned, ratio, "contrast target met");
            return Ok(candidate);
        }
        if ratio > best.1 {
            best = (candidate, ratio);
        }
    }

    tracing::debug!(lighten, scanned, best_ratio = best.1, target_ratio, "contrast target unreachable");
    Ok(best.0)
}

/// Black or white, whichever contrasts more with `background` (ties go to
/// black).
#[must_use]
pub fn suggest_text_color(background: Rgb8) -> Rgb8 {
    if contrast_ratio(Rgb8::WHITE, background) > contrast_ratio(Rgb8::BLACK, background) {
        Rgb8::WHITE
    } else {
        Rgb8::BLACK
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
