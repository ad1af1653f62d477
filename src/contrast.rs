//! Contrast computation.
//!
//! This module provides functions for:
//! - Calculating relative luminance (WCAG 2.x)
//! - Calculating the WCAG contrast ratio, compositing translucent text first
//! - Estimating the contrast envelope of a translucent background
//! - Picking a legible colour for UI chrome drawn over a user colour
//! - Turning a score into pass/fail flags for a standard

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba, blend_colors, rgba_to_hex};
use crate::scorer::ContrastScorer;

/// Minimum WCAG ratio at which a colour is used as-is by [`display_color`].
pub const DISPLAY_THRESHOLD: f64 = 3.0;

/// Which contrast metric, and which thresholds, are in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastStandard {
    /// WCAG 2.x contrast ratio (1 to 21)
    #[default]
    Wcag,
    /// APCA lightness contrast (signed Lc score)
    Apca,
}

impl ContrastStandard {
    /// Score at which the search stops improving a colour (WCAG AAA, APCA Lc 75).
    #[must_use]
    pub fn full_pass(self) -> f64 {
        match self {
            Self::Wcag => 7.0,
            Self::Apca => 75.0,
        }
    }

    /// Score below which the search keeps going and, at last, falls back to
    /// black or white (WCAG AA, APCA Lc 60).
    #[must_use]
    pub fn minimum_pass(self) -> f64 {
        match self {
            Self::Wcag => 4.5,
            Self::Apca => 60.0,
        }
    }

    /// Score for large text and non-text elements (WCAG AA large, APCA Lc 45).
    #[must_use]
    pub fn large_text_pass(self) -> f64 {
        match self {
            Self::Wcag => 3.0,
            Self::Apca => 45.0,
        }
    }
}

/// Contrast envelope of a translucent background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastRange {
    /// Worst case
    pub min: f64,
    /// Best case
    pub max: f64,
}

/// Pass/fail flags for a score under one standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassLevels {
    /// Meets [`ContrastStandard::full_pass`]
    pub enhanced: bool,
    /// Meets [`ContrastStandard::minimum_pass`]
    pub minimum: bool,
    /// Meets [`ContrastStandard::large_text_pass`]
    pub large_text: bool,
}

impl PassLevels {
    /// Compare the magnitude of `score` against each threshold of `standard`.
    #[must_use]
    pub fn evaluate(standard: ContrastStandard, score: f64) -> Self {
        let magnitude = score.abs();
        Self {
            enhanced: magnitude >= standard.full_pass(),
            minimum: magnitude >= standard.minimum_pass(),
            large_text: magnitude >= standard.large_text_pass(),
        }
    }
}

/// Calculate relative luminance of RGB color using the WCAG 2.x formula.
///
/// Each channel is linearised with the WCAG cut-off (`0.03928`), then the
/// linear channels are weighted.
///
/// # Arguments
///
/// * `rgb` - RGB struct with values 0-255
///
/// # Returns
///
/// Relative luminance value between 0.0 (black) and 1.0 (white)
///
/// # Formula
///
/// L = 0.2126 × R + 0.7152 × G + 0.0722 × B
///
/// Where R, G, B are the linearized RGB values.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    // Convert sRGB component to linear RGB
    let lin = |c: f64| -> f64 {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// Calculate the WCAG contrast ratio of `fg` drawn over `bg`.
///
/// `fg` is first composited over `solid_bg` when given, over `bg` otherwise;
/// the ratio is then taken between that composited colour and the chosen
/// background (its own alpha is ignored).
///
/// # Returns
///
/// A ratio between 1.0 and 21.0, rounded to two decimals. Use
/// [`format_score`] to render it.
#[must_use]
pub fn wcag_contrast(bg: Rgba, fg: Rgba, solid_bg: Option<Rgba>) -> f64 {
    let base = solid_bg.unwrap_or(bg);
    let text = blend_colors(fg, base);

    let l1 = relative_luminance(text.to_rgb());
    let l2 = relative_luminance(base.to_rgb());
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };

    round2((lighter + 0.05) / (darker + 0.05))
}

/// Render a score with two decimals, or as `"1"` when it is exactly 1.
///
/// # Examples
///
/// ```
/// # use contrast::contrast::format_score;
/// assert_eq!(format_score(1.0), "1");
/// assert_eq!(format_score(4.5), "4.50");
/// assert_eq!(format_score(21.0), "21.00");
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_score(value: f64) -> String {
    if value == 1.0 {
        "1".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Estimate the contrast envelope of text over a translucent background.
///
/// The background is composited over opaque black and over opaque white, the
/// text is composited over each result, and both pairs are scored.
///
/// # Returns
///
/// - `Some(range)` with both bounds rounded to two decimals
/// - `None` when `bg` is opaque, since there is nothing behind it to vary
#[must_use]
pub fn contrast_range(bg: Rgba, fg: Rgba, scorer: &impl ContrastScorer) -> Option<ContrastRange> {
    if bg.is_opaque() {
        return None;
    }

    let score_over = |canvas: Rgba| {
        let solid = blend_colors(bg, canvas);
        let text = blend_colors(fg, solid);
        scorer.score(solid.to_rgb(), text.to_rgb())
    };
    let over_black = score_over(Rgba::BLACK);
    let over_white = score_over(Rgba::WHITE);
    debug!("contrast range: over black={over_black} over white={over_white}");

    Some(ContrastRange {
        min: round2(over_black.min(over_white)),
        max: round2(over_black.max(over_white)),
    })
}

/// Choose a colour that is always legible over `bg`.
///
/// `fg` itself is returned when its WCAG ratio against `bg` reaches
/// [`DISPLAY_THRESHOLD`]; otherwise black or white, whichever contrasts
/// more (black on a tie).
///
/// # Returns
///
/// A hex string as produced by [`rgba_to_hex`].
#[must_use]
pub fn display_color(bg: Rgba, fg: Rgba) -> String {
    if wcag_contrast(bg, fg, None) >= DISPLAY_THRESHOLD {
        return rgba_to_hex(fg);
    }

    let on_black = wcag_contrast(bg, Rgba::BLACK, None);
    let on_white = wcag_contrast(bg, Rgba::WHITE, None);
    if on_white > on_black {
        rgba_to_hex(Rgba::WHITE)
    } else {
        rgba_to_hex(Rgba::BLACK)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
