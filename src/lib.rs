//! Colour contrast evaluation and enhancement library.
//!
//! - [`color`]: hex parsing, compositing and HSL conversion
//! - [`contrast`]: WCAG luminance and ratio, contrast ranges, display colours
//! - [`scorer`]: the scoring seam shared by WCAG and an external APCA oracle
//! - [`enhance`]: the search that pushes a pair over a standard's thresholds

pub mod color;
pub mod contrast;
pub mod enhance;
pub mod error;
pub mod logs;
pub mod scorer;

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Serialize;

use color::{hex_to_rgb, rgba_to_hex};
use contrast::{
    ContrastRange, ContrastStandard, PassLevels, contrast_range, display_color, wcag_contrast,
};
use enhance::{ColorPair, EnhancementTarget, enhance};
use scorer::WcagScorer;

/// WCAG evaluation of a background/foreground pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Background as given, normalised to hex
    pub background: String,
    /// Foreground as given, normalised to hex
    pub foreground: String,
    /// WCAG contrast ratio
    pub ratio: f64,
    /// Pass/fail flags for `ratio`
    pub passes: PassLevels,
    /// Contrast envelope, present when the background is translucent
    pub range: Option<ContrastRange>,
    /// Colour to draw chrome with over the background
    pub display_color: String,
    /// Result of the enhancement search, when requested
    pub enhanced: Option<Enhanced>,
}

/// Outcome of the enhancement search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enhanced {
    /// Adjusted background
    pub background: String,
    /// Adjusted foreground
    pub foreground: String,
    /// WCAG contrast ratio of the adjusted pair
    pub ratio: f64,
}

/// Evaluate two hex colours and optionally enhance them.
///
/// This function orchestrates the entire process:
/// 1. Parse both colours strictly
/// 2. Compute the WCAG ratio and its pass/fail flags
/// 3. Estimate the contrast range for translucent backgrounds
/// 4. Pick the display colour
/// 5. Run the enhancement search when `target` is given
///
/// # Errors
///
/// Returns an error if:
/// - Either colour is not a 6 or 8 digit hex string
/// - Enhancement is requested for a pair that is not fully opaque
pub fn analyze(
    background: &str,
    foreground: &str,
    target: Option<EnhancementTarget>,
) -> Result<Report> {
    let bg = hex_to_rgb(background).context("Failed to parse background color")?;
    let fg = hex_to_rgb(foreground).context("Failed to parse foreground color")?;
    debug!("bg={bg:?} fg={fg:?}");

    let ratio = wcag_contrast(bg, fg, None);
    debug!("ratio={ratio}");

    let enhanced = match target {
        Some(target) => {
            if !bg.is_opaque() || !fg.is_opaque() {
                bail!("Enhancement only applies to fully opaque colors");
            }
            let pair = enhance(ColorPair::new(bg, fg), target, &WcagScorer);
            debug!("enhanced={pair:?}");
            Some(Enhanced {
                background: rgba_to_hex(pair.background),
                foreground: rgba_to_hex(pair.foreground),
                ratio: wcag_contrast(pair.background, pair.foreground, None),
            })
        }
        None => None,
    };

    Ok(Report {
        background: rgba_to_hex(bg),
        foreground: rgba_to_hex(fg),
        ratio,
        passes: PassLevels::evaluate(ContrastStandard::Wcag, ratio),
        range: contrast_range(bg, fg, &WcagScorer),
        display_color: display_color(bg, fg),
        enhanced,
    })
}
