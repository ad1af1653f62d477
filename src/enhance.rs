//! Automatic contrast enhancement.
//!
//! The search nudges one or both colours of a pair until the pair meets the
//! thresholds of the scorer's standard:
//!
//! 1. Lightness: step away from the starting lightness in both directions,
//!    keeping the first strictly better candidate, until the full pass
//!    threshold is reached or 100 steps are exhausted.
//! 2. Saturation: same walk over saturation, only when the lightness result
//!    is still below the minimum threshold.
//! 3. Fallback: when the final pair is still below the minimum threshold, the
//!    foreground is replaced by black or white.
//!
//! Alpha is never inspected nor changed; the search is meant for opaque
//! pairs.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::{Hsla, Rgba, hsla_to_rgba, rgba_to_hsla};
use crate::scorer::ContrastScorer;

/// Largest offset, in percentage points, tried on each axis.
const MAX_STEP: u8 = 100;

/// Which colour(s) the search may change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementTarget {
    /// Only the foreground
    #[default]
    Text,
    /// Only the background, scored against the fixed foreground
    Background,
    /// The foreground first, then the background against the new foreground
    Both,
}

/// A background and the foreground drawn over it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Background colour
    pub background: Rgba,
    /// Foreground (text) colour
    pub foreground: Rgba,
}

impl ColorPair {
    /// Create a pair.
    #[must_use]
    pub fn new(background: Rgba, foreground: Rgba) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Lightness,
    Saturation,
}

impl Axis {
    fn value(self, hsla: Hsla) -> f64 {
        match self {
            Self::Lightness => hsla.l,
            Self::Saturation => hsla.s,
        }
    }

    fn with(self, hsla: Hsla, value: f64) -> Hsla {
        match self {
            Self::Lightness => hsla.with_lightness(value),
            Self::Saturation => hsla.with_saturation(value),
        }
    }
}

/// Adjust `pair` until it meets the thresholds of `scorer`'s standard.
///
/// A pair that already meets the full pass threshold is returned unchanged.
/// Whatever `target` says, the fallback stage may replace the foreground
/// with black or white (keeping the foreground's alpha); it never touches
/// the background.
///
/// # Examples
///
/// ```
/// # use contrast::color::Rgba;
/// # use contrast::contrast::wcag_contrast;
/// # use contrast::enhance::{ColorPair, EnhancementTarget, enhance};
/// # use contrast::scorer::WcagScorer;
/// let pair = ColorPair::new(Rgba::WHITE, Rgba::opaque(200, 200, 200));
/// let out = enhance(pair, EnhancementTarget::Both, &WcagScorer);
/// assert!(wcag_contrast(out.background, out.foreground, None) >= 4.5);
/// ```
#[must_use]
pub fn enhance(
    pair: ColorPair,
    target: EnhancementTarget,
    scorer: &impl ContrastScorer,
) -> ColorPair {
    let standard = scorer.standard();
    let mut background = pair.background;
    let mut foreground = pair.foreground;

    if matches!(target, EnhancementTarget::Text | EnhancementTarget::Both) {
        let fixed = background.to_rgb();
        foreground = adjust(foreground, standard.full_pass(), standard.minimum_pass(), |c| {
            scorer.score(fixed, c.to_rgb())
        });
        debug!("foreground adjusted to {foreground}");
    }

    if matches!(target, EnhancementTarget::Background | EnhancementTarget::Both) {
        let fixed = foreground.to_rgb();
        background = adjust(background, standard.full_pass(), standard.minimum_pass(), |c| {
            scorer.score(c.to_rgb(), fixed)
        });
        debug!("background adjusted to {background}");
    }

    let overall = scorer.score(background.to_rgb(), foreground.to_rgb()).abs();
    if overall < standard.minimum_pass() {
        let on_black = scorer.score(background.to_rgb(), Rgba::BLACK.to_rgb()).abs();
        let on_white = scorer.score(background.to_rgb(), Rgba::WHITE.to_rgb()).abs();
        let extreme = if on_white > on_black {
            Rgba::WHITE
        } else {
            Rgba::BLACK
        };
        debug!(
            "score {overall} still below {}, falling back to {extreme}",
            standard.minimum_pass()
        );
        foreground = Rgba::new(extreme.r, extreme.g, extreme.b, foreground.a);
    }

    ColorPair::new(background, foreground)
}

/// Run the lightness walk, then the saturation walk when still short.
fn adjust(
    color: Rgba,
    full_pass: f64,
    minimum_pass: f64,
    score_of: impl Fn(Rgba) -> f64,
) -> Rgba {
    let (color, score) = walk(color, Axis::Lightness, full_pass, &score_of);
    debug!("lightness walk reached {score}");
    if score >= minimum_pass {
        return color;
    }

    let (color, score) = walk(color, Axis::Saturation, full_pass, &score_of);
    debug!("saturation walk reached {score}");
    color
}

/// Step `start` along `axis` in both directions, keeping the first strictly
/// better candidate. Returns the best colour and the magnitude of its score.
fn walk(
    start: Rgba,
    axis: Axis,
    full_pass: f64,
    score_of: &impl Fn(Rgba) -> f64,
) -> (Rgba, f64) {
    let hsla = rgba_to_hsla(start);
    let origin = axis.value(hsla);

    let mut best = start;
    let mut best_score = score_of(start).abs();

    for step in 0..=MAX_STEP {
        if best_score >= full_pass {
            trace!("{axis:?} walk done after {step} steps");
            break;
        }

        let step = f64::from(step);
        for value in [origin + step, origin - step] {
            let candidate = hsla_to_rgba(axis.with(hsla, value));
            let score = score_of(candidate).abs();
            if score > best_score {
                trace!("{axis:?} {value}: {candidate} scores {score}");
                best = candidate;
                best_score = score;
            }
        }
    }

    (best, best_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::contrast::{ContrastStandard, relative_luminance, wcag_contrast};
    use crate::scorer::{ApcaScorer, WcagScorer};
    use proptest::prelude::*;

    fn ratio(pair: ColorPair) -> f64 {
        wcag_contrast(pair.background, pair.foreground, None)
    }

    /// Signed luminance difference scaled to roughly the APCA range.
    fn stub_oracle(bg: Rgb, fg: Rgb) -> f64 {
        (relative_luminance(bg) - relative_luminance(fg)) * 100.0
    }

    #[test]
    fn test_enhance_both_converges() {
        let pair = ColorPair::new(Rgba::WHITE, Rgba::opaque(200, 200, 200));
        assert!(ratio(pair) < 2.0);

        let out = enhance(pair, EnhancementTarget::Both, &WcagScorer);
        assert!(ratio(out) >= 4.5);
    }

    #[test]
    fn test_enhance_keeps_passing_pair() {
        let pair = ColorPair::new(Rgba::WHITE, Rgba::opaque(20, 40, 60));
        assert!(ratio(pair) >= 7.0);

        for target in [
            EnhancementTarget::Text,
            EnhancementTarget::Background,
            EnhancementTarget::Both,
        ] {
            assert_eq!(enhance(pair, target, &WcagScorer), pair);
        }
    }

    #[test]
    fn test_enhance_text_leaves_background() {
        let gray = Rgba::opaque(128, 128, 128);
        let pair = ColorPair::new(gray, gray);

        let out = enhance(pair, EnhancementTarget::Text, &WcagScorer);
        assert_eq!(out.background, gray);
        assert!(ratio(out) >= 4.5);
        // black text beats white text on mid gray
        assert!(relative_luminance(out.foreground.to_rgb()) < relative_luminance(gray.to_rgb()));
    }

    #[test]
    fn test_enhance_background_leaves_foreground() {
        let pair = ColorPair::new(Rgba::opaque(90, 90, 90), Rgba::BLACK);
        assert!(ratio(pair) < 4.5);

        let out = enhance(pair, EnhancementTarget::Background, &WcagScorer);
        assert_eq!(out.foreground, Rgba::BLACK);
        assert!(ratio(out) >= 7.0);
    }

    #[test]
    fn test_enhance_first_improvement_stops_early() {
        // lightening wins first, and stops as soon as it reaches 7
        let pair = ColorPair::new(Rgba::BLACK, Rgba::opaque(60, 60, 60));
        let out = enhance(pair, EnhancementTarget::Text, &WcagScorer);
        let reached = ratio(out);
        assert!(reached >= 7.0);
        assert!(reached < 8.0);
    }

    #[test]
    fn test_enhance_saturation_stage() {
        // rewards grayness, but only around 50% lightness, so the lightness
        // walk stalls and the saturation walk has to finish the job
        let scorer = ApcaScorer::new(|_bg: Rgb, fg: Rgb| {
            let hi = fg.r.max(fg.g).max(fg.b);
            let lo = fg.r.min(fg.g).min(fg.b);
            let mid = (u16::from(hi) + u16::from(lo)) / 2;
            if (120..=135).contains(&mid) {
                f64::from(255 - (hi - lo)) * 100.0 / 255.0
            } else {
                0.0
            }
        });
        let pair = ColorPair::new(Rgba::BLACK, Rgba::opaque(0, 0, 255));

        let out = enhance(pair, EnhancementTarget::Text, &scorer);
        let fg = out.foreground;
        assert!(fg.r.max(fg.g).max(fg.b) - fg.r.min(fg.g).min(fg.b) <= 70);
        assert!(fg.b > fg.r);
        assert_eq!(out.background, Rgba::BLACK);
    }

    #[test]
    fn test_enhance_fallback_rewrites_foreground() {
        // only pure white text scores; the background walk cannot help
        let scorer = ApcaScorer::new(|_bg: Rgb, fg: Rgb| {
            if fg == Rgb::new(255, 255, 255) { -100.0 } else { 0.0 }
        });
        let gray = Rgba::opaque(128, 128, 128);
        let pair = ColorPair::new(gray, gray);

        let out = enhance(pair, EnhancementTarget::Background, &scorer);
        assert_eq!(out.background, gray);
        assert_eq!(out.foreground, Rgba::WHITE);
    }

    #[test]
    fn test_enhance_fallback_prefers_black_on_tie() {
        let scorer = ApcaScorer::new(|_bg: Rgb, _fg: Rgb| 10.0);
        let pair = ColorPair::new(Rgba::WHITE, Rgba::opaque(250, 250, 250));
        let out = enhance(pair, EnhancementTarget::Both, &scorer);
        assert_eq!(out.foreground, Rgba::BLACK);
        assert_eq!(out.background, Rgba::WHITE);
    }

    #[test]
    fn test_enhance_apca() {
        let scorer = ApcaScorer::new(stub_oracle);
        let pair = ColorPair::new(Rgba::WHITE, Rgba::opaque(180, 180, 180));
        let out = enhance(pair, EnhancementTarget::Text, &scorer);
        let score = stub_oracle(out.background.to_rgb(), out.foreground.to_rgb());
        assert!(score.abs() >= ContrastStandard::Apca.full_pass());
        assert!(score > 0.0);
    }

    #[test]
    fn test_enhance_preserves_alpha() {
        let pair = ColorPair::new(Rgba::WHITE, Rgba::new(200, 200, 200, 0.6));
        let out = enhance(pair, EnhancementTarget::Text, &WcagScorer);
        assert!((out.foreground.a - 0.6).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn passing_pairs_are_untouched(
            fg in (0u8..=60, 0u8..=60, 0u8..=60),
            bg in (220u8..=255, 220u8..=255, 220u8..=255),
        ) {
            let pair = ColorPair::new(
                Rgba::opaque(bg.0, bg.1, bg.2),
                Rgba::opaque(fg.0, fg.1, fg.2),
            );
            prop_assert_eq!(enhance(pair, EnhancementTarget::Both, &WcagScorer), pair);
        }

        #[test]
        fn enhanced_pairs_reach_minimum(
            fg in (any::<u8>(), any::<u8>(), any::<u8>()),
            bg in (any::<u8>(), any::<u8>(), any::<u8>()),
        ) {
            let pair = ColorPair::new(
                Rgba::opaque(bg.0, bg.1, bg.2),
                Rgba::opaque(fg.0, fg.1, fg.2),
            );
            let out = enhance(pair, EnhancementTarget::Text, &WcagScorer);
            prop_assert!(ratio(out) >= 4.5);
        }
    }
}
