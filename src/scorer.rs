//! Pluggable contrast scoring.
//!
//! The contrast range estimator and the enhancement search only ever talk to
//! a [`ContrastScorer`], so they work the same for WCAG ratios and for APCA
//! scores. WCAG is computed here; APCA is supplied by the caller as an oracle
//! function, since its formula lives outside this crate.

use crate::color::{Rgb, Rgba};
use crate::contrast::{ContrastStandard, wcag_contrast};

/// Scores the contrast of a foreground colour over an opaque background.
pub trait ContrastScorer {
    /// The standard whose thresholds apply to this scorer's output.
    fn standard(&self) -> ContrastStandard;

    /// Score `foreground` against `background`.
    ///
    /// The sign may carry polarity; callers compare magnitudes only.
    fn score(&self, background: Rgb, foreground: Rgb) -> f64;
}

impl<T: ContrastScorer + ?Sized> ContrastScorer for &T {
    fn standard(&self) -> ContrastStandard {
        (**self).standard()
    }

    fn score(&self, background: Rgb, foreground: Rgb) -> f64 {
        (**self).score(background, foreground)
    }
}

/// WCAG 2.x contrast ratio, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WcagScorer;

impl ContrastScorer for WcagScorer {
    fn standard(&self) -> ContrastStandard {
        ContrastStandard::Wcag
    }

    fn score(&self, background: Rgb, foreground: Rgb) -> f64 {
        wcag_contrast(Rgba::from(background), Rgba::from(foreground), None)
    }
}

/// Adapter for an external APCA implementation.
///
/// The oracle receives `(background, foreground)` and returns a signed Lc
/// score: positive for dark text on a light background, negative for light
/// text on a dark one.
///
/// # Examples
///
/// ```
/// # use contrast::scorer::{ApcaScorer, ContrastScorer};
/// # use contrast::color::Rgb;
/// let scorer = ApcaScorer::new(|_bg: Rgb, _fg: Rgb| 106.0);
/// assert_eq!(scorer.score(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)), 106.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApcaScorer<F> {
    oracle: F,
}

impl<F> ApcaScorer<F>
where
    F: Fn(Rgb, Rgb) -> f64,
{
    /// Wrap an oracle function.
    #[must_use]
    pub fn new(oracle: F) -> Self {
        Self { oracle }
    }
}

impl<F> ContrastScorer for ApcaScorer<F>
where
    F: Fn(Rgb, Rgb) -> f64,
{
    fn standard(&self) -> ContrastStandard {
        ContrastStandard::Apca
    }

    fn score(&self, background: Rgb, foreground: Rgb) -> f64 {
        (self.oracle)(background, foreground)
    }
}
