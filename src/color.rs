//! Colour representations and conversions.
//!
//! This module provides functions for:
//! - Parsing hexadecimal colours, leniently (while typing) or strictly
//! - Rendering colours back to hexadecimal strings
//! - Alpha compositing a translucent colour over another
//! - Converting between RGBA and HSLA

use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ColorError, Result};

/// Six or eight hex digits, leading `#` already stripped.
const HEX_PATTERN: &str = r"^(?i)([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})?$";

/// RGB color representation with red, green, and blue components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color from individual components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a new RGB color from a `(r, g, b)` tuple.
    #[must_use]
    pub fn from_tuple(rgb: (u8, u8, u8)) -> Self {
        Self {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }
    }

    /// Convert RGB color to a `(r, g, b)` tuple.
    #[must_use]
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// RGB color with an opacity channel.
///
/// This is the representation threaded through the whole crate. Channels are
/// always in range: the colour channels by construction, the alpha channel
/// because every constructor clamps it to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Opacity (0.0 transparent, 1.0 opaque)
    pub a: f64,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Create a colour, clamping `a` into `0.0..=1.0`.
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create a fully opaque colour.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Whether the colour has no transparency at all.
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Drop the alpha channel.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb.r, rgb.g, rgb.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgba_to_hex(*self))
    }
}

/// HSL color with an opacity channel.
///
/// Hue is in degrees (`0.0..360.0`), saturation and lightness are
/// percentages (`0.0..=100.0`), alpha is `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    /// Hue in degrees
    pub h: f64,
    /// Saturation percentage
    pub s: f64,
    /// Lightness percentage
    pub l: f64,
    /// Opacity
    pub a: f64,
}

impl Hsla {
    /// Create an HSLA colour, wrapping the hue and clamping the other channels.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Same colour with another lightness, clamped to `0.0..=100.0`.
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l, self.a)
    }

    /// Same colour with another saturation, clamped to `0.0..=100.0`.
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l, self.a)
    }
}

/// Parse a hexadecimal colour, strictly.
///
/// Accepts `RRGGBB` or `RRGGBBAA`, with or without a leading `#`, in any
/// letter case. Surrounding whitespace is ignored. The alpha byte, when
/// present, is normalised to `0.0..=1.0`.
///
/// Use this for committed values; see [`hex_to_rgba`] for input that is
/// still being typed.
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] naming the input when the digits
/// (after stripping `#`) are not exactly 6 or 8 hexadecimal characters.
///
/// # Examples
///
/// ```
/// # use contrast::color::{Rgba, hex_to_rgb};
/// assert_eq!(hex_to_rgb("#ff0000ff").unwrap(), Rgba::opaque(255, 0, 0));
/// assert!(hex_to_rgb("#abc").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<Rgba> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidFormat(hex.to_string()));
    }

    let re = Regex::new(HEX_PATTERN)?;
    let caps = re
        .captures(digits)
        .ok_or_else(|| ColorError::InvalidFormat(hex.to_string()))?;

    let byte = |i: usize| -> Result<u8> {
        u8::from_str_radix(&caps[i], 16).map_err(|_| ColorError::InvalidFormat(hex.to_string()))
    };

    let alpha = match caps.get(4) {
        Some(m) => f64::from(
            u8::from_str_radix(m.as_str(), 16)
                .map_err(|_| ColorError::InvalidFormat(hex.to_string()))?,
        ) / 255.0,
        None => 1.0,
    };

    Ok(Rgba::new(byte(1)?, byte(2)?, byte(3)?, alpha))
}

/// Parse a hexadecimal colour, leniently.
///
/// Same accepted forms as [`hex_to_rgb`], but malformed input never fails:
/// it yields opaque black. Intended for live input where incomplete values
/// are expected on every keystroke.
#[must_use]
pub fn hex_to_rgba(hex: &str) -> Rgba {
    match hex_to_rgb(hex) {
        Ok(rgba) => rgba,
        Err(err) => {
            trace!("lenient parse fell back to black: {err}");
            Rgba::BLACK
        }
    }
}

/// Render a colour as `#rrggbb`, or `#rrggbbaa` when it is not fully opaque.
#[must_use]
pub fn rgba_to_hex(rgba: Rgba) -> String {
    let mut hex = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    if !rgba.is_opaque() {
        hex.push_str(&format!("{:02x}", channel(rgba.a * 255.0)));
    }
    hex
}

/// Render a colour as `#rrggbb`.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Composite `fg` over `bg` using `fg.a` as the mix weight.
///
/// The result is always opaque.
///
/// # Formula
///
/// out = round(fg × α + bg × (1 − α)), per channel
#[must_use]
pub fn blend_colors(fg: Rgba, bg: Rgba) -> Rgba {
    let alpha = fg.a;
    let mix = |f: u8, b: u8| channel(f64::from(f) * alpha + f64::from(b) * (1.0 - alpha));

    Rgba::opaque(mix(fg.r, bg.r), mix(fg.g, bg.g), mix(fg.b, bg.b))
}

/// Convert RGBA to HSLA. Alpha is passed through.
///
/// Achromatic colours (all channels equal) get hue and saturation 0.
#[must_use]
pub fn rgba_to_hsla(rgba: Rgba) -> Hsla {
    let max = rgba.r.max(rgba.g).max(rgba.b);
    let min = rgba.r.min(rgba.g).min(rgba.b);

    let r = f64::from(rgba.r) / 255.0;
    let g = f64::from(rgba.g) / 255.0;
    let b = f64::from(rgba.b) / 255.0;
    let hi = f64::from(max) / 255.0;
    let lo = f64::from(min) / 255.0;

    let l = (hi + lo) / 2.0;
    if max == min {
        return Hsla::new(0.0, 0.0, l * 100.0, rgba.a);
    }

    let d = hi - lo;
    let s = if l > 0.5 {
        d / (2.0 - hi - lo)
    } else {
        d / (hi + lo)
    };

    let sector = if max == rgba.r {
        (g - b) / d + if rgba.g < rgba.b { 6.0 } else { 0.0 }
    } else if max == rgba.g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsla::new(sector * 60.0, s * 100.0, l * 100.0, rgba.a)
}

/// Convert HSLA to RGBA. Alpha is passed through.
#[must_use]
pub fn hsla_to_rgba(hsla: Hsla) -> Rgba {
    let h = hsla.h / 360.0;
    let s = hsla.s / 100.0;
    let l = hsla.l / 100.0;

    if s <= 0.0 {
        let v = channel(l * 255.0);
        return Rgba::new(v, v, v, hsla.a);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgba::new(
        channel(hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0),
        channel(hue_to_rgb(p, q, h) * 255.0),
        channel(hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0),
        hsla.a,
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Round and clamp a float into a colour channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
