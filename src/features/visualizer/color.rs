//! Color model for bars, glows and blobs
//!
//! Everything is expressed as HSL so per-bar hue jitter and tint derivation
//! stay cheap. Two modes:
//! - Rainbow: hue sweeps `0..320` degrees across the bars
//! - Custom: a single highlight color, jittered by ±10 degrees across bars

use once_cell::sync::Lazy;
use regex::Regex;

/// Hue span of the rainbow sweep (stops short of 360 so red is not repeated)
pub const RAINBOW_SPAN: f32 = 320.0;

/// Maximum hue jitter either side of the custom color
pub const CUSTOM_HUE_JITTER: f32 = 10.0;

/// Tint used when the configured highlight color cannot be parsed
pub const FALLBACK_TINT: Hsl = Hsl::new(0.0, 0.0, 75.0);

/// Straight (non-premultiplied) RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn parse_hex(src: &str) -> Option<Self> {
        static HEX: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid regex")
        });

        let digits = HEX.captures(src.trim())?.get(1)?.as_str();
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

        match digits.len() {
            3 => {
                let expand = |i: usize| {
                    let c = &digits[i..i + 1];
                    channel(format!("{c}{c}").as_str())
                };
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?, 1.0))
            }
            6 | 8 => {
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    1.0
                };
                Some(Self::new(
                    channel(&digits[0..2])?,
                    channel(&digits[2..4])?,
                    channel(&digits[4..6])?,
                    a,
                ))
            }
            _ => None,
        }
    }
}

/// Hue (degrees), saturation and lightness (percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Rotate hue, wrapping into `0..360`
    pub fn rotate(self, degrees: f32) -> Self {
        Self {
            h: (self.h + degrees).rem_euclid(360.0),
            ..self
        }
    }

    /// Shift lightness, clamped to `0..=100`
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            l: (self.l + amount).clamp(0.0, 100.0),
            ..self
        }
    }

    pub fn with_lightness(self, l: f32) -> Self {
        Self {
            l: l.clamp(0.0, 100.0),
            ..self
        }
    }

    pub fn to_rgba(self, alpha: f32) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return Rgba::new(l, l, l, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgba::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            alpha,
        )
    }

    pub fn from_rgba(color: Rgba) -> Self {
        let (r, g, b) = (color.r, color.g, color.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
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

/// Base color selection for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMode {
    Rainbow,
    Custom(Hsl),
}

impl ColorMode {
    /// Build from the settings pair; an unparseable color degrades to a neutral tint
    pub fn from_settings(rainbow: bool, highlight: &str) -> Self {
        if rainbow {
            ColorMode::Rainbow
        } else {
            ColorMode::Custom(parse_highlight(highlight))
        }
    }

    /// Base hue/saturation/lightness for bar `index` of `count`
    pub fn bar_base(&self, index: usize, count: usize) -> Hsl {
        let t = if count == 0 {
            0.0
        } else {
            index as f32 / count as f32
        };
        match self {
            ColorMode::Rainbow => Hsl::new(t * RAINBOW_SPAN, 90.0, 60.0),
            ColorMode::Custom(base) => base.rotate((t * 2.0 - 1.0) * CUSTOM_HUE_JITTER),
        }
    }

    /// The four tints a spectrum bar is drawn with
    pub fn bar_tints(&self, index: usize, count: usize) -> BarTints {
        BarTints::from_base(self.bar_base(index, count))
    }

    /// Color for position-keyed decorations (bokeh, fireworks, blobs)
    pub fn at_fraction(&self, fraction: f32) -> Hsl {
        match self {
            ColorMode::Rainbow => Hsl::new(fraction.clamp(0.0, 1.0) * 360.0, 85.0, 65.0),
            ColorMode::Custom(base) => *base,
        }
    }
}

/// Parse the configured highlight color, falling back to [`FALLBACK_TINT`]
pub fn parse_highlight(src: &str) -> Hsl {
    Rgba::parse_hex(src)
        .map(Hsl::from_rgba)
        .unwrap_or(FALLBACK_TINT)
}

/// Tints derived from one bar's base hue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarTints {
    pub fill: Rgba,
    pub glow: Rgba,
    pub reflection: Rgba,
    pub peak: Rgba,
}

impl BarTints {
    pub fn from_base(base: Hsl) -> Self {
        Self {
            fill: base.to_rgba(1.0),
            glow: base.lighten(10.0).to_rgba(1.0),
            reflection: base.to_rgba(0.15),
            peak: base.with_lightness(85.0).to_rgba(1.0),
        }
    }
}
