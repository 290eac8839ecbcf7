//! Visual settings
//!
//! The runtime configuration surface shared by the effect layers and the
//! lyrics panel. Values are read from an optional JSON file at startup and
//! adjusted through keybindings afterwards; nothing is written back.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::features::visualizer::color::{ColorMode, Rgba};

pub const GLOW_RANGE: RangeInclusive<f32> = 0.0..=40.0;
pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = 0.1..=1.5;
pub const FONT_SCALE_RANGE: RangeInclusive<f32> = 0.5..=1.5;
/// Lyric offset adjustments snap to this step (seconds)
pub const OFFSET_STEP: f64 = 0.5;

/// Tuned constants kept adjustable instead of hard-coded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Extra height factor for the lowest bars
    pub bass_bar_boost: f32,
    /// Extra height factor for bars past index 50
    pub treble_bar_boost: f32,
    /// Fraction of a line's duration the character wipe takes
    pub fill_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bass_bar_boost: 0.3,
            treble_bar_boost: 0.5,
            fill_ratio: 0.85,
        }
    }
}

/// All visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Rainbow sweep instead of the highlight color
    pub rainbow: bool,
    /// Glow radius around spectrum bars (0-40)
    pub bar_glow: f32,
    /// Glow radius around particles (0-40)
    pub effects_glow: f32,
    /// Global brightness multiplier (0.1-1.5)
    pub brightness: f32,
    pub rain: bool,
    pub fireworks: bool,
    pub bokeh: bool,
    /// Hex color used for custom-mode bars, bokeh and the lyric fill
    pub highlight_color: String,
    /// Lyric font size multiplier (0.5-1.5)
    pub lyric_font_scale: f32,
    /// Seconds added to the playback position before lyric lookup
    pub lyric_offset: f64,
    pub tuning: Tuning,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            rainbow: true,
            bar_glow: 15.0,
            effects_glow: 10.0,
            brightness: 1.0,
            rain: true,
            fireworks: true,
            bokeh: true,
            highlight_color: "#ff2d95".to_string(),
            lyric_font_scale: 1.0,
            lyric_offset: 0.0,
            tuning: Tuning::default(),
        }
    }
}

impl VisualSettings {
    /// Default settings file location
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glowline").join("settings.json"))
    }

    /// Load from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::file_path() {
                Some(p) if p.exists() => p,
                _ => return Self::default(),
            },
        };

        match Self::load_from_file(&path) {
            Ok(settings) => {
                tracing::debug!("Loaded visual settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load from a specific file; out-of-range values are clamped
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(settings.sanitized())
    }

    /// Clamp every value into its documented range
    pub fn sanitized(mut self) -> Self {
        self.set_bar_glow(self.bar_glow);
        self.set_effects_glow(self.effects_glow);
        self.set_brightness(self.brightness);
        self.set_lyric_font_scale(self.lyric_font_scale);
        self.set_lyric_offset(self.lyric_offset);
        let color = std::mem::take(&mut self.highlight_color);
        self.set_highlight_color(color);
        self
    }

    pub fn set_bar_glow(&mut self, radius: f32) {
        self.bar_glow = clamp_range(radius, &GLOW_RANGE);
    }

    pub fn set_effects_glow(&mut self, radius: f32) {
        self.effects_glow = clamp_range(radius, &GLOW_RANGE);
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = clamp_range(brightness, &BRIGHTNESS_RANGE);
    }

    pub fn set_lyric_font_scale(&mut self, scale: f32) {
        self.lyric_font_scale = clamp_range(scale, &FONT_SCALE_RANGE);
    }

    /// Offset is unbounded but snapped to [`OFFSET_STEP`]
    pub fn set_lyric_offset(&mut self, offset: f64) {
        self.lyric_offset = if offset.is_finite() {
            (offset / OFFSET_STEP).round() * OFFSET_STEP
        } else {
            0.0
        };
    }

    pub fn nudge_lyric_offset(&mut self, steps: i32) {
        self.set_lyric_offset(self.lyric_offset + f64::from(steps) * OFFSET_STEP);
    }

    /// Accepts any string; an unparseable color is kept but renders neutral
    pub fn set_highlight_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if Rgba::parse_hex(&color).is_none() {
            tracing::warn!("Unparseable highlight color {:?}, using neutral tint", color);
        }
        self.highlight_color = color;
    }

    /// Brightness as a compositing alpha
    pub fn global_alpha(&self) -> f32 {
        self.brightness.clamp(0.0, 1.0)
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_settings(self.rainbow, &self.highlight_color)
    }

    /// Highlight color as RGBA, neutral when unparseable
    pub fn highlight_rgba(&self) -> Rgba {
        ColorMode::from_settings(false, &self.highlight_color)
            .at_fraction(0.0)
            .to_rgba(1.0)
    }
}

fn clamp_range(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut s = VisualSettings::default();
        s.set_bar_glow(100.0);
        s.set_effects_glow(-3.0);
        s.set_brightness(9.0);
        s.set_lyric_font_scale(0.1);
        assert_eq!(s.bar_glow, 40.0);
        assert_eq!(s.effects_glow, 0.0);
        assert_eq!(s.brightness, 1.5);
        assert_eq!(s.lyric_font_scale, 0.5);
    }

    #[test]
    fn test_global_alpha_caps_at_one() {
        let mut s = VisualSettings::default();
        s.set_brightness(1.4);
        assert_eq!(s.global_alpha(), 1.0);
        s.set_brightness(0.3);
        assert!((s.global_alpha() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_offset_snaps_to_half_seconds() {
        let mut s = VisualSettings::default();
        s.set_lyric_offset(1.3);
        assert_eq!(s.lyric_offset, 1.5);
        s.nudge_lyric_offset(-5);
        assert_eq!(s.lyric_offset, -1.0);
        s.set_lyric_offset(f64::NAN);
        assert_eq!(s.lyric_offset, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = VisualSettings::from_json(r#"{"rainbow": false, "brightness": 7.0}"#).unwrap();
        assert!(!s.rainbow);
        assert_eq!(s.brightness, 1.5);
        assert!(s.rain);
        assert_eq!(s.tuning, Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            VisualSettings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_unparseable_color_renders_neutral() {
        let mut s = VisualSettings::default();
        s.set_highlight_color("chartreuse-ish");
        let c = s.highlight_rgba();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
