//! Spectrum bars with peak-hold indicators
//!
//! 64 bars sample the lower half of the frequency frame with a fixed stride.
//! Each bar is drawn with a glow, a short translucent mirror below the
//! baseline that fades out downwards, and a falling peak marker.

use super::bands::FrequencyFrame;
use super::color::ColorMode;
use super::surface::{BlendMode, ColorStop, Glow, Surface};
use crate::features::settings::{Tuning, VisualSettings};

/// Number of bars across the width
pub const BAR_COUNT: usize = 64;
/// Bars below this index get the bass boost
pub const BASS_BOOST_BARS: usize = 10;
/// Bars above this index get the treble boost
pub const TREBLE_BOOST_FROM: usize = 50;
/// Smallest drawn bar height, so silence still shows a baseline
pub const MIN_BAR_HEIGHT: f32 = 2.0;
/// Fraction of the view height a full-scale bar reaches (before boost)
pub const HEIGHT_FRACTION: f32 = 0.45;
/// Magnitude response curve exponent
pub const RESPONSE_EXPONENT: f32 = 1.4;
/// Multiplicative peak decay per tick
pub const PEAK_DECAY: f32 = 0.95;
/// Subtractive peak decay per tick
pub const PEAK_FALL: f32 = 0.5;
/// Peaks below this height are not drawn
pub const PEAK_VISIBLE_MIN: f32 = 5.0;

/// Gap between bars in logical pixels
const BAR_GAP: f32 = 2.0;
/// Baseline position as a fraction of the view height
const BASELINE: f32 = 0.88;
/// Reflection length relative to bar height
const REFLECTION_RATIO: f32 = 0.35;
const PEAK_THICKNESS: f32 = 3.0;

/// Peak-hold tracker for one bar
///
/// The displayed value after `k` ticks without a new maximum is
/// `held * 0.95^k - 0.5 * k`, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakState {
    held: f32,
    ticks_since_hold: u32,
}

impl PeakState {
    pub fn value(&self) -> f32 {
        let k = self.ticks_since_hold as f32;
        (self.held * PEAK_DECAY.powf(k) - PEAK_FALL * k).max(0.0)
    }

    /// Feed this tick's bar height
    pub fn update(&mut self, height: f32) {
        if height > self.value() {
            self.held = height;
            self.ticks_since_hold = 0;
        } else if self.value() > 0.0 {
            self.ticks_since_hold = self.ticks_since_hold.saturating_add(1);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.value() >= PEAK_VISIBLE_MIN
    }
}

/// Frequency bin stride for `bin_count` bins spread over `bars` bars
pub fn bin_stride(bin_count: usize, bars: usize) -> usize {
    if bars == 0 {
        return 0;
    }
    bin_count / 2 / bars
}

/// Height boost factor for bar `index`
pub fn bar_boost(index: usize, tuning: &Tuning) -> f32 {
    let mut boost = 1.0;
    if index < BASS_BOOST_BARS {
        boost += tuning.bass_bar_boost;
    }
    if index > TREBLE_BOOST_FROM {
        boost += tuning.treble_bar_boost;
    }
    boost
}

/// Bar height for a magnitude
pub fn bar_height(magnitude: u8, view_height: f32, boost: f32) -> f32 {
    let normalized = f32::from(magnitude) / 255.0;
    (normalized.powf(RESPONSE_EXPONENT) * HEIGHT_FRACTION * view_height * boost).max(MIN_BAR_HEIGHT)
}

/// Spectrum bar renderer state
#[derive(Debug, Clone)]
pub struct SpectrumBars {
    heights: Vec<f32>,
    peaks: Vec<PeakState>,
}

impl Default for SpectrumBars {
    fn default() -> Self {
        Self::new(BAR_COUNT)
    }
}

impl SpectrumBars {
    pub fn new(bar_count: usize) -> Self {
        Self {
            heights: vec![MIN_BAR_HEIGHT; bar_count],
            peaks: vec![PeakState::default(); bar_count],
        }
    }

    pub fn bar_count(&self) -> usize {
        self.heights.len()
    }

    /// Change the number of bars; peak history is discarded
    pub fn set_bar_count(&mut self, bar_count: usize) {
        if bar_count != self.heights.len() {
            *self = Self::new(bar_count);
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn peaks(&self) -> &[PeakState] {
        &self.peaks
    }

    /// Recompute bar heights and advance peaks; an absent frame is silence
    pub fn update(&mut self, frame: Option<&FrequencyFrame>, view_height: f32, tuning: &Tuning) {
        let bars = self.heights.len();
        let stride = frame.map(|f| bin_stride(f.len(), bars)).unwrap_or(0);

        for (i, (height, peak)) in self.heights.iter_mut().zip(&mut self.peaks).enumerate() {
            let magnitude = frame.map(|f| f.magnitude(i * stride)).unwrap_or(0);
            *height = bar_height(magnitude, view_height, bar_boost(i, tuning));
            peak.update(*height);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, settings: &VisualSettings) {
        let (width, view_height) = surface.size();
        let bars = self.heights.len();
        if bars == 0 || width <= 0.0 {
            return;
        }

        let mode: ColorMode = settings.color_mode();
        let slot = width / bars as f32;
        let bar_width = (slot - BAR_GAP).max(1.0);
        let baseline = view_height * BASELINE;
        let reflection_room = (view_height - baseline).max(0.0);

        surface.set_global_alpha(settings.global_alpha());
        surface.set_blend_mode(BlendMode::Additive);

        for (i, (&height, peak)) in self.heights.iter().zip(&self.peaks).enumerate() {
            let tints = mode.bar_tints(i, bars);
            let x = i as f32 * slot + BAR_GAP / 2.0;

            surface.set_glow((settings.bar_glow > 0.0).then_some(Glow {
                radius: settings.bar_glow,
                color: tints.glow,
            }));
            surface.fill_rect(x, baseline - height, bar_width, height, tints.fill);
            surface.set_glow(None);

            let reflection = (height * REFLECTION_RATIO).min(reflection_room);
            if reflection > 0.0 {
                let stops = [
                    ColorStop::new(0.0, tints.reflection),
                    ColorStop::new(1.0, tints.reflection.with_alpha(0.0)),
                ];
                surface.fill_linear_gradient(
                    x,
                    baseline,
                    bar_width,
                    reflection,
                    (x, baseline),
                    (x, baseline + reflection),
                    &stops,
                );
            }

            if peak.is_visible() {
                let y = baseline - peak.value() - PEAK_THICKNESS;
                surface.fill_rect(x, y, bar_width, PEAK_THICKNESS, tints.peak);
            }
        }

        surface.set_glow(None);
        surface.set_blend_mode(BlendMode::Normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visualizer::surface::recording::{DrawOp, RecordingSurface};

    #[test]
    fn test_stride_samples_lower_half() {
        assert_eq!(bin_stride(1024, 64), 8);
        assert_eq!(bin_stride(100, 64), 0);
        assert_eq!(bin_stride(1024, 0), 0);
    }

    #[test]
    fn test_boost_extremes() {
        let tuning = Tuning::default();
        assert!((bar_boost(0, &tuning) - 1.3).abs() < 1e-6);
        assert_eq!(bar_boost(30, &tuning), 1.0);
        assert_eq!(bar_boost(50, &tuning), 1.0);
        assert!((bar_boost(51, &tuning) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_bar_height_floor_and_full_scale() {
        assert_eq!(bar_height(0, 600.0, 1.0), MIN_BAR_HEIGHT);
        assert!((bar_height(255, 600.0, 1.0) - 270.0).abs() < 1e-3);
        assert!((bar_height(255, 600.0, 1.5) - 405.0).abs() < 1e-3);
    }

    #[test]
    fn test_peak_decay_matches_closed_form() {
        let h = 200.0_f32;
        let mut peak = PeakState::default();
        peak.update(h);
        assert_eq!(peak.value(), h);

        for k in 1..=60 {
            peak.update(0.0);
            let expected = (h * 0.95_f32.powi(k) - 0.5 * k as f32).max(0.0);
            assert!(
                (peak.value() - expected).abs() < 1e-3,
                "frame {k}: {} vs {expected}",
                peak.value()
            );
        }
    }

    #[test]
    fn test_peak_clips_to_zero_and_stays() {
        let mut peak = PeakState::default();
        peak.update(3.0);
        for _ in 0..200 {
            peak.update(0.0);
        }
        assert_eq!(peak.value(), 0.0);
        assert!(!peak.is_visible());
    }

    #[test]
    fn test_new_maximum_replaces_peak() {
        let mut peak = PeakState::default();
        peak.update(100.0);
        peak.update(0.0);
        peak.update(150.0);
        assert_eq!(peak.value(), 150.0);
    }

    #[test]
    fn test_silence_renders_minimum_bars() {
        let mut bars = SpectrumBars::default();
        bars.update(None, 500.0, &Tuning::default());
        assert!(bars.heights().iter().all(|&h| h == MIN_BAR_HEIGHT));
        assert!(bars.peaks().iter().all(|p| !p.is_visible()));
    }

    #[test]
    fn test_bar_count_change_resets_peaks() {
        let mut bars = SpectrumBars::default();
        let frame = FrequencyFrame::new(vec![255; 1024]);
        bars.update(Some(&frame), 500.0, &Tuning::default());
        assert!(bars.peaks()[0].is_visible());

        bars.set_bar_count(32);
        assert_eq!(bars.bar_count(), 32);
        assert!(bars.peaks().iter().all(|p| p.value() == 0.0));
    }

    #[test]
    fn test_draw_uses_additive_blend_and_brightness() {
        let mut bars = SpectrumBars::default();
        let frame = FrequencyFrame::new(vec![200; 1024]);
        bars.update(Some(&frame), 500.0, &Tuning::default());

        let mut settings = VisualSettings::default();
        settings.set_brightness(0.4);
        let mut surface = RecordingSurface::new(640.0, 500.0);
        bars.draw(&mut surface, &settings);

        // fill + peak rects, plus a gradient reflection, for every bar
        assert_eq!(surface.rects().count(), BAR_COUNT * 2);
        assert_eq!(surface.linear_gradients().count(), BAR_COUNT);
        assert!(surface.calls.iter().all(|c| c.blend == BlendMode::Additive));
        assert!(surface.calls.iter().all(|c| (c.alpha - 0.4).abs() < 1e-6));

        let glowing = surface.calls.iter().filter(|c| c.glow.is_some()).count();
        assert_eq!(glowing, BAR_COUNT);
        assert_eq!(surface.blend, BlendMode::Normal);
    }

    #[test]
    fn test_reflection_is_truncated_to_view() {
        let mut bars = SpectrumBars::new(1);
        let frame = FrequencyFrame::new(vec![255; 4]);
        bars.update(Some(&frame), 100.0, &Tuning::default());

        let mut surface = RecordingSurface::new(10.0, 100.0);
        bars.draw(&mut surface, &VisualSettings::default());
        let (y, height, stops) = surface
            .linear_gradients()
            .find_map(|c| match &c.op {
                DrawOp::LinearGradient { y, height, stops, .. } => Some((*y, *height, stops.clone())),
                _ => None,
            })
            .unwrap();
        assert!((y - 88.0).abs() < 1e-3);
        assert!(height <= 12.0 + 1e-3);

        // Fades from the reflection tint to transparent
        assert_eq!(stops.len(), 2);
        assert!(stops[0].color.a > 0.0);
        assert_eq!(stops[1].color.a, 0.0);
    }
}
