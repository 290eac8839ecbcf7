//! The two rendering layers
//!
//! [`EffectsLayer`] carries the particle systems and the spectrum bars,
//! [`BackgroundLayer`] the ambient blobs. They share no state and are
//! driven by separate schedulers.

use rand::rngs::StdRng;

use super::blobs::BlobField;
use super::bokeh::BokehField;
use super::fireworks::FireworkSystem;
use super::rain::RainField;
use super::scheduler::{Layer, SurfaceSize, TickInput};
use super::spectrum::SpectrumBars;
use super::surface::{BlendMode, Surface};
use crate::features::settings::VisualSettings;

/// Position along the color sweep used to tint rain in rainbow mode
const RAIN_TINT: f32 = 0.55;

#[derive(Debug, Clone, Default)]
pub struct EffectsLayer {
    pub rain: RainField,
    pub fireworks: FireworkSystem,
    pub bokeh: BokehField,
    pub bars: SpectrumBars,
    size: Option<SurfaceSize>,
}

impl Layer for EffectsLayer {
    const NAME: &'static str = "effects";
    const MAX_PIXEL_RATIO: f32 = 2.0;

    fn resize(&mut self, size: SurfaceSize, rng: &mut StdRng) {
        if !self.rain.is_initialized() {
            self.rain.init(rng, size.width, size.height);
        }
        self.size = Some(size);
    }

    fn tick(&mut self, input: &TickInput<'_>, rng: &mut StdRng) {
        let Some(size) = self.size else {
            return;
        };
        let settings = input.settings;
        let (w, h) = (size.width, size.height);

        if settings.rain {
            self.rain.update(rng, input.bands, w, h);
        }

        // A disabled system is emptied rather than left to decay off-screen
        if settings.fireworks {
            let mode = settings.color_mode();
            self.fireworks
                .update(rng, input.bands, input.playing, w, h, &mode);
        } else {
            self.fireworks.clear();
        }

        if settings.bokeh {
            self.bokeh.update(rng, input.bands, input.playing, w, h);
        } else {
            self.bokeh.clear();
        }

        self.bars.update(input.frame, h, &settings.tuning);

        tracing::trace!(
            sparks = self.fireworks.sparks().len(),
            rockets = self.fireworks.rockets().len(),
            bokeh = self.bokeh.sparkles().len(),
            "effects tick"
        );
    }

    fn draw(&self, surface: &mut dyn Surface, settings: &VisualSettings) {
        let mode = settings.color_mode();
        surface.set_global_alpha(settings.global_alpha());

        if settings.rain {
            self.rain
                .draw(surface, settings.effects_glow, mode.at_fraction(RAIN_TINT));
        }
        if settings.bokeh {
            self.bokeh.draw(surface, &mode);
        }
        if settings.fireworks {
            self.fireworks.draw(surface, settings.effects_glow);
        }
        self.bars.draw(surface, settings);

        surface.set_blend_mode(BlendMode::Normal);
        surface.set_global_alpha(1.0);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackgroundLayer {
    pub blobs: BlobField,
    size: Option<SurfaceSize>,
}

impl Layer for BackgroundLayer {
    const NAME: &'static str = "background";
    const MAX_PIXEL_RATIO: f32 = 1.5;

    fn resize(&mut self, size: SurfaceSize, rng: &mut StdRng) {
        if !self.blobs.is_initialized() {
            self.blobs.init(rng, size.width, size.height);
        }
        self.size = Some(size);
    }

    fn tick(&mut self, input: &TickInput<'_>, _rng: &mut StdRng) {
        if let Some(size) = self.size {
            self.blobs.update(input.bands, size.width, size.height);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, settings: &VisualSettings) {
        surface.set_global_alpha(settings.global_alpha());
        self.blobs.draw(surface, &settings.color_mode());
        surface.set_global_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visualizer::bands::FrequencyFrame;
    use crate::features::visualizer::rain::RAIN_POOL_SIZE;
    use crate::features::visualizer::scheduler::AnimationScheduler;
    use crate::features::visualizer::spectrum::BAR_COUNT;
    use crate::features::visualizer::surface::recording::RecordingSurface;
    use rand::SeedableRng;

    fn effects() -> AnimationScheduler<EffectsLayer> {
        let mut s = AnimationScheduler::with_rng(EffectsLayer::default(), StdRng::seed_from_u64(5));
        s.start();
        s.on_resize(800.0, 600.0, 1.0);
        s
    }

    #[test]
    fn test_resize_initializes_rain_once() {
        let mut s = effects();
        assert_eq!(s.layer().rain.len(), RAIN_POOL_SIZE);
        let before = s.layer().rain.drops().to_vec();
        s.on_resize(1024.0, 768.0, 1.0);
        assert_eq!(s.layer().rain.drops(), before.as_slice());
    }

    #[test]
    fn test_stopped_playback_spawns_nothing() {
        let settings = VisualSettings::default();
        let frame = FrequencyFrame::new(vec![255; 1024]);
        let mut s = effects();
        for _ in 0..500 {
            s.on_frame(&TickInput::new(Some(&frame), false, &settings));
        }
        assert!(s.layer().fireworks.rockets().is_empty());
        assert!(s.layer().bokeh.sparkles().is_empty());
        assert_eq!(s.layer().rain.len(), RAIN_POOL_SIZE);
    }

    #[test]
    fn test_disabled_systems_are_cleared_and_not_drawn() {
        let mut settings = VisualSettings::default();
        let frame = FrequencyFrame::new(vec![255; 1024]);
        let mut s = effects();
        for _ in 0..300 {
            s.on_frame(&TickInput::new(Some(&frame), true, &settings));
        }

        settings.rain = false;
        settings.fireworks = false;
        settings.bokeh = false;
        s.on_frame(&TickInput::new(Some(&frame), true, &settings));
        assert!(s.layer().fireworks.sparks().is_empty());
        assert!(s.layer().bokeh.sparkles().is_empty());

        let mut surface = RecordingSurface::new(800.0, 600.0);
        s.draw(&mut surface, &settings);
        // Only the spectrum remains: fill and peak rects, a gradient reflection
        assert_eq!(surface.rects().count(), BAR_COUNT * 2);
        assert_eq!(surface.linear_gradients().count(), BAR_COUNT);
        assert_eq!(surface.circles().count(), 0);
    }

    #[test]
    fn test_draw_restores_surface_state() {
        let settings = VisualSettings::default();
        let mut s = effects();
        s.on_frame(&TickInput::new(None, true, &settings));
        let mut surface = RecordingSurface::new(800.0, 600.0);
        s.draw(&mut surface, &settings);
        assert_eq!(surface.blend, BlendMode::Normal);
        assert_eq!(surface.alpha, 1.0);
        assert!(surface.glow.is_none());
    }

    #[test]
    fn test_background_ticks_independently() {
        let settings = VisualSettings::default();
        let mut bg = AnimationScheduler::with_rng(BackgroundLayer::default(), StdRng::seed_from_u64(6));
        bg.start();
        bg.on_resize(800.0, 600.0, 3.0);
        assert_eq!(bg.size().map(|s| s.pixel_ratio), Some(1.5));

        let before = bg.layer().blobs.blobs().to_vec();
        bg.on_frame(&TickInput::new(None, false, &settings));
        assert_ne!(bg.layer().blobs.blobs(), before.as_slice());
    }
}
