//! Bokeh: soft glows spawned by the mid band that fade in, hold and fade out

use rand::Rng;

use super::bands::BandEnergy;
use super::color::ColorMode;
use super::surface::{BlendMode, ColorStop, Surface};

/// Spawn probability per tick at full mid energy
pub const MID_SPAWN_CHANCE: f32 = 0.15;
/// Ticks spent ramping in and ramping out
pub const FADE_TICKS: u32 = 30;
/// Lifetime bounds in ticks
pub const MIN_LIFE: u32 = 90;
pub const MAX_LIFE: u32 = 150;
/// Upper bound on live glows
pub const MAX_SPARKLES: usize = 80;

const PEAK_ALPHA: f32 = 0.35;

pub fn spawn_chance(bands: BandEnergy) -> f32 {
    (bands.mid * MID_SPAWN_CHANCE).clamp(0.0, 1.0)
}

/// Envelope for a glow of `max_life` ticks at `age`
pub fn envelope(age: u32, max_life: u32) -> f32 {
    if age >= max_life {
        return 0.0;
    }
    let fade_in = age as f32 / FADE_TICKS as f32;
    let fade_out = (max_life - age) as f32 / FADE_TICKS as f32;
    fade_in.min(fade_out).min(1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub age: u32,
    pub max_life: u32,
}

impl Sparkle {
    fn spawn(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.random::<f32>() * width,
            y: rng.random::<f32>() * height,
            vx: rng.random_range(-0.3..0.3),
            vy: rng.random_range(-0.5..0.1),
            radius: rng.random_range(10.0..40.0),
            age: 0,
            max_life: rng.random_range(MIN_LIFE..=MAX_LIFE),
        }
    }

    pub fn alpha(&self) -> f32 {
        envelope(self.age, self.max_life) * PEAK_ALPHA
    }
}

#[derive(Debug, Clone, Default)]
pub struct BokehField {
    sparkles: Vec<Sparkle>,
}

impl BokehField {
    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn clear(&mut self) {
        self.sparkles.clear();
    }

    pub fn update(
        &mut self,
        rng: &mut impl Rng,
        bands: BandEnergy,
        spawning: bool,
        width: f32,
        height: f32,
    ) {
        if spawning
            && self.sparkles.len() < MAX_SPARKLES
            && rng.random_bool(f64::from(spawn_chance(bands)))
        {
            self.sparkles.push(Sparkle::spawn(rng, width, height));
        }

        for sparkle in &mut self.sparkles {
            sparkle.x += sparkle.vx;
            sparkle.y += sparkle.vy;
            sparkle.age += 1;
        }
        self.sparkles.retain(|s| s.age < s.max_life);
    }

    /// Rainbow mode keys the hue to horizontal position
    pub fn draw(&self, surface: &mut dyn Surface, mode: &ColorMode) {
        let (width, _) = surface.size();
        surface.set_blend_mode(BlendMode::Additive);
        surface.set_glow(None);

        for sparkle in &self.sparkles {
            let alpha = sparkle.alpha();
            if alpha <= 0.0 {
                continue;
            }
            let fraction = if width > 0.0 { sparkle.x / width } else { 0.0 };
            let hue = mode.at_fraction(fraction);
            let stops = [
                ColorStop::new(0.0, hue.to_rgba(alpha)),
                ColorStop::new(0.4, hue.to_rgba(alpha * 0.5)),
                ColorStop::new(1.0, hue.to_rgba(0.0)),
            ];
            surface.fill_radial_gradient(sparkle.x, sparkle.y, sparkle.radius, &stops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visualizer::surface::recording::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_envelope_ramps() {
        assert_eq!(envelope(0, 120), 0.0);
        assert!((envelope(15, 120) - 0.5).abs() < 1e-6);
        assert_eq!(envelope(30, 120), 1.0);
        assert_eq!(envelope(60, 120), 1.0);
        assert!((envelope(105, 120) - 0.5).abs() < 1e-6);
        assert_eq!(envelope(120, 120), 0.0);
    }

    #[test]
    fn test_silent_mid_never_spawns() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut bokeh = BokehField::default();
        for _ in 0..1_000 {
            bokeh.update(&mut rng, BandEnergy::SILENT, true, 800.0, 600.0);
        }
        assert!(bokeh.sparkles().is_empty());
    }

    #[test]
    fn test_population_is_capped_and_lifetimes_bounded() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut bokeh = BokehField::default();
        let loud = BandEnergy {
            mid: 1.0,
            ..BandEnergy::SILENT
        };
        for _ in 0..5_000 {
            bokeh.update(&mut rng, loud, true, 800.0, 600.0);
            assert!(bokeh.sparkles().len() <= MAX_SPARKLES);
        }
        assert!(!bokeh.sparkles().is_empty());
        for s in bokeh.sparkles() {
            assert!((MIN_LIFE..=MAX_LIFE).contains(&s.max_life));
            assert!(s.age < s.max_life);
        }
    }

    #[test]
    fn test_existing_glows_decay_after_spawning_stops() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut bokeh = BokehField::default();
        let loud = BandEnergy {
            mid: 1.0,
            ..BandEnergy::SILENT
        };
        for _ in 0..200 {
            bokeh.update(&mut rng, loud, true, 800.0, 600.0);
        }
        for _ in 0..MAX_LIFE {
            bokeh.update(&mut rng, loud, false, 800.0, 600.0);
        }
        assert!(bokeh.sparkles().is_empty());
    }

    #[test]
    fn test_draws_radial_glows() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut bokeh = BokehField::default();
        bokeh.sparkles.push(Sparkle::spawn(&mut rng, 100.0, 100.0));
        bokeh.sparkles[0].age = 40;
        let mut surface = RecordingSurface::new(100.0, 100.0);
        bokeh.draw(&mut surface, &ColorMode::Rainbow);
        assert_eq!(surface.calls.len(), 1);
        assert_eq!(surface.calls[0].blend, BlendMode::Additive);
    }
}
