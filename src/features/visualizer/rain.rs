//! Rain field: a fixed pool of falling streaks whose speed follows the bass

use rand::Rng;

use super::bands::BandEnergy;
use super::color::{Hsl, Rgba};
use super::surface::{BlendMode, Glow, Surface};

/// Number of drops, constant for the lifetime of the field
pub const RAIN_POOL_SIZE: usize = 150;
/// Extra fall speed at full bass energy
pub const BASS_SPEED_BOOST: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub speed: f32,
    pub alpha: f32,
}

impl RainDrop {
    fn spawn(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.random::<f32>() * width,
            y: rng.random::<f32>() * height,
            length: rng.random_range(10.0..30.0),
            speed: rng.random_range(2.0..6.0),
            alpha: rng.random_range(0.1..0.4),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RainField {
    drops: Vec<RainDrop>,
}

impl RainField {
    /// Fill the pool, scattering drops over the whole view
    pub fn init(&mut self, rng: &mut impl Rng, width: f32, height: f32) {
        self.drops = (0..RAIN_POOL_SIZE)
            .map(|_| RainDrop::spawn(rng, width, height))
            .collect();
    }

    pub fn is_initialized(&self) -> bool {
        !self.drops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Advance every drop; drops past the bottom recycle to the top
    pub fn update(&mut self, rng: &mut impl Rng, bands: BandEnergy, width: f32, height: f32) {
        let boost = bands.bass * BASS_SPEED_BOOST;
        for drop in &mut self.drops {
            drop.y += drop.speed + boost;
            if drop.y > height {
                drop.y = -drop.length;
                drop.x = rng.random::<f32>() * width;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, glow_radius: f32, hue: Hsl) {
        surface.set_blend_mode(BlendMode::Additive);
        let tint = hue.with_lightness(80.0);
        surface.set_glow((glow_radius > 0.0).then_some(Glow {
            radius: glow_radius * 0.5,
            color: tint.to_rgba(0.6),
        }));
        for drop in &self.drops {
            let color: Rgba = tint.to_rgba(drop.alpha);
            surface.fill_rect(drop.x, drop.y, 1.5, drop.length, color);
        }
        surface.set_glow(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visualizer::surface::recording::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pool_size_is_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rain = RainField::default();
        rain.init(&mut rng, 800.0, 600.0);
        assert_eq!(rain.len(), RAIN_POOL_SIZE);

        for tick in 0..5_000 {
            let bass = (tick % 100) as f32 / 100.0;
            let bands = BandEnergy {
                bass,
                ..BandEnergy::SILENT
            };
            rain.update(&mut rng, bands, 800.0, 600.0);
            assert_eq!(rain.len(), RAIN_POOL_SIZE);
        }
    }

    #[test]
    fn test_bass_speeds_up_fall() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut quiet = RainField::default();
        quiet.init(&mut rng, 800.0, 1_000.0);
        let mut loud = quiet.clone();

        quiet.update(&mut rng, BandEnergy::SILENT, 800.0, 1.0e9);
        loud.update(
            &mut rng,
            BandEnergy {
                bass: 1.0,
                ..BandEnergy::SILENT
            },
            800.0,
            1.0e9,
        );

        for (q, l) in quiet.drops().iter().zip(loud.drops()) {
            assert!((l.y - q.y - BASS_SPEED_BOOST).abs() < 1e-2);
        }
    }

    #[test]
    fn test_recycled_drop_restarts_above_view() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rain = RainField::default();
        rain.init(&mut rng, 100.0, 50.0);
        for _ in 0..30 {
            rain.update(&mut rng, BandEnergy::SILENT, 100.0, 50.0);
        }
        for drop in rain.drops() {
            assert!(drop.y <= 50.0);
            assert!(drop.y >= -drop.length);
            assert!((0.0..=100.0).contains(&drop.x));
        }
    }

    #[test]
    fn test_draw_one_streak_per_drop() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut rain = RainField::default();
        rain.init(&mut rng, 100.0, 100.0);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        rain.draw(&mut surface, 10.0, Hsl::new(200.0, 80.0, 60.0));
        assert_eq!(surface.rects().count(), RAIN_POOL_SIZE);
        assert!(surface.glow.is_none());
    }
}
