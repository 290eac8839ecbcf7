//! Fireworks: bass-triggered rockets that burst into falling sparks

use std::f32::consts::TAU;

use rand::Rng;

use super::bands::BandEnergy;
use super::color::{ColorMode, Hsl};
use super::surface::{BlendMode, Glow, Surface};

/// Launch probability per tick at zero bass
pub const BASE_LAUNCH_CHANCE: f32 = 0.01;
/// Additional launch probability per unit of bass energy
pub const BASS_LAUNCH_CHANCE: f32 = 0.08;
/// Sparks created by one explosion
pub const SPARKS_PER_BURST: usize = 40;
/// Spark alpha lost per tick
pub const SPARK_FADE: f32 = 0.015;
/// Downward acceleration applied to sparks per tick
pub const SPARK_GRAVITY: f32 = 0.15;
/// Downward acceleration applied to rockets per tick
pub const ROCKET_GRAVITY: f32 = 0.12;
/// A rocket bursts once its upward speed falls below this
pub const APEX_SPEED: f32 = 1.0;

/// Horizontal damping; vertical motion is gravity only
const SPARK_DRAG: f32 = 0.98;
const ROCKET_RADIUS: f32 = 2.5;
const SPARK_RADIUS: f32 = 2.0;

/// Launch probability for one tick
pub fn launch_chance(bands: BandEnergy) -> f32 {
    (BASE_LAUNCH_CHANCE + BASS_LAUNCH_CHANCE * bands.bass).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireworkRocket {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Burst height (y coordinate) chosen at launch
    pub target_y: f32,
    pub hue: Hsl,
}

impl FireworkRocket {
    fn launch(rng: &mut impl Rng, width: f32, height: f32, mode: &ColorMode) -> Self {
        let x = rng.random_range(0.1..0.9) * width;
        let hue = match mode {
            ColorMode::Rainbow => mode.at_fraction(rng.random::<f32>()),
            ColorMode::Custom(base) => *base,
        };
        Self {
            x,
            y: height,
            vx: rng.random_range(-1.0..1.0),
            vy: -rng.random_range(10.0..15.0),
            target_y: rng.random_range(0.15..0.5) * height,
            hue,
        }
    }

    /// Advance one tick; true once the rocket should burst
    fn step(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += ROCKET_GRAVITY;
        self.vy > -APEX_SPEED || self.y <= self.target_y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireworkParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub alpha: f32,
    pub hue: Hsl,
}

impl FireworkParticle {
    fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= SPARK_DRAG;
        self.vy += SPARK_GRAVITY;
        self.alpha -= SPARK_FADE;
    }
}

#[derive(Debug, Clone, Default)]
pub struct FireworkSystem {
    rockets: Vec<FireworkRocket>,
    sparks: Vec<FireworkParticle>,
}

impl FireworkSystem {
    pub fn rockets(&self) -> &[FireworkRocket] {
        &self.rockets
    }

    pub fn sparks(&self) -> &[FireworkParticle] {
        &self.sparks
    }

    pub fn clear(&mut self) {
        self.rockets.clear();
        self.sparks.clear();
    }

    /// Launch a rocket now
    pub fn launch(&mut self, rng: &mut impl Rng, width: f32, height: f32, mode: &ColorMode) {
        self.rockets
            .push(FireworkRocket::launch(rng, width, height, mode));
    }

    /// Spawn, advance, burst and cull. Launches only happen while `spawning`.
    pub fn update(
        &mut self,
        rng: &mut impl Rng,
        bands: BandEnergy,
        spawning: bool,
        width: f32,
        height: f32,
        mode: &ColorMode,
    ) {
        if spawning && rng.random_bool(f64::from(launch_chance(bands))) {
            self.launch(rng, width, height, mode);
        }

        let mut bursts = Vec::new();
        self.rockets.retain_mut(|rocket| {
            if rocket.step() {
                bursts.push((rocket.x, rocket.y, rocket.hue));
                false
            } else {
                true
            }
        });

        for (x, y, hue) in bursts {
            self.explode(rng, x, y, hue);
        }

        for spark in &mut self.sparks {
            spark.step();
        }
        self.sparks.retain(|spark| spark.alpha > 0.0);
    }

    fn explode(&mut self, rng: &mut impl Rng, x: f32, y: f32, hue: Hsl) {
        self.sparks.extend((0..SPARKS_PER_BURST).map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random_range(1.0..6.0);
            FireworkParticle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                alpha: 1.0,
                hue: hue.rotate(rng.random_range(-15.0..15.0)),
            }
        }));
    }

    pub fn draw(&self, surface: &mut dyn Surface, glow_radius: f32) {
        surface.set_blend_mode(BlendMode::Additive);

        for rocket in &self.rockets {
            let color = rocket.hue.with_lightness(75.0).to_rgba(1.0);
            surface.set_glow((glow_radius > 0.0).then_some(Glow {
                radius: glow_radius,
                color,
            }));
            surface.fill_circle(rocket.x, rocket.y, ROCKET_RADIUS, color);
        }

        for spark in &self.sparks {
            let color = spark.hue.to_rgba(spark.alpha.clamp(0.0, 1.0));
            surface.set_glow((glow_radius > 0.0).then_some(Glow {
                radius: glow_radius * 0.6,
                color,
            }));
            surface.fill_circle(spark.x, spark.y, SPARK_RADIUS, color);
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

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    #[test]
    fn test_launch_chance_follows_bass() {
        assert!((launch_chance(BandEnergy::SILENT) - 0.01).abs() < 1e-6);
        let loud = BandEnergy {
            bass: 1.0,
            ..BandEnergy::SILENT
        };
        assert!((launch_chance(loud) - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_rocket_bursts_into_fixed_spark_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut fw = FireworkSystem::default();
        fw.launch(&mut rng, W, H, &ColorMode::Rainbow);

        let mut ticks = 0;
        while !fw.rockets().is_empty() {
            fw.update(&mut rng, BandEnergy::SILENT, false, W, H, &ColorMode::Rainbow);
            ticks += 1;
            assert!(ticks < 500, "rocket never burst");
        }
        assert_eq!(fw.sparks().len(), SPARKS_PER_BURST);
    }

    #[test]
    fn test_rocket_bursts_at_or_above_target() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut rocket = FireworkRocket::launch(&mut rng, W, H, &ColorMode::Rainbow);
        let target = rocket.target_y;
        let mut last_y = rocket.y;
        while !rocket.step() {
            assert!(rocket.y < last_y, "rocket must climb until it bursts");
            last_y = rocket.y;
        }
        assert!(rocket.y <= target || rocket.vy > -APEX_SPEED);
    }

    #[test]
    fn test_sparks_fade_linearly_and_are_culled() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut fw = FireworkSystem::default();
        fw.explode(&mut rng, 400.0, 300.0, Hsl::new(30.0, 90.0, 60.0));

        fw.update(&mut rng, BandEnergy::SILENT, false, W, H, &ColorMode::Rainbow);
        for spark in fw.sparks() {
            assert!((spark.alpha - (1.0 - SPARK_FADE)).abs() < 1e-6);
        }

        // 1.0 / 0.015 = 66.7 ticks until every spark is gone
        for _ in 0..70 {
            fw.update(&mut rng, BandEnergy::SILENT, false, W, H, &ColorMode::Rainbow);
        }
        assert!(fw.sparks().is_empty());
    }

    #[test]
    fn test_sparks_fall_under_gravity() {
        let mut spark = FireworkParticle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 1.0,
            hue: Hsl::new(0.0, 0.0, 50.0),
        };
        spark.step();
        spark.step();
        assert!(spark.vy > 0.0);
        assert!(spark.y > 0.0);
    }

    #[test]
    fn test_spark_gravity_is_undamped() {
        let mut spark = FireworkParticle {
            x: 0.0,
            y: 0.0,
            vx: 4.0,
            vy: -3.0,
            alpha: 1.0,
            hue: Hsl::new(0.0, 0.0, 50.0),
        };
        for k in 1..=10 {
            spark.step();
            let expected = -3.0 + SPARK_GRAVITY * k as f32;
            assert!((spark.vy - expected).abs() < 1e-4, "tick {k}: {}", spark.vy);
        }
        // Horizontal speed is still damped
        assert!(spark.vx < 4.0 && spark.vx > 0.0);
    }

    #[test]
    fn test_no_launch_when_not_spawning() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut fw = FireworkSystem::default();
        let loud = BandEnergy {
            bass: 1.0,
            mid: 1.0,
            high: 1.0,
        };
        for _ in 0..1_000 {
            fw.update(&mut rng, loud, false, W, H, &ColorMode::Rainbow);
        }
        assert!(fw.rockets().is_empty());
        assert!(fw.sparks().is_empty());
    }

    #[test]
    fn test_loud_bass_launches_rockets() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut fw = FireworkSystem::default();
        let loud = BandEnergy {
            bass: 1.0,
            ..BandEnergy::SILENT
        };
        let mut launched = false;
        for _ in 0..1_000 {
            fw.update(&mut rng, loud, true, W, H, &ColorMode::Rainbow);
            launched |= !fw.rockets().is_empty() || !fw.sparks().is_empty();
        }
        assert!(launched);
    }

    #[test]
    fn test_custom_mode_uses_configured_hue() {
        let mut rng = StdRng::seed_from_u64(16);
        let base = Hsl::new(120.0, 70.0, 50.0);
        let rocket = FireworkRocket::launch(&mut rng, W, H, &ColorMode::Custom(base));
        assert_eq!(rocket.hue, base);
    }

    #[test]
    fn test_draw_is_additive() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut fw = FireworkSystem::default();
        fw.explode(&mut rng, 10.0, 10.0, Hsl::new(0.0, 90.0, 60.0));
        let mut surface = RecordingSurface::new(W, H);
        fw.draw(&mut surface, 8.0);
        assert_eq!(surface.circles().count(), SPARKS_PER_BURST);
        assert!(surface.calls.iter().all(|c| c.blend == BlendMode::Additive));
    }
}
