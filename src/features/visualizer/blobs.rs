//! Ambient background blobs
//!
//! A handful of large radial gradients drifting on slow elliptical paths.
//! Bass energy speeds up the drift and pulses their size and opacity.

use std::f32::consts::TAU;

use rand::Rng;

use super::bands::BandEnergy;
use super::color::ColorMode;
use super::surface::{BlendMode, ColorStop, Surface};

pub const BLOB_COUNT: usize = 5;
/// Phase speed multiplier gained at full bass
pub const BASS_PHASE_BOOST: f32 = 2.0;
/// Radius growth at full bass
pub const BASS_PULSE: f32 = 0.3;
pub const BASE_OPACITY: f32 = 0.15;
pub const BASS_OPACITY: f32 = 0.25;

/// Amplitude of the elliptical drift in logical pixels
const DRIFT: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub phase: f32,
    pub phase_speed: f32,
    /// Position of this blob along the color sweep
    pub tint: f32,
}

impl Blob {
    fn spawn(rng: &mut impl Rng, index: usize, width: f32, height: f32) -> Self {
        let short_side = width.min(height).max(1.0);
        Self {
            x: rng.random::<f32>() * width,
            y: rng.random::<f32>() * height,
            vx: rng.random_range(-0.3..0.3),
            vy: rng.random_range(-0.3..0.3),
            radius: rng.random_range(0.3..0.6) * short_side,
            phase: rng.random::<f32>() * TAU,
            phase_speed: rng.random_range(0.002..0.008),
            tint: index as f32 / BLOB_COUNT as f32,
        }
    }

    /// Radius after the bass pulse
    pub fn pulsed_radius(&self, bands: BandEnergy) -> f32 {
        self.radius * (1.0 + BASS_PULSE * bands.bass)
    }
}

pub fn blob_opacity(bands: BandEnergy) -> f32 {
    BASE_OPACITY + BASS_OPACITY * bands.bass
}

fn wrap(value: f32, limit: f32, margin: f32) -> f32 {
    if value < -margin {
        limit + margin
    } else if value > limit + margin {
        -margin
    } else {
        value
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlobField {
    blobs: Vec<Blob>,
    /// Bands seen on the last tick, used for the pulse when drawing
    last_bands: BandEnergy,
}

impl BlobField {
    pub fn init(&mut self, rng: &mut impl Rng, width: f32, height: f32) {
        self.blobs = (0..BLOB_COUNT)
            .map(|i| Blob::spawn(rng, i, width, height))
            .collect();
        self.last_bands = BandEnergy::SILENT;
    }

    pub fn is_initialized(&self) -> bool {
        !self.blobs.is_empty()
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn update(&mut self, bands: BandEnergy, width: f32, height: f32) {
        let rate = 1.0 + BASS_PHASE_BOOST * bands.bass;
        for blob in &mut self.blobs {
            blob.phase = (blob.phase + blob.phase_speed * rate) % TAU;
            blob.x += blob.phase.cos() * DRIFT + blob.vx;
            blob.y += blob.phase.sin() * DRIFT + blob.vy;

            let margin = blob.radius;
            blob.x = wrap(blob.x, width, margin);
            blob.y = wrap(blob.y, height, margin);
        }
        self.last_bands = bands;
    }

    pub fn draw(&self, surface: &mut dyn Surface, mode: &ColorMode) {
        let opacity = blob_opacity(self.last_bands);
        surface.set_blend_mode(BlendMode::Additive);
        surface.set_glow(None);

        for blob in &self.blobs {
            let hue = match mode {
                ColorMode::Rainbow => mode.at_fraction(blob.tint),
                ColorMode::Custom(base) => base.rotate((blob.tint - 0.5) * 40.0),
            };
            let stops = [
                ColorStop::new(0.0, hue.to_rgba(opacity)),
                ColorStop::new(0.5, hue.to_rgba(opacity * 0.4)),
                ColorStop::new(1.0, hue.to_rgba(0.0)),
            ];
            surface.fill_radial_gradient(blob.x, blob.y, blob.pulsed_radius(self.last_bands), &stops);
        }

        surface.set_blend_mode(BlendMode::Normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::visualizer::surface::recording::{DrawOp, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field() -> BlobField {
        let mut rng = StdRng::seed_from_u64(31);
        let mut blobs = BlobField::default();
        blobs.init(&mut rng, 1280.0, 720.0);
        blobs
    }

    #[test]
    fn test_fixed_count() {
        let mut blobs = field();
        for _ in 0..2_000 {
            blobs.update(BandEnergy::SILENT, 1280.0, 720.0);
        }
        assert_eq!(blobs.blobs().len(), BLOB_COUNT);
    }

    #[test]
    fn test_bass_speeds_up_phase() {
        let mut quiet = field();
        let mut loud = quiet.clone();
        let before: Vec<f32> = quiet.blobs().iter().map(|b| b.phase).collect();

        quiet.update(BandEnergy::SILENT, 1280.0, 720.0);
        loud.update(
            BandEnergy {
                bass: 1.0,
                ..BandEnergy::SILENT
            },
            1280.0,
            720.0,
        );

        for ((q, l), b) in quiet.blobs().iter().zip(loud.blobs()).zip(before) {
            let dq = (q.phase - b).rem_euclid(TAU);
            let dl = (l.phase - b).rem_euclid(TAU);
            assert!((dl - dq * 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_positions_wrap_around_edges() {
        let mut blobs = field();
        for _ in 0..20_000 {
            blobs.update(BandEnergy::SILENT, 1280.0, 720.0);
            for b in blobs.blobs() {
                assert!(b.x >= -b.radius - 2.0 && b.x <= 1280.0 + b.radius + 2.0);
                assert!(b.y >= -b.radius - 2.0 && b.y <= 720.0 + b.radius + 2.0);
            }
        }
    }

    #[test]
    fn test_bass_pulses_size_and_opacity() {
        let loud = BandEnergy {
            bass: 1.0,
            ..BandEnergy::SILENT
        };
        assert!((blob_opacity(BandEnergy::SILENT) - 0.15).abs() < 1e-6);
        assert!((blob_opacity(loud) - 0.4).abs() < 1e-6);

        let blobs = field();
        let b = &blobs.blobs()[0];
        assert!((b.pulsed_radius(loud) - b.radius * 1.3).abs() < 1e-3);
    }

    #[test]
    fn test_draw_one_gradient_per_blob() {
        let blobs = field();
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        blobs.draw(&mut surface, &ColorMode::Rainbow);
        let gradients = surface
            .calls
            .iter()
            .filter(|c| matches!(c.op, DrawOp::RadialGradient { .. }))
            .count();
        assert_eq!(gradients, BLOB_COUNT);
        assert!(surface.calls.iter().all(|c| c.blend == BlendMode::Additive));
    }
}
