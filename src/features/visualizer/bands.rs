//! Band energy extraction
//!
//! Reduces one frequency frame (byte magnitudes per FFT bin) to three
//! normalized scalars that drive every particle system.

use std::ops::RangeInclusive;

/// Bins averaged for the bass band
pub const BASS_BINS: RangeInclusive<usize> = 0..=7;
/// Bins averaged for the mid band
pub const MID_BINS: RangeInclusive<usize> = 20..=79;
/// Bins averaged for the high band
pub const HIGH_BINS: RangeInclusive<usize> = 80..=149;

/// Per-bin magnitudes (0-255) captured for a single tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyFrame {
    bins: Vec<u8>,
}

impl FrequencyFrame {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Magnitude of a bin, or 0 when the bin does not exist
    pub fn magnitude(&self, bin: usize) -> u8 {
        self.bins.get(bin).copied().unwrap_or(0)
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }
}

/// Normalized energy of the three bands, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandEnergy {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandEnergy {
    pub const SILENT: BandEnergy = BandEnergy {
        bass: 0.0,
        mid: 0.0,
        high: 0.0,
    };

    /// Extract band energies; an absent frame means silence
    pub fn extract(frame: Option<&FrequencyFrame>) -> Self {
        let Some(frame) = frame else {
            return Self::SILENT;
        };

        Self {
            bass: band_average(frame, BASS_BINS),
            mid: band_average(frame, MID_BINS),
            high: band_average(frame, HIGH_BINS),
        }
    }
}

/// Average over a fixed bin range; bins past the end of the frame count as zero
fn band_average(frame: &FrequencyFrame, range: RangeInclusive<usize>) -> f32 {
    let count = range.clone().count();
    if count == 0 {
        return 0.0;
    }
    let sum: u32 = range.map(|bin| u32::from(frame.magnitude(bin))).sum();
    (sum as f32 / count as f32 / 255.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_absent_frame_is_silent() {
        assert_eq!(BandEnergy::extract(None), BandEnergy::SILENT);
    }

    #[test]
    fn test_full_scale_frame() {
        let frame = FrequencyFrame::new(vec![255; 1024]);
        let bands = BandEnergy::extract(Some(&frame));
        assert_eq!(bands.bass, 1.0);
        assert_eq!(bands.mid, 1.0);
        assert_eq!(bands.high, 1.0);
    }

    #[test]
    fn test_bands_stay_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let len = rng.random_range(0..300);
            let bins = (0..len).map(|_| rng.random::<u8>()).collect();
            let bands = BandEnergy::extract(Some(&FrequencyFrame::new(bins)));
            for value in [bands.bass, bands.mid, bands.high] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_short_frame_pads_with_silence() {
        // Only the first 4 of the 8 bass bins exist
        let frame = FrequencyFrame::new(vec![255; 4]);
        let bands = BandEnergy::extract(Some(&frame));
        assert!((bands.bass - 0.5).abs() < 1e-6);
        assert_eq!(bands.mid, 0.0);
        assert_eq!(bands.high, 0.0);
    }

    #[test]
    fn test_bands_are_independent() {
        let mut bins = vec![0u8; 256];
        for bin in MID_BINS {
            bins[bin] = 255;
        }
        let bands = BandEnergy::extract(Some(&FrequencyFrame::new(bins)));
        assert_eq!(bands.bass, 0.0);
        assert_eq!(bands.mid, 1.0);
        assert_eq!(bands.high, 0.0);
    }
}
