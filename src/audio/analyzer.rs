//! Real-time frequency analysis of the playing track
//!
//! A rodio source wrapper taps the decoded samples, mixes them down to
//! mono and runs a 2048-point FFT every 1024 samples (50% overlap). Each
//! result is smoothed over time and quantized to one byte per bin:
//! - Hann window, magnitudes divided by N
//! - temporal smoothing 0.8
//! - -100 dB maps to 0, -30 dB maps to 255

use parking_lot::RwLock;
use rodio::Source;
use spectrum_analyzer::scaling::divide_by_N;
use spectrum_analyzer::windows::hann_window;
use spectrum_analyzer::{FrequencyLimit, samples_fft_to_spectrum};
use std::sync::Arc;
use std::time::Duration;

use crate::features::visualizer::FrequencyFrame;

/// FFT size in samples
pub const FFT_SIZE: usize = 2048;

/// Number of byte magnitudes per frame
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// Weight of the previous magnitude when smoothing
const SMOOTHING: f32 = 0.8;

/// Decibel floor, maps to 0
const MIN_DB: f32 = -100.0;

/// Decibel ceiling, maps to 255
const MAX_DB: f32 = -30.0;

/// Shared analysis result, readable from the UI thread
#[derive(Clone, Default)]
pub struct FrequencyAnalyzer {
    inner: Arc<RwLock<AnalyzerInner>>,
}

#[derive(Default)]
struct AnalyzerInner {
    /// Smoothed linear magnitude per bin
    smoothed: Vec<f32>,
    /// Latest quantized frame, absent until the first FFT completes
    frame: Option<FrequencyFrame>,
}

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest frame, or `None` before any audio has been analyzed
    pub fn frame(&self) -> Option<FrequencyFrame> {
        self.inner.read().frame.clone()
    }

    /// Drop all history (call on seek and stop)
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.smoothed.clear();
        inner.frame = None;
    }

    /// Run one FFT over `samples` (mono, `FFT_SIZE` long) and publish the frame
    fn analyze(&self, samples: &[f32], sample_rate: u32) {
        let windowed = hann_window(samples);
        let spectrum = match samples_fft_to_spectrum(
            &windowed,
            sample_rate,
            FrequencyLimit::All,
            Some(&divide_by_N),
        ) {
            Ok(spectrum) => spectrum,
            Err(e) => {
                tracing::trace!("Skipping FFT window: {:?}", e);
                return;
            }
        };

        let mut inner = self.inner.write();
        if inner.smoothed.len() != BIN_COUNT {
            inner.smoothed = vec![0.0; BIN_COUNT];
        }

        let mut bins = Vec::with_capacity(BIN_COUNT);
        for (slot, (_, magnitude)) in inner.smoothed.iter_mut().zip(spectrum.data().iter()) {
            *slot = SMOOTHING * *slot + (1.0 - SMOOTHING) * magnitude.val();
            bins.push(magnitude_to_byte(*slot));
        }
        bins.resize(BIN_COUNT, 0);

        inner.frame = Some(FrequencyFrame::new(bins));
    }
}

/// Linear magnitude to a byte over the configured decibel window
fn magnitude_to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 || !magnitude.is_finite() {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - MIN_DB) / (MAX_DB - MIN_DB);
    scaled.clamp(0.0, 255.0) as u8
}

/// Source wrapper feeding the analyzer
pub struct AnalyzingSource<S>
where
    S: Source<Item = f32>,
{
    source: S,
    analyzer: FrequencyAnalyzer,
    /// Mono samples waiting for the next FFT
    buffer: Vec<f32>,
    /// Running sum of the current interleaved frame
    frame_sum: f32,
    channel: u16,
}

impl<S> AnalyzingSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(source: S, analyzer: FrequencyAnalyzer) -> Self {
        Self {
            source,
            analyzer,
            buffer: Vec::with_capacity(FFT_SIZE),
            frame_sum: 0.0,
            channel: 0,
        }
    }

    fn push_sample(&mut self, sample: f32) {
        let channels = self.source.channels().max(1);
        self.frame_sum += sample;
        self.channel += 1;
        if self.channel < channels {
            return;
        }

        self.buffer.push(self.frame_sum / channels as f32);
        self.frame_sum = 0.0;
        self.channel = 0;

        if self.buffer.len() >= FFT_SIZE {
            self.analyzer
                .analyze(&self.buffer[..FFT_SIZE], self.source.sample_rate());
            self.buffer.drain(..FFT_SIZE / 2);
        }
    }
}

impl<S> Iterator for AnalyzingSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        self.push_sample(sample);
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S> Source for AnalyzingSource<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.source.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.source.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.buffer.clear();
        self.frame_sum = 0.0;
        self.channel = 0;
        self.analyzer.reset();
        self.source.try_seek(pos)
    }
}
