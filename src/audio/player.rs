//! Audio player using rodio
//!
//! Plays a single local file through the default output device. The decoded
//! stream is wrapped in an [`AnalyzingSource`] so the visualizer sees the
//! same samples the speakers do.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use super::analyzer::{AnalyzingSource, FrequencyAnalyzer};

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Finished,
}

pub struct AudioPlayer {
    _stream: OutputStream,
    sink: Sink,
    analyzer: FrequencyAnalyzer,
    duration: Option<Duration>,
    /// Position captured at pause time
    paused_position: Option<Duration>,
}

impl AudioPlayer {
    /// Open the default output device and start playing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let stream =
            OutputStreamBuilder::open_default_stream().context("opening audio output")?;

        let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("decoding {:?}", path))?;
        let duration = source.total_duration();

        let analyzer = FrequencyAnalyzer::new();
        let sink = Sink::connect_new(stream.mixer());
        sink.append(AnalyzingSource::new(source, analyzer.clone()));

        tracing::info!("Playing {:?}, duration: {:?}", path, duration);

        Ok(Self {
            _stream: stream,
            sink,
            analyzer,
            duration,
            paused_position: None,
        })
    }

    pub fn analyzer(&self) -> &FrequencyAnalyzer {
        &self.analyzer
    }

    pub fn play(&mut self) {
        self.sink.play();
        self.paused_position = None;
    }

    pub fn pause(&mut self) {
        if self.paused_position.is_none() {
            self.paused_position = Some(self.sink.get_pos());
        }
        self.sink.pause();
    }

    pub fn toggle(&mut self) {
        match self.status() {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Paused => self.play(),
            PlaybackStatus::Finished => {}
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.sink.empty() {
            PlaybackStatus::Finished
        } else if self.sink.is_paused() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status() == PlaybackStatus::Playing
    }

    /// Current playback position, frozen while paused
    pub fn position(&self) -> Duration {
        self.paused_position.unwrap_or_else(|| self.sink.get_pos())
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Seek relative to the current position, clamped to the track
    pub fn seek_by(&mut self, delta_secs: f64) -> Result<Duration> {
        let target = seek_target(self.position(), delta_secs, self.duration());
        self.seek(target)?;
        Ok(target)
    }

    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.sink
            .try_seek(position)
            .map_err(|e| anyhow::anyhow!("seek to {:?} failed: {:?}", position, e))?;
        if self.paused_position.is_some() {
            self.paused_position = Some(position);
        }
        tracing::debug!("Seek to {:?} successful", position);
        Ok(())
    }
}

/// Position `delta_secs` away from `position`, kept inside `[0, duration]`
pub fn seek_target(position: Duration, delta_secs: f64, duration: Option<Duration>) -> Duration {
    let target = (position.as_secs_f64() + delta_secs).max(0.0);
    let target = match duration {
        Some(total) => target.min(total.as_secs_f64()),
        None => target,
    };
    Duration::from_secs_f64(target)
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.sink.stop();
        self.analyzer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_target_clamps_to_track() {
        let secs = Duration::from_secs;
        assert_eq!(seek_target(secs(10), 5.0, Some(secs(60))), secs(15));
        assert_eq!(seek_target(secs(3), -5.0, Some(secs(60))), Duration::ZERO);
        assert_eq!(seek_target(secs(58), 5.0, Some(secs(60))), secs(60));
        assert_eq!(seek_target(secs(58), 5.0, None), secs(63));
    }
}
