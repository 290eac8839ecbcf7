//! Application state definitions

use std::path::Path;

use crate::audio::AudioPlayer;
use crate::features::lyrics::{LyricSync, LyricTimeline, PlaybackClock};
use crate::features::media::{self, LyricsSource};
use crate::features::visualizer::{AnimationScheduler, BackgroundLayer, EffectsLayer};
use crate::features::{KeyBindings, VisualSettings};

/// Main application state
pub struct App {
    /// `None` when the output device or the file could not be opened
    pub audio: Option<AudioPlayer>,
    pub settings: VisualSettings,
    pub keybindings: KeyBindings,
    pub lyrics: LyricSync,
    pub effects: AnimationScheduler<EffectsLayer>,
    pub background: AnimationScheduler<BackgroundLayer>,
    /// Playback position and lyric offset as of the last frame
    pub clock: PlaybackClock,
    /// Device pixel ratio handed to the layers on resize
    pub pixel_ratio: f32,
    pub track_name: String,
    pub show_help: bool,
}

impl App {
    /// Lyrics for `audio`, or an empty set
    pub(super) fn load_lyrics(audio: &Path, explicit: Option<&Path>) -> LyricSync {
        match media::find_lyrics(audio, explicit) {
            Some((timeline, LyricsSource::File(path))) => {
                tracing::debug!("Using lyrics file {:?}", path);
                LyricSync::new(timeline)
            }
            Some((timeline, LyricsSource::Embedded)) => {
                tracing::debug!("Using lyrics embedded in {:?}", audio);
                LyricSync::new(timeline)
            }
            None => {
                tracing::info!("No lyrics found for {:?}", audio);
                LyricSync::new(LyricTimeline::default())
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.audio.as_ref().is_some_and(|p| p.is_playing())
    }
}
