//! Main application module

mod message;
mod state;
mod update;
mod view;

use iced::{Task, Theme};

use crate::audio::AudioPlayer;
use crate::cli::Args;
use crate::features::lyrics::PlaybackClock;
use crate::features::visualizer::{AnimationScheduler, BackgroundLayer, EffectsLayer};
use crate::features::{KeyBindings, VisualSettings};
pub use message::Message;
pub use state::App;

impl App {
    /// Create new application instance
    pub fn new(args: &Args) -> (Self, Task<Message>) {
        // 1. Settings: file first, then command-line overrides
        let mut settings = VisualSettings::load(args.settings.as_deref());
        args.apply_to(&mut settings);

        // 2. Audio; without it the visuals still run on silence
        let audio = match AudioPlayer::open(&args.audio) {
            Ok(player) => Some(player),
            Err(e) => {
                tracing::warn!("Audio unavailable, rendering silence: {:#}", e);
                None
            }
        };

        // 3. Lyrics
        let lyrics = Self::load_lyrics(&args.audio, args.lyrics.as_deref());

        // 4. Both layers tick from the first frame on
        let mut effects = AnimationScheduler::new(EffectsLayer::default());
        let mut background = AnimationScheduler::new(BackgroundLayer::default());
        effects.start();
        background.start();

        let track_name = args
            .audio
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.audio.display().to_string());

        let app = Self {
            audio,
            clock: PlaybackClock::new(0.0, settings.lyric_offset),
            settings,
            keybindings: KeyBindings::default(),
            lyrics,
            effects,
            background,
            pixel_ratio: args.pixel_ratio,
            track_name,
            show_help: false,
        };

        (app, Task::none())
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Window title with the track name and playback state
    pub fn title(&self) -> String {
        if self.audio.is_some() && !self.is_playing() {
            format!("glowline - {} (paused)", self.track_name)
        } else {
            format!("glowline - {}", self.track_name)
        }
    }

    /// Subscriptions for refresh ticks, resize and keyboard events
    pub fn subscription(&self) -> iced::Subscription<Message> {
        use iced::keyboard;

        let (needs_frames, needs_resize) = subscription_logic::subscription_decisions(
            self.effects.wants_frames(),
            self.background.wants_frames(),
            self.effects.listens_resize(),
            self.background.listens_resize(),
        );

        // 1. Refresh ticks, only while a layer is running
        let frame_sub = if needs_frames {
            iced::window::frames().map(Message::Frame)
        } else {
            iced::Subscription::none()
        };

        // 2. Resize, detached together with the tick on teardown
        let resize_sub = if needs_resize {
            iced::Subscription::batch([
                iced::event::listen_with(|event, _status, _id| match event {
                    iced::Event::Window(iced::window::Event::Opened { size, .. }) => {
                        Some(Message::WindowResized(size))
                    }
                    _ => None,
                }),
                iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
            ])
        } else {
            iced::Subscription::none()
        };

        // 3. Keyboard events
        let keyboard_sub = keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, modifiers, .. } => {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        });

        iced::Subscription::batch([frame_sub, resize_sub, keyboard_sub])
    }
}

/// Subscription decision logic for testability
pub mod subscription_logic {
    pub fn needs_frame_subscription(effects_running: bool, background_running: bool) -> bool {
        effects_running || background_running
    }

    pub fn needs_resize_subscription(effects_attached: bool, background_attached: bool) -> bool {
        effects_attached || background_attached
    }

    pub fn subscription_decisions(
        effects_running: bool,
        background_running: bool,
        effects_attached: bool,
        background_attached: bool,
    ) -> (bool, bool) {
        (
            needs_frame_subscription(effects_running, background_running),
            needs_resize_subscription(effects_attached, background_attached),
        )
    }
}
