// src/app/update/animation.rs
//! Per-frame tick of the visual layers and the lyric sync

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::lyrics::PlaybackClock;
use crate::features::visualizer::TickInput;

impl App {
    /// Handle refresh ticks
    pub fn handle_animation(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Frame(_) => {
                self.tick();
                Some(Task::none())
            }
            _ => None,
        }
    }

    fn tick(&mut self) {
        let playing = self.is_playing();
        // A paused or missing player renders silence
        let frame = self
            .audio
            .as_ref()
            .filter(|_| playing)
            .and_then(|p| p.analyzer().frame());

        let input = TickInput::new(frame.as_ref(), playing, &self.settings);
        self.effects.on_frame(&input);
        self.background.on_frame(&input);

        let position = self
            .audio
            .as_ref()
            .map_or(0.0, |p| p.position().as_secs_f64());
        self.clock = PlaybackClock::new(position, self.settings.lyric_offset);

        if self.lyrics.update(self.clock, self.settings.highlight_rgba()) {
            tracing::trace!("{} lyric lines changed", self.lyrics.dirty().len());
        }
    }
}
