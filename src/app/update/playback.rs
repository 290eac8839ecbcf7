// src/app/update/playback.rs
//! Playback message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    pub fn handle_playback(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::TogglePlayback => {
                match self.audio.as_mut() {
                    Some(player) => {
                        player.toggle();
                        tracing::debug!("Playback status: {:?}", player.status());
                    }
                    None => tracing::debug!("No audio output, ignoring play/pause"),
                }
                Some(Task::none())
            }
            Message::Seek(delta) => {
                if let Some(player) = self.audio.as_mut() {
                    match player.seek_by(*delta) {
                        Ok(position) => tracing::debug!("Seeked to {:.1}s", position.as_secs_f64()),
                        Err(e) => tracing::warn!("Seek failed: {:#}", e),
                    }
                }
                Some(Task::none())
            }
            _ => None,
        }
    }
}
