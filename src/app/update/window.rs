// src/app/update/window.rs
//! Window message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    /// Handle window-related messages
    pub fn handle_window(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::WindowResized(size) => {
                let (w, h, dpr) = (size.width, size.height, self.pixel_ratio);
                self.effects.on_resize(w, h, dpr);
                self.background.on_resize(w, h, dpr);
                Some(Task::none())
            }

            Message::Quit => {
                // Cancels pending ticks and detaches resize handling together
                self.effects.stop();
                self.background.stop();
                if let Some(player) = self.audio.as_mut() {
                    player.pause();
                }
                tracing::info!("Exiting");
                Some(iced::exit())
            }

            _ => None,
        }
    }
}
