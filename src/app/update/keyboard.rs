// src/app/update/keyboard.rs
//! Keyboard and action message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::Action;
use crate::features::keybindings::SEEK_STEP;

impl App {
    /// Handle keyboard-related messages
    pub fn handle_keyboard(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::KeyPressed(key, modifiers) => {
                if let Some(action) = self.keybindings.find_action(key, modifiers) {
                    return Some(self.update(Message::ExecuteAction(action)));
                }
                Some(Task::none())
            }

            Message::ExecuteAction(action) => Some(self.execute_action(*action)),

            _ => None,
        }
    }

    /// Execute a keybinding action
    fn execute_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::PlayPause => return self.update(Message::TogglePlayback),
            Action::SeekBack => return self.update(Message::Seek(-SEEK_STEP)),
            Action::SeekForward => return self.update(Message::Seek(SEEK_STEP)),
            Action::Quit => return self.update(Message::Quit),
            Action::ToggleHelp => self.show_help = !self.show_help,
            settings_action => {
                settings_action.apply(&mut self.settings);
                tracing::debug!(
                    "{}: brightness {:.1}, offset {:+.1}s, bar glow {}, effects glow {}",
                    settings_action.display_name(),
                    self.settings.brightness,
                    self.settings.lyric_offset,
                    self.settings.bar_glow,
                    self.settings.effects_glow,
                );
            }
        }
        Task::none()
    }
}
