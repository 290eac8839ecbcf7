//! Application messages

use iced::Size;
use iced::keyboard::{Key, Modifiers};
use iced::time::Instant;

use crate::features::Action;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Animation ============
    /// Display refresh; drives both visual layers and the lyric sync
    Frame(Instant),

    // ============ Window ============
    /// Window opened or resized, logical size
    WindowResized(Size),

    // ============ Keyboard ============
    /// Key pressed (for keybindings)
    KeyPressed(Key, Modifiers),
    /// Execute a keybinding action
    ExecuteAction(Action),

    // ============ Playback ============
    TogglePlayback,
    /// Seek relative to the current position, in seconds
    Seek(f64),
    /// Tear down the layers and exit
    Quit,
}
