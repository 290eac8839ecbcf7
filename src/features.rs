//! Feature modules - core logic separated from UI
//!
//! Each feature module contains the logic for one concern and can be
//! tested without a window. Rendering goes through the `Surface` trait.

pub mod keybindings;
pub mod lyrics;
pub mod media;
pub mod settings;
pub mod visualizer;

pub use keybindings::{Action, KeyBindings};
pub use settings::VisualSettings;
