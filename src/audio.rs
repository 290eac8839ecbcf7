//! Audio playback module
//!
//! - `AudioPlayer`: rodio playback of one local file
//! - `FrequencyAnalyzer`: per-bin magnitudes tapped from the decoded stream

pub mod analyzer;
mod player;

pub use analyzer::FrequencyAnalyzer;
pub use player::{AudioPlayer, PlaybackStatus};
