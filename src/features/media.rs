//! Media file discovery
//!
//! Lyrics for the playing track come from one of:
//! 1. An explicitly given LRC file
//! 2. A same-name LRC file next to the audio
//! 3. Lyrics embedded in the audio file's tags

pub mod encoding;
pub mod lyrics;

pub use lyrics::{LyricsSource, find_lyrics, load_lyrics_file};
