//! Lyrics module - parsing, timing and karaoke state
//!
//! - `parser`: LRC parsing
//! - `timeline`: gapless line intervals with interlude markers
//! - `sync`: active line lookup and per-line visual classification
//! - `fill`: per-character wipe of the active line
//! - `interlude`: breathing dots for the interlude marker

pub mod fill;
pub mod interlude;
pub mod parser;
pub mod sync;
pub mod timeline;

pub use fill::{CharFill, LineFill};
pub use interlude::InterludeDots;
pub use parser::{RawLine, parse_lrc};
pub use sync::{ActiveLineState, LinePhase, LineVisual, LyricSync, PlaybackClock};
pub use timeline::{LineKind, LyricLine, LyricTimeline};
