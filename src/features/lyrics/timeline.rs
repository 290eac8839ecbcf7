//! Lyric timeline normalization
//!
//! Turns parsed lines into a gapless sequence of `(start, duration)`
//! intervals. Long instrumental gaps get a short "•••" marker line so a
//! stale lyric never lingers on screen.

use super::parser::RawLine;

/// Duration given to the last line
pub const DEFAULT_LAST_DURATION_MS: u64 = 5_000;
/// Gaps longer than this are treated as instrumental breaks
pub const INTERLUDE_GAP_MS: u64 = 10_000;
/// Length of the marker line inserted before the next lyric
pub const INTERLUDE_MARKER_MS: u64 = 2_000;
/// Floor for degenerate or non-positive durations
pub const MIN_DURATION_MS: u64 = 2_000;
pub const INTERLUDE_TEXT: &str = "•••";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    #[default]
    Lyric,
    /// Synthetic marker for an instrumental break
    Interlude,
}

/// A normalized lyric line. Times are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricLine {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub text: String,
    /// Second text that shared this line's file timestamp, usually a translation
    pub translation: Option<String>,
    pub kind: LineKind,
}

impl LyricLine {
    pub fn new(start_ms: u64, duration_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            duration_ms,
            text: text.into(),
            ..Default::default()
        }
    }

    fn interlude(start_ms: u64, duration_ms: u64) -> Self {
        Self {
            kind: LineKind::Interlude,
            ..Self::new(start_ms, duration_ms, INTERLUDE_TEXT)
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Start in seconds
    pub fn start(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Whether `time` (seconds) falls in `[start, start + duration)`
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start() && time < self.end_ms() as f64 / 1000.0
    }

    pub fn is_interlude(&self) -> bool {
        self.kind == LineKind::Interlude
    }
}

/// Build the timeline from parsed lines
///
/// Every non-blank line is kept. Lines sharing a start get a zero gap here
/// and the [`MIN_DURATION_MS`] floor from [`normalize`].
pub fn build(raw: &[RawLine]) -> Vec<LyricLine> {
    let mut sorted: Vec<&RawLine> = raw.iter().filter(|l| !l.text.trim().is_empty()).collect();
    sorted.sort_by_key(|l| l.time_ms);

    let mut pending: Vec<LyricLine> = sorted
        .into_iter()
        .map(|l| LyricLine {
            translation: l.translation.as_deref().map(str::trim).map(str::to_string),
            ..LyricLine::new(l.time_ms, 0, l.text.trim())
        })
        .collect();

    let mut lines = Vec::with_capacity(pending.len() + 4);
    let count = pending.len();
    for i in 0..count {
        let next_start = pending.get(i + 1).map(|l| l.start_ms);
        let mut line = std::mem::take(&mut pending[i]);

        match next_start {
            Some(next) => {
                let gap = next.saturating_sub(line.start_ms);
                if gap > INTERLUDE_GAP_MS {
                    line.duration_ms = gap - INTERLUDE_MARKER_MS;
                    let marker_start = line.end_ms();
                    lines.push(line);
                    lines.push(LyricLine::interlude(marker_start, INTERLUDE_MARKER_MS));
                    continue;
                }
                line.duration_ms = gap;
            }
            None => line.duration_ms = DEFAULT_LAST_DURATION_MS,
        }
        lines.push(line);
    }

    normalize(&mut lines);
    lines
}

/// Re-derive durations from adjacent starts
///
/// Idempotent. Non-positive gaps get [`MIN_DURATION_MS`]; the last line
/// keeps its own duration when it has one.
pub fn normalize(lines: &mut [LyricLine]) {
    lines.sort_by_key(|l| l.start_ms);
    let count = lines.len();
    for i in 0..count {
        let derived = match lines.get(i + 1) {
            Some(next) => next.start_ms.saturating_sub(lines[i].start_ms),
            None if lines[i].duration_ms > 0 => lines[i].duration_ms,
            None => DEFAULT_LAST_DURATION_MS,
        };
        lines[i].duration_ms = if derived == 0 { MIN_DURATION_MS } else { derived };
    }
}

/// A normalized lyric set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricTimeline {
    lines: Vec<LyricLine>,
}

impl LyricTimeline {
    pub fn from_raw(raw: &[RawLine]) -> Self {
        let lines = build(raw);
        let interludes = lines.iter().filter(|l| l.is_interlude()).count();
        tracing::debug!(
            "Built lyric timeline: {} lines, {} interlude markers",
            lines.len(),
            interludes
        );
        Self { lines }
    }

    pub fn from_lrc(src: &str) -> Self {
        Self::from_raw(&super::parser::parse_lrc(src))
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }
}
