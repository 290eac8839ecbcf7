//! LRC parser
//!
//! Supports the common `[mm:ss.xx]text` form with line-level timing:
//! - several leading timestamps on one line (`[00:12.50][01:30.00]chorus`)
//! - fractions of 1, 2 or 3 digits (tenths, centiseconds, milliseconds)
//! - `:` as fraction separator (`[mm:ss:xx]`)
//! - the `[offset:+/-ms]` tag; other metadata tags are skipped
//! - a second line with the same file timestamp becomes the translation
//!   of the first

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound for parsed times (999:59.999)
const MAX_TIME_MS: u64 = 59_999_999;

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{1,3}):(\d{1,2})[.:](\d{1,3})\]").expect("valid regex")
});

static META_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([A-Za-z]+):([^\]]*)\]\s*$").expect("valid regex")
});

/// One timestamped line as it appears in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Start time in milliseconds
    pub time_ms: u64,
    pub text: String,
    pub translation: Option<String>,
}

impl RawLine {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
            translation: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }
}

/// Parse a leading timestamp, returning bytes consumed and the time in ms
fn parse_time(src: &str) -> Option<(usize, u64)> {
    let caps = TIMESTAMP.captures(src)?;
    let min: u64 = caps[1].parse().ok()?;
    let sec: u64 = caps[2].parse().ok()?;
    let frac = &caps[3];
    let mut ms: u64 = frac.parse().ok()?;
    match frac.len() {
        1 => ms *= 100,
        2 => ms *= 10,
        _ => {}
    }
    let consumed = caps.get(0).map(|m| m.end())?;
    Some((consumed, (min * 60_000 + sec * 1_000 + ms).min(MAX_TIME_MS)))
}

/// Parse a single line, which may carry several timestamps
fn parse_line(line: &str) -> Vec<RawLine> {
    let line = line.trim();
    let mut times = Vec::new();
    let mut pos = 0;

    while let Some((consumed, time)) = parse_time(&line[pos..]) {
        times.push(time);
        pos += consumed;
    }

    if times.is_empty() {
        return Vec::new();
    }

    let text = line[pos..].trim();
    if text.is_empty() {
        return Vec::new();
    }

    times
        .into_iter()
        .map(|time_ms| RawLine::new(time_ms, text))
        .collect()
}

/// Value of an `[offset:...]` tag in milliseconds
fn parse_offset(line: &str) -> Option<i64> {
    let caps = META_TAG.captures(line.trim())?;
    if !caps[1].eq_ignore_ascii_case("offset") {
        return None;
    }
    caps[2].trim().trim_start_matches('+').parse().ok()
}

/// Parse LRC content into lines sorted by time
///
/// Blank-text lines and anything that is not a timestamped line are dropped.
/// A positive `[offset]` makes every line appear earlier.
pub fn parse_lrc(src: &str) -> Vec<RawLine> {
    let mut offset_ms = 0i64;
    let mut result = Vec::new();

    for line in src.lines() {
        if let Some(offset) = parse_offset(line) {
            offset_ms = offset;
            continue;
        }
        result.extend(parse_line(line));
    }

    // Pair on file timestamps, before the offset can make distinct lines collide
    result.sort_by_key(|l| l.time_ms);
    let mut result = pair_translations(result);

    if offset_ms != 0 {
        for line in &mut result {
            line.time_ms = apply_offset(line.time_ms, offset_ms);
        }
    }

    // Stable: lines sharing a timestamp keep file order
    result.sort_by_key(|l| l.time_ms);

    tracing::debug!("Parsed {} LRC lines (offset {} ms)", result.len(), offset_ms);
    result
}

/// Fold the second line of each same-timestamp run into the first
///
/// Only the second line is taken; third and later lines stay as lyrics.
/// `lines` must be sorted by time.
fn pair_translations(lines: Vec<RawLine>) -> Vec<RawLine> {
    let mut paired: Vec<RawLine> = Vec::with_capacity(lines.len());
    let mut run_len = 0usize;

    for line in lines {
        match paired.last_mut() {
            Some(prev) if prev.time_ms == line.time_ms => {
                run_len += 1;
                if run_len == 2 && prev.translation.is_none() {
                    prev.translation = Some(line.text);
                } else {
                    paired.push(line);
                }
            }
            _ => {
                run_len = 1;
                paired.push(line);
            }
        }
    }
    paired
}

fn apply_offset(time_ms: u64, offset_ms: i64) -> u64 {
    if offset_ms >= 0 {
        time_ms.saturating_sub(offset_ms.unsigned_abs())
    } else {
        time_ms.saturating_add(offset_ms.unsigned_abs()).min(MAX_TIME_MS)
    }
}
