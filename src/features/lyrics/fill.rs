//! Per-character karaoke fill for the active line
//!
//! The wipe runs over `fill_ratio` of the line's duration (never less than
//! half a second) so it completes before the next line enters. Each
//! character's transition is delayed by `i * CHAR_DELAY` so the wipe
//! travels across the line instead of snapping.

use super::timeline::LyricLine;

/// Shortest fill animation in seconds
pub const MIN_FILL_SECS: f64 = 0.5;
/// Transition delay added per character index, in seconds
pub const CHAR_DELAY_SECS: f64 = 0.05;
/// Upward offset of a fully filled character, in logical pixels
pub const MAX_RISE: f32 = 3.0;
/// Glow radius around a fully filled character
pub const MAX_GLOW: f32 = 12.0;

/// Seconds the wipe takes for a line of `duration` seconds
pub fn fill_duration(duration: f64, fill_ratio: f32) -> f64 {
    (duration * f64::from(fill_ratio)).max(MIN_FILL_SECS)
}

/// Overall progress in `0.0..=1.0`
pub fn fill_progress(elapsed: f64, fill_duration: f64) -> f32 {
    if fill_duration <= 0.0 {
        return 1.0;
    }
    (elapsed.max(0.0) / fill_duration).clamp(0.0, 1.0) as f32
}

/// Fill of character `index` out of `count` at `progress`
pub fn char_fill(progress: f32, count: usize, index: usize) -> f32 {
    (progress * count as f32 - index as f32).clamp(0.0, 1.0)
}

/// One character of the active line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharFill {
    pub ch: char,
    /// Target fill at the current time
    pub fill: f32,
    /// Fill shown on screen, lagging the target by the character delay
    pub shown: f32,
}

impl CharFill {
    pub fn rise(&self) -> f32 {
        self.shown * MAX_RISE
    }

    pub fn glow(&self) -> f32 {
        self.shown * MAX_GLOW
    }
}

/// Fill state of the active line at effective time `time`
#[derive(Debug, Clone, PartialEq)]
pub struct LineFill {
    pub progress: f32,
    pub chars: Vec<CharFill>,
}

impl LineFill {
    pub fn compute(line: &LyricLine, time: f64, fill_ratio: f32) -> Self {
        let elapsed = (time - line.start()).max(0.0);
        let duration = fill_duration(line.duration(), fill_ratio);
        let progress = fill_progress(elapsed, duration);
        let count = line.text.chars().count();

        let chars = line
            .text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let lagged = fill_progress(elapsed - i as f64 * CHAR_DELAY_SECS, duration);
                CharFill {
                    ch,
                    fill: char_fill(progress, count, i),
                    shown: char_fill(lagged, count, i),
                }
            })
            .collect();

        Self { progress, chars }
    }

    pub fn is_complete(&self) -> bool {
        self.chars.iter().all(|c| c.fill >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATIO: f32 = 0.85;

    #[test]
    fn test_fill_duration_floor() {
        assert!((fill_duration(4.0, RATIO) - 3.4).abs() < 1e-6);
        assert_eq!(fill_duration(0.2, RATIO), MIN_FILL_SECS);
    }

    #[test]
    fn test_start_and_end_of_fill() {
        let line = LyricLine::new(10_000, 4_000, "hello");

        let start = LineFill::compute(&line, 10.0, RATIO);
        assert_eq!(start.progress, 0.0);
        assert!(start.chars.iter().all(|c| c.fill == 0.0 && c.shown == 0.0));

        let before = LineFill::compute(&line, 9.0, RATIO);
        assert!(before.chars.iter().all(|c| c.fill == 0.0));

        let done = LineFill::compute(&line, 10.0 + fill_duration(4.0, RATIO) + 0.01, RATIO);
        assert!(done.is_complete());
        assert!(done.chars.iter().all(|c| c.fill == 1.0));
    }

    #[test]
    fn test_wipe_is_left_to_right() {
        let line = LyricLine::new(0, 2_000, "abcd");
        let half = LineFill::compute(&line, fill_duration(2.0, RATIO) / 2.0, RATIO);
        let fills: Vec<f32> = half.chars.iter().map(|c| c.fill).collect();
        assert_eq!(fills, vec![1.0, 1.0, 0.0, 0.0]);
        assert!(fills.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_char_fill_partial() {
        assert!((char_fill(0.3, 4, 1) - 0.2).abs() < 1e-6);
        assert_eq!(char_fill(0.3, 4, 2), 0.0);
        assert_eq!(char_fill(1.0, 4, 3), 1.0);
    }

    #[test]
    fn test_shown_fill_lags_by_index() {
        let line = LyricLine::new(0, 10_000, "abcdefgh");
        let fill = LineFill::compute(&line, 4.0, RATIO);
        for c in &fill.chars {
            assert!(c.shown <= c.fill);
        }
        // Shown catches up once the delay for the last character has passed
        let late = 10.0 * 0.85 + 8.0 * CHAR_DELAY_SECS;
        let settled = LineFill::compute(&line, late, RATIO);
        assert!(settled.chars.iter().all(|c| c.shown == 1.0));
    }

    #[test]
    fn test_rise_and_glow_follow_fill() {
        let c = CharFill {
            ch: 'x',
            fill: 1.0,
            shown: 0.5,
        };
        assert_eq!(c.rise(), MAX_RISE * 0.5);
        assert_eq!(c.glow(), MAX_GLOW * 0.5);
    }

    #[test]
    fn test_multibyte_text() {
        let line = LyricLine::new(0, 1_000, "你好");
        let fill = LineFill::compute(&line, 0.0, RATIO);
        assert_eq!(fill.chars.len(), 2);
    }
}
