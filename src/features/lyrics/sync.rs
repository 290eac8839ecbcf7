//! Lyric synchronization
//!
//! Finds the active line for the effective playback time and derives the
//! visual classification of every other line from its distance to it.

use super::timeline::{LyricLine, LyricTimeline};
use crate::features::visualizer::color::Rgba;

pub const MAX_BLUR: f32 = 8.0;
pub const BLUR_PER_LINE: f32 = 1.5;
pub const MIN_SCALE: f32 = 0.85;
pub const SCALE_PER_LINE: f32 = 0.05;
/// Opacity of already-sung lines drawn in the highlight color
pub const PAST_OPACITY: f32 = 0.55;
/// Opacity of upcoming lines drawn in white
pub const FUTURE_OPACITY: f32 = 0.4;

/// Playback position plus the user's lyric offset, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    pub position: f64,
    pub offset: f64,
}

impl PlaybackClock {
    pub fn new(position: f64, offset: f64) -> Self {
        Self { position, offset }
    }

    /// Time used for lyric lookup
    pub fn effective(&self) -> f64 {
        self.position + self.offset
    }
}

/// Index of the first line whose interval contains `time`
pub fn active_index(lines: &[LyricLine], time: f64) -> Option<usize> {
    lines.iter().position(|line| line.contains(time))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePhase {
    Past,
    Active,
    Future,
}

/// How a line should look this tick
///
/// Two equal values render identically, which is what [`needs_redraw`]
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVisual {
    pub phase: LinePhase,
    /// Lines between this one and the focus line
    pub distance: usize,
    pub blur: f32,
    pub scale: f32,
    pub color: Rgba,
}

pub fn blur_for(distance: usize) -> f32 {
    (distance as f32 * BLUR_PER_LINE).min(MAX_BLUR)
}

pub fn scale_for(distance: usize) -> f32 {
    (1.0 - distance as f32 * SCALE_PER_LINE).max(MIN_SCALE)
}

impl LineVisual {
    pub fn new(phase: LinePhase, distance: usize, highlight: Rgba) -> Self {
        let color = match phase {
            LinePhase::Active => Rgba::WHITE,
            LinePhase::Past => highlight.with_alpha(PAST_OPACITY),
            LinePhase::Future => Rgba::WHITE.with_alpha(FUTURE_OPACITY),
        };
        Self {
            phase,
            distance,
            blur: blur_for(distance),
            scale: scale_for(distance),
            color,
        }
    }
}

/// Whether a line must be re-rendered after its visual changed from `prev`
///
/// The active line always re-renders because its fill advances every tick.
/// Any other line is skipped unless its phase, distance, color or scale
/// changed.
///
/// This is a contract for renderers that retain per-line output. The iced
/// lyrics page rebuilds its widget tree on every view and does not consult it.
pub fn needs_redraw(prev: Option<&LineVisual>, next: &LineVisual) -> bool {
    next.phase == LinePhase::Active || prev != Some(next)
}

/// Per-tick sync result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActiveLineState {
    pub active: Option<usize>,
    /// The line distances are measured from: the active line, else the last
    /// line that already started, else the first line
    pub focus: usize,
    pub visuals: Vec<LineVisual>,
}

impl ActiveLineState {
    pub fn compute(lines: &[LyricLine], time: f64, highlight: Rgba) -> Self {
        let active = active_index(lines, time);
        let focus = active
            .or_else(|| lines.iter().rposition(|l| l.start() <= time))
            .unwrap_or(0);

        let visuals = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let phase = if Some(i) == active {
                    LinePhase::Active
                } else if line.start() > time {
                    LinePhase::Future
                } else {
                    LinePhase::Past
                };
                LineVisual::new(phase, i.abs_diff(focus), highlight)
            })
            .collect();

        Self {
            active,
            focus,
            visuals,
        }
    }
}

/// Holds a timeline and the sync state derived from the latest time update
#[derive(Debug, Clone, Default)]
pub struct LyricSync {
    timeline: LyricTimeline,
    state: ActiveLineState,
    /// Indices re-rendered by the last update
    dirty: Vec<usize>,
}

impl LyricSync {
    pub fn new(timeline: LyricTimeline) -> Self {
        let dirty = (0..timeline.len()).collect();
        Self {
            timeline,
            state: ActiveLineState::default(),
            dirty,
        }
    }

    pub fn timeline(&self) -> &LyricTimeline {
        &self.timeline
    }

    pub fn state(&self) -> &ActiveLineState {
        &self.state
    }

    pub fn active(&self) -> Option<(usize, &LyricLine)> {
        let index = self.state.active?;
        self.timeline.get(index).map(|line| (index, line))
    }

    pub fn has_lyrics(&self) -> bool {
        !self.timeline.is_empty()
    }

    /// Lines whose rendering changed on the last update, per [`needs_redraw`]
    pub fn dirty(&self) -> &[usize] {
        &self.dirty
    }

    /// Recompute for a new playback time; returns true when anything must redraw
    pub fn update(&mut self, clock: PlaybackClock, highlight: Rgba) -> bool {
        let next = ActiveLineState::compute(self.timeline.lines(), clock.effective(), highlight);

        if next.active != self.state.active {
            tracing::trace!("Active lyric line {:?} -> {:?}", self.state.active, next.active);
        }

        self.dirty = next
            .visuals
            .iter()
            .enumerate()
            .filter(|(i, visual)| needs_redraw(self.state.visuals.get(*i), visual))
            .map(|(i, _)| i)
            .collect();
        self.state = next;
        !self.dirty.is_empty()
    }
}
