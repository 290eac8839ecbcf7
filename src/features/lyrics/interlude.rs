//! Breathing dots shown on the "•••" interlude marker
//!
//! The three dots light up in sequence across the marker's interval while
//! the group breathes, growing in at the start and collapsing at the end.
//! The state is a pure function of the elapsed time, so seeking or pausing
//! needs no bookkeeping.

use std::f32::consts::PI;

/// Length of one breathing cycle
const BREATHE_MS: f32 = 1_500.0;
/// Scale grow-in at the start, capped at a quarter of the interval
const GROW_IN_MS: f32 = 2_000.0;
/// Collapse at the end, capped at a third of the interval
const COLLAPSE_MS: f32 = 750.0;
/// Dots are drawn at this fraction of their nominal size
const BASE_SCALE: f32 = 0.7;
/// Dimmest opacity of an unlit dot
const UNLIT: f32 = 0.25;

fn ease_out_expo(x: f32) -> f32 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * x)
    }
}

fn ease_in_out_back(x: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C2: f32 = C1 * 1.525;

    if x < 0.5 {
        ((2.0 * x).powi(2) * ((C2 + 1.0) * 2.0 * x - C2)) / 2.0
    } else {
        ((2.0 * x - 2.0).powi(2) * ((C2 + 1.0) * (x * 2.0 - 2.0) + C2) + 2.0) / 2.0
    }
}

/// Dot group state at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterludeDots {
    pub scale: f32,
    pub opacities: [f32; 3],
}

impl InterludeDots {
    pub const HIDDEN: InterludeDots = InterludeDots {
        scale: 0.0,
        opacities: [0.0; 3],
    };

    /// State `elapsed_ms` into an interlude lasting `duration_ms`
    pub fn at(elapsed_ms: f32, duration_ms: f32) -> Self {
        if duration_ms <= 0.0 || !(0.0..=duration_ms).contains(&elapsed_ms) {
            return Self::HIDDEN;
        }

        let remaining = duration_ms - elapsed_ms;
        let grow_in = GROW_IN_MS.min(duration_ms / 4.0);
        let collapse = COLLAPSE_MS.min(duration_ms / 3.0);
        let fade_in = grow_in / 2.0;

        // A whole number of breaths fits the interval
        let breathe = duration_ms / (duration_ms / BREATHE_MS).ceil().max(1.0);
        let mut scale = (1.5 * PI - (elapsed_ms / breathe) * 2.0 * PI).sin() / 20.0 + 1.0;

        if elapsed_ms < grow_in {
            scale *= ease_out_expo(elapsed_ms / grow_in);
        }
        if remaining < collapse {
            scale *= 1.0 - ease_in_out_back((collapse - remaining) / collapse / 2.0);
        }

        let mut opacity = (elapsed_ms / fade_in).clamp(0.0, 1.0);
        if remaining < collapse / 2.0 {
            opacity *= (remaining / (collapse / 2.0)).clamp(0.0, 1.0);
        }

        // Dots light one after another over the part before the collapse
        let lit_span = (duration_ms - collapse).max(1.0);
        let mut opacities = [0.0; 3];
        for (i, dot) in opacities.iter_mut().enumerate() {
            let start = lit_span * i as f32 / 3.0;
            let lit = ((elapsed_ms - start) * 3.0 / lit_span * 0.75).clamp(UNLIT, 1.0);
            *dot = lit * opacity;
        }

        Self {
            scale: scale.max(0.0) * BASE_SCALE,
            opacities,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.scale > 0.0 && self.opacities.iter().any(|&o| o > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_outside_interval() {
        assert_eq!(InterludeDots::at(-1.0, 2_000.0), InterludeDots::HIDDEN);
        assert_eq!(InterludeDots::at(2_001.0, 2_000.0), InterludeDots::HIDDEN);
        assert_eq!(InterludeDots::at(10.0, 0.0), InterludeDots::HIDDEN);
    }

    #[test]
    fn test_visible_mid_marker() {
        let dots = InterludeDots::at(1_000.0, 2_000.0);
        assert!(dots.is_visible());
        assert!(dots.scale > 0.0 && dots.scale <= BASE_SCALE * 1.05 + 1e-6);
    }

    #[test]
    fn test_dots_light_in_sequence() {
        let dots = InterludeDots::at(900.0, 2_000.0);
        assert!(dots.opacities[0] >= dots.opacities[1]);
        assert!(dots.opacities[1] >= dots.opacities[2]);
        assert!(dots.opacities[0] > dots.opacities[2]);
    }

    #[test]
    fn test_fades_out_at_end() {
        let near_end = InterludeDots::at(1_999.0, 2_000.0);
        let middle = InterludeDots::at(1_000.0, 2_000.0);
        assert!(near_end.opacities[0] < middle.opacities[0]);
        assert!(near_end.scale < middle.scale);
    }

    #[test]
    fn test_starts_invisible() {
        let start = InterludeDots::at(0.0, 2_000.0);
        assert!(!start.is_visible());
    }
}
