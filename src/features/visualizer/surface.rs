//! Immediate-mode drawing surface
//!
//! The visual layers only talk to this trait. The iced canvas adapter in
//! `ui::effects::canvas_surface` implements it for on-screen rendering and
//! tests use [`recording::RecordingSurface`].

use super::color::Rgba;

/// How subsequent fills combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    /// Additive ("lighter"): overlapping fills brighten instead of occluding
    Additive,
}

/// Soft glow applied around subsequent fills
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub radius: f32,
    pub color: Rgba,
}

/// Gradient color stop, `offset` in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Sample a sorted stop list at `t`
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops.last().map(|s| s.color).unwrap_or(Rgba::TRANSPARENT)
}

/// 2D canvas operations the visual layers need
pub trait Surface {
    /// Drawing area in logical units
    fn size(&self) -> (f32, f32);

    /// Alpha multiplier for every subsequent fill, clamped to `0.0..=1.0`
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// `None` disables the glow
    fn set_glow(&mut self, glow: Option<Glow>);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    /// Rectangle filled with a gradient running from `(x0, y0)` to `(x1, y1)`
    #[allow(clippy::too_many_arguments)]
    fn fill_linear_gradient(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        from: (f32, f32),
        to: (f32, f32),
        stops: &[ColorStop],
    );

    /// Disc filled with a gradient radiating from its center
    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[ColorStop]);
}
