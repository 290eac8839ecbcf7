//! [`Surface`] implementation over an iced canvas frame
//!
//! The canvas has no composite modes, no shadow blur and no radial
//! gradient, so those are approximated:
//! - additive blending is ignored, fills composite normally
//! - glow draws a few widening translucent halos under each fill
//! - radial gradients are stacked rings, with ring count scaled by the
//!   surface pixel ratio

use iced::widget::canvas::{Fill, Frame, Gradient, Path, Style, fill, gradient};
use iced::{Color, Point, Size};

use crate::features::visualizer::surface::sample_stops;
use crate::features::visualizer::{BlendMode, ColorStop, Glow, Rgba, Surface};

/// Halo layers drawn per glowing fill
const GLOW_LAYERS: usize = 3;

/// Alpha of the innermost halo relative to the glow color
const GLOW_ALPHA: f32 = 0.18;

/// Ring width of a radial gradient, in physical pixels
const RING_WIDTH: f32 = 3.0;

const MAX_RINGS: usize = 48;

pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
    pixel_ratio: f32,
    alpha: f32,
    glow: Option<Glow>,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame, pixel_ratio: f32) -> Self {
        Self {
            frame,
            pixel_ratio: pixel_ratio.max(1.0),
            alpha: 1.0,
            glow: None,
        }
    }

    fn color(&self, color: Rgba) -> Color {
        Color::from_rgba(color.r, color.g, color.b, color.a * self.alpha)
    }

    /// Spread and color of each halo, outermost first
    fn halo_layers(&self) -> impl Iterator<Item = (f32, Color)> + '_ {
        let glow = self.glow.filter(|g| g.radius > 0.0 && g.color.a > 0.0);
        glow.into_iter().flat_map(move |glow| {
            (0..GLOW_LAYERS).map(move |i| {
                let t = (GLOW_LAYERS - i) as f32 / GLOW_LAYERS as f32;
                let alpha = glow.color.a * GLOW_ALPHA * (1.0 - t * 0.5);
                (glow.radius * t * 0.5, self.color(glow.color.with_alpha(alpha)))
            })
        })
    }

    fn ring_count(&self, radius: f32) -> usize {
        ((radius * self.pixel_ratio / RING_WIDTH).ceil() as usize).clamp(2, MAX_RINGS)
    }
}

impl Surface for FrameSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.frame.width(), self.frame.height())
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    // No composite modes on the canvas
    fn set_blend_mode(&mut self, _mode: BlendMode) {}

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let halos: Vec<_> = self.halo_layers().collect();
        for (spread, halo) in halos {
            self.frame.fill_rectangle(
                Point::new(x - spread, y - spread),
                Size::new(width + spread * 2.0, height + spread * 2.0),
                halo,
            );
        }
        let color = self.color(color);
        self.frame
            .fill_rectangle(Point::new(x, y), Size::new(width, height), color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let center = Point::new(cx, cy);
        let halos: Vec<_> = self.halo_layers().collect();
        for (spread, halo) in halos {
            self.frame.fill(&Path::circle(center, radius + spread), halo);
        }
        let color = self.color(color);
        self.frame.fill(&Path::circle(center, radius), color);
    }

    fn fill_linear_gradient(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        from: (f32, f32),
        to: (f32, f32),
        stops: &[ColorStop],
    ) {
        if width <= 0.0 || height <= 0.0 || stops.is_empty() {
            return;
        }
        let linear = stops.iter().fold(
            gradient::Linear::new(Point::new(from.0, from.1), Point::new(to.0, to.1)),
            |linear, stop| linear.add_stop(stop.offset, self.color(stop.color)),
        );
        self.frame.fill_rectangle(
            Point::new(x, y),
            Size::new(width, height),
            Fill::from(Gradient::Linear(linear)),
        );
    }

    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[ColorStop]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let center = Point::new(cx, cy);
        let rings = self.ring_count(radius);

        for ring in 0..rings {
            let outer = radius * (rings - ring) as f32 / rings as f32;
            let inner = radius * (rings - ring - 1) as f32 / rings as f32;
            let mid = (outer + inner) * 0.5 / radius;
            let color = self.color(sample_stops(stops, mid));
            if color.a <= 0.0 {
                continue;
            }

            let path = Path::new(|builder| {
                builder.circle(center, outer);
                if inner > 0.0 {
                    builder.circle(center, inner);
                }
            });
            self.frame.fill(
                &path,
                Fill {
                    style: Style::Solid(color),
                    rule: fill::Rule::EvenOdd,
                },
            );
        }
    }
}
