//! Canvas rendering of the visual layers
//!
//! - `canvas_surface`: the drawing surface backed by an iced canvas frame
//! - `background`: ambient blob layer behind everything else
//! - `visualizer`: particles and spectrum bars on top of the background

pub mod background;
pub mod canvas_surface;
pub mod visualizer;

use iced::widget::canvas::{Frame, Geometry};
use iced::{Rectangle, Renderer};

use crate::features::settings::VisualSettings;
use crate::features::visualizer::{AnimationScheduler, Layer};
use canvas_surface::FrameSurface;

pub use background::BackgroundCanvas;
pub use visualizer::EffectsCanvas;

/// Draw one scheduled layer into a fresh frame covering `bounds`
fn draw_layer<L: Layer>(
    scheduler: &AnimationScheduler<L>,
    settings: &VisualSettings,
    renderer: &Renderer,
    bounds: Rectangle,
    backdrop: Option<iced::Color>,
) -> Geometry {
    let mut frame = Frame::new(renderer, bounds.size());
    if let Some(color) = backdrop {
        frame.fill_rectangle(iced::Point::ORIGIN, bounds.size(), color);
    }

    let pixel_ratio = scheduler.size().map_or(1.0, |s| s.pixel_ratio);
    let mut surface = FrameSurface::new(&mut frame, pixel_ratio);
    scheduler.draw(&mut surface, settings);

    frame.into_geometry()
}
