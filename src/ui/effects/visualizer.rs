//! Particle and spectrum bar canvas

use iced::widget::canvas::{self, Canvas, Geometry};
use iced::{Element, Fill, Rectangle, Renderer, Theme, mouse};

use crate::features::settings::VisualSettings;
use crate::features::visualizer::{AnimationScheduler, EffectsLayer};

/// Transparent overlay drawing rain, bokeh, fireworks and the bars
pub struct EffectsCanvas<'a> {
    scheduler: &'a AnimationScheduler<EffectsLayer>,
    settings: &'a VisualSettings,
}

impl<'a> EffectsCanvas<'a> {
    pub fn new(
        scheduler: &'a AnimationScheduler<EffectsLayer>,
        settings: &'a VisualSettings,
    ) -> Self {
        Self {
            scheduler,
            settings,
        }
    }

    pub fn view<Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self).width(Fill).height(Fill).into()
    }
}

impl<Message> canvas::Program<Message> for EffectsCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        vec![super::draw_layer(
            self.scheduler,
            self.settings,
            renderer,
            bounds,
            None,
        )]
    }
}
