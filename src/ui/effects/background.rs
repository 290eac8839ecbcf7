//! Ambient background canvas

use iced::widget::canvas::{self, Canvas, Geometry};
use iced::{Element, Fill, Rectangle, Renderer, Theme, mouse};

use crate::features::settings::VisualSettings;
use crate::features::visualizer::{AnimationScheduler, BackgroundLayer};
use crate::ui::theme;

/// Draws the blob layer over the solid backdrop
pub struct BackgroundCanvas<'a> {
    scheduler: &'a AnimationScheduler<BackgroundLayer>,
    settings: &'a VisualSettings,
}

impl<'a> BackgroundCanvas<'a> {
    pub fn new(
        scheduler: &'a AnimationScheduler<BackgroundLayer>,
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

impl<Message> canvas::Program<Message> for BackgroundCanvas<'_> {
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
            Some(theme::BACKGROUND),
        )]
    }
}
