// src/app/view.rs
//! Application view rendering

use iced::Element;
use iced::widget::stack;

use super::App;
use super::message::Message;
use crate::ui::effects::{BackgroundCanvas, EffectsCanvas};
use crate::ui::pages;

impl App {
    /// Background, effects, lyrics and the optional help overlay, back to front
    pub fn view(&self) -> Element<'_, Message> {
        let layers = stack![
            BackgroundCanvas::new(&self.background, &self.settings).view(),
            EffectsCanvas::new(&self.effects, &self.settings).view(),
            pages::lyrics::view(&self.lyrics, self.clock.effective(), &self.settings),
        ];

        if self.show_help {
            layers.push(pages::help::view(&self.keybindings)).into()
        } else {
            layers.into()
        }
    }
}
