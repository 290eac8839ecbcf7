//! Keyboard shortcut overlay

use iced::widget::{column, container, text};
use iced::{Element, Fill, Padding};

use crate::features::KeyBindings;
use crate::ui::theme;

pub fn view<'a, Message: 'a>(bindings: &KeyBindings) -> Element<'a, Message> {
    let lines = bindings
        .help_lines()
        .into_iter()
        .map(|line| text(line).size(14).font(iced::Font::MONOSPACE).into());

    let panel = container(
        column![text("Shortcuts").size(16).color(theme::TEXT_PRIMARY)]
            .extend(lines)
            .spacing(4),
    )
    .padding(Padding::new(16.0))
    .style(theme::help_panel);

    container(panel)
        .width(Fill)
        .height(Fill)
        .padding(24)
        .into()
}
