//! Theme constants for the visualizer window
//! Dark backdrop so additive-looking effects read as neon

use iced::color;
use iced::widget::container;
use iced::{Background, Color, Theme};

use crate::features::visualizer::Rgba;

pub const BACKGROUND: Color = color!(0x05040a);
pub const TEXT_PRIMARY: Color = color!(0xffffff);
pub const TEXT_MUTED: Color = color!(0x888888);

/// Bold font weight used for the active lyric line
pub const BOLD_WEIGHT: iced::font::Weight = iced::font::Weight::Bold;

/// Lyric text size at font scale 1.0
pub const LYRIC_SIZE: f32 = 34.0;

/// Translation text size relative to the lyric size
pub const TRANSLATION_RATIO: f32 = 0.55;

pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Translucent panel behind the help overlay
pub fn help_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
        border: iced::Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}
