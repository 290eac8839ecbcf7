//! Lyrics panel - karaoke lines centred over the visualizer
//!
//! Layout: a window of lines around the focus line. The active line is
//! drawn character by character so each glyph can fill, rise and glow on
//! its own; the others are plain text tinted by their sync phase.

use std::ops::Range;

use iced::widget::{Space, column, container, row, text};
use iced::{Alignment, Color, Element, Fill, Length, Padding};

use crate::features::lyrics::sync::MAX_BLUR;
use crate::features::lyrics::{
    InterludeDots, LineFill, LineVisual, LyricLine, LyricSync, fill::MAX_GLOW, fill::MAX_RISE,
};
use crate::features::settings::VisualSettings;
use crate::features::visualizer::Rgba;
use crate::ui::theme::{self, BOLD_WEIGHT, LYRIC_SIZE, TRANSLATION_RATIO};

/// Lines shown above the focus line
const LINES_BEFORE: usize = 3;
/// Lines shown below the focus line
const LINES_AFTER: usize = 4;

/// Share of opacity a fully blurred line loses; the text widget cannot blur
const BLUR_FADE: f32 = 0.6;

/// Unfilled glyph color of the active line
const UNFILLED: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.45);

/// Build the lyrics panel for effective time `time`
pub fn view<'a, Message: 'a>(
    sync: &'a LyricSync,
    time: f64,
    settings: &'a VisualSettings,
) -> Element<'a, Message> {
    if !sync.has_lyrics() {
        return empty_state();
    }

    let lines = sync.timeline().lines();
    let state = sync.state();
    let highlight = settings.highlight_rgba();
    let size = LYRIC_SIZE * settings.lyric_font_scale;

    let rows: Vec<Element<'a, Message>> = visible_range(lines.len(), state.focus)
        .filter_map(|i| {
            let line = lines.get(i)?;
            let visual = state.visuals.get(i)?;
            let element = if state.active == Some(i) {
                active_line(line, time, size, highlight, settings.tuning.fill_ratio)
            } else {
                inactive_line(line, visual, size)
            };
            Some(element)
        })
        .collect();

    container(column(rows).spacing(18).align_x(Alignment::Center))
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .padding(Padding::new(40.0))
        .into()
}

fn empty_state<'a, Message: 'a>() -> Element<'a, Message> {
    container(text("No lyrics").size(18).color(theme::TEXT_MUTED))
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .into()
}

/// Lines drawn around `focus`, clipped to the timeline
fn visible_range(len: usize, focus: usize) -> Range<usize> {
    let start = focus.saturating_sub(LINES_BEFORE);
    let end = (focus + LINES_AFTER + 1).min(len);
    start..end.max(start)
}

/// Opacity multiplier standing in for blur
fn blur_fade(blur: f32) -> f32 {
    1.0 - (blur / MAX_BLUR).clamp(0.0, 1.0) * BLUR_FADE
}

fn inactive_line<'a, Message: 'a>(
    line: &'a LyricLine,
    visual: &LineVisual,
    size: f32,
) -> Element<'a, Message> {
    let color = visual.color.with_alpha(visual.color.a * blur_fade(visual.blur));
    let size = size * visual.scale;

    with_translation(
        text(line.text.as_str()).size(size).color(theme::to_color(color)).into(),
        line.translation.as_deref(),
        size,
        color.a,
    )
}

fn active_line<'a, Message: 'a>(
    line: &'a LyricLine,
    time: f64,
    size: f32,
    highlight: Rgba,
    fill_ratio: f32,
) -> Element<'a, Message> {
    if line.is_interlude() {
        let elapsed_ms = ((time - line.start()) * 1000.0).max(0.0) as f32;
        let dots = InterludeDots::at(elapsed_ms, line.duration_ms as f32);
        return interlude_dots(dots, size, highlight);
    }

    let fill = LineFill::compute(line, time, fill_ratio);
    let glyphs: Vec<Element<'a, Message>> = fill
        .chars
        .iter()
        .map(|c| {
            let glow = c.glow() / MAX_GLOW;
            let color = UNFILLED
                .lerp(highlight, c.shown)
                .lerp(Rgba::WHITE, glow * 0.3);
            let rise = c.rise();

            container(
                text(c.ch.to_string())
                    .size(size)
                    .color(theme::to_color(color))
                    .shaping(text::Shaping::Advanced)
                    .font(iced::Font {
                        weight: BOLD_WEIGHT,
                        ..Default::default()
                    }),
            )
            .padding(Padding::ZERO.top(MAX_RISE - rise).bottom(rise))
            .into()
        })
        .collect();

    with_translation(
        row(glyphs).align_y(Alignment::End).into(),
        line.translation.as_deref(),
        size,
        1.0,
    )
}

fn interlude_dots<'a, Message: 'a>(
    dots: InterludeDots,
    size: f32,
    highlight: Rgba,
) -> Element<'a, Message> {
    if !dots.is_visible() {
        return Space::new().height(Length::Fixed(size)).into();
    }

    let dot_size = size * 0.6 * dots.scale;
    let items: Vec<Element<'a, Message>> = dots
        .opacities
        .iter()
        .map(|&opacity| {
            text("●")
                .size(dot_size)
                .color(theme::to_color(highlight.with_alpha(opacity)))
                .into()
        })
        .collect();

    row(items).spacing(dot_size * 0.5).into()
}

fn with_translation<'a, Message: 'a>(
    main: Element<'a, Message>,
    translation: Option<&'a str>,
    size: f32,
    opacity: f32,
) -> Element<'a, Message> {
    match translation {
        Some(trans) => column![
            main,
            text(trans)
                .size(size * TRANSLATION_RATIO)
                .color(Color::from_rgba(1.0, 1.0, 1.0, opacity * 0.7))
        ]
        .spacing(6)
        .align_x(Alignment::Center)
        .into(),
        None => main,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_clips() {
        assert_eq!(visible_range(20, 10), 7..15);
        assert_eq!(visible_range(20, 1), 0..6);
        assert_eq!(visible_range(3, 2), 0..3);
        assert_eq!(visible_range(0, 0), 0..0);
    }

    #[test]
    fn test_blur_fade() {
        assert_eq!(blur_fade(0.0), 1.0);
        assert!((blur_fade(MAX_BLUR) - 0.4).abs() < 1e-6);
        assert!((blur_fade(100.0) - 0.4).abs() < 1e-6);
    }
}
