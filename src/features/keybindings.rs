//! Keyboard shortcuts for runtime adjustment
//!
//! Every visual setting can be changed while the track plays. Bindings map
//! an iced key event to an [`Action`], and [`Action::apply`] performs the
//! settings side of it.

use iced::keyboard::{Key, Modifiers};

use crate::features::settings::VisualSettings;

/// Glow radius change per key press
pub const GLOW_STEP: f32 = 4.0;
/// Brightness change per key press
pub const BRIGHTNESS_STEP: f32 = 0.1;
/// Lyric font scale change per key press
pub const FONT_SCALE_STEP: f32 = 0.1;
/// Seconds skipped per seek key press
pub const SEEK_STEP: f64 = 5.0;

/// All bindable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PlayPause,
    SeekBack,
    SeekForward,
    ToggleHelp,
    Quit,
    ToggleRainbow,
    ToggleRain,
    ToggleFireworks,
    ToggleBokeh,
    BrightnessUp,
    BrightnessDown,
    OffsetEarlier,
    OffsetLater,
    OffsetReset,
    BarGlowUp,
    BarGlowDown,
    EffectsGlowUp,
    EffectsGlowDown,
    FontLarger,
    FontSmaller,
}

impl Action {
    /// Human-readable name for the action
    pub fn display_name(&self) -> &'static str {
        match self {
            Action::PlayPause => "Play/Pause",
            Action::SeekBack => "Back 5s",
            Action::SeekForward => "Forward 5s",
            Action::ToggleHelp => "Show shortcuts",
            Action::Quit => "Quit",
            Action::ToggleRainbow => "Rainbow colors",
            Action::ToggleRain => "Rain",
            Action::ToggleFireworks => "Fireworks",
            Action::ToggleBokeh => "Bokeh",
            Action::BrightnessUp => "Brighter",
            Action::BrightnessDown => "Dimmer",
            Action::OffsetEarlier => "Lyrics earlier",
            Action::OffsetLater => "Lyrics later",
            Action::OffsetReset => "Reset lyric offset",
            Action::BarGlowUp => "More bar glow",
            Action::BarGlowDown => "Less bar glow",
            Action::EffectsGlowUp => "More effects glow",
            Action::EffectsGlowDown => "Less effects glow",
            Action::FontLarger => "Larger lyrics",
            Action::FontSmaller => "Smaller lyrics",
        }
    }

    /// Apply the settings change; returns false for actions handled elsewhere
    pub fn apply(&self, settings: &mut VisualSettings) -> bool {
        match self {
            Action::PlayPause
            | Action::SeekBack
            | Action::SeekForward
            | Action::ToggleHelp
            | Action::Quit => return false,
            Action::ToggleRainbow => settings.rainbow = !settings.rainbow,
            Action::ToggleRain => settings.rain = !settings.rain,
            Action::ToggleFireworks => settings.fireworks = !settings.fireworks,
            Action::ToggleBokeh => settings.bokeh = !settings.bokeh,
            Action::BrightnessUp => settings.set_brightness(settings.brightness + BRIGHTNESS_STEP),
            Action::BrightnessDown => {
                settings.set_brightness(settings.brightness - BRIGHTNESS_STEP)
            }
            // "Earlier" shows lines sooner, which means a larger offset
            Action::OffsetEarlier => settings.nudge_lyric_offset(1),
            Action::OffsetLater => settings.nudge_lyric_offset(-1),
            Action::OffsetReset => settings.set_lyric_offset(0.0),
            Action::BarGlowUp => settings.set_bar_glow(settings.bar_glow + GLOW_STEP),
            Action::BarGlowDown => settings.set_bar_glow(settings.bar_glow - GLOW_STEP),
            Action::EffectsGlowUp => settings.set_effects_glow(settings.effects_glow + GLOW_STEP),
            Action::EffectsGlowDown => {
                settings.set_effects_glow(settings.effects_glow - GLOW_STEP)
            }
            Action::FontLarger => {
                settings.set_lyric_font_scale(settings.lyric_font_scale + FONT_SCALE_STEP)
            }
            Action::FontSmaller => {
                settings.set_lyric_font_scale(settings.lyric_font_scale - FONT_SCALE_STEP)
            }
        }
        true
    }
}

/// Keys that can be bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Left,
    Right,
    Char(char),
}

impl KeyCode {
    /// Check if this key code matches an iced Key
    pub fn matches(&self, key: &Key) -> bool {
        use iced::keyboard::key::Named;

        match (self, key) {
            (KeyCode::Space, Key::Named(Named::Space)) => true,
            (KeyCode::Left, Key::Named(Named::ArrowLeft)) => true,
            (KeyCode::Right, Key::Named(Named::ArrowRight)) => true,
            (KeyCode::Char(expected), Key::Character(c)) => {
                let mut chars = c.chars().flat_map(char::to_lowercase);
                chars.next() == Some(*expected) && chars.next().is_none()
            }
            _ => false,
        }
    }

    pub fn display(&self) -> String {
        match self {
            KeyCode::Space => "Space".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Char(c) => c.to_uppercase().to_string(),
        }
    }

    /// Symbols often need Shift to type, so Shift is not part of their binding
    fn is_symbol(&self) -> bool {
        matches!(self, KeyCode::Char(c) if !c.is_alphanumeric())
    }
}

/// A key plus whether Shift must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub shift: bool,
}

impl KeyBinding {
    pub fn new(key: KeyCode) -> Self {
        Self { key, shift: false }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// Add Shift modifier
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Check if this keybinding matches the given key event
    pub fn matches(&self, key: &Key, modifiers: &Modifiers) -> bool {
        if modifiers.control() || modifiers.alt() || modifiers.logo() {
            return false;
        }
        let shift_ok = self.key.is_symbol() || self.shift == modifiers.shift();
        shift_ok && self.key.matches(key)
    }

    /// Format as human-readable string
    pub fn display(&self) -> String {
        if self.shift {
            format!("Shift+{}", self.key.display())
        } else {
            self.key.display()
        }
    }
}

/// The keybinding table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyBinding, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;

        let bindings = vec![
            (KeyBinding::new(KeyCode::Space), PlayPause),
            (KeyBinding::new(KeyCode::Left), SeekBack),
            (KeyBinding::new(KeyCode::Right), SeekForward),
            (KeyBinding::char('h'), ToggleHelp),
            (KeyBinding::char('q'), Quit),
            (KeyBinding::char('r'), ToggleRainbow),
            (KeyBinding::char('1'), ToggleRain),
            (KeyBinding::char('2'), ToggleFireworks),
            (KeyBinding::char('3'), ToggleBokeh),
            (KeyBinding::char('+'), BrightnessUp),
            (KeyBinding::char('='), BrightnessUp),
            (KeyBinding::char('-'), BrightnessDown),
            (KeyBinding::char('['), OffsetLater),
            (KeyBinding::char(']'), OffsetEarlier),
            (KeyBinding::char('0'), OffsetReset),
            (KeyBinding::char('g'), BarGlowUp),
            (KeyBinding::char('g').shift(), BarGlowDown),
            (KeyBinding::char('e'), EffectsGlowUp),
            (KeyBinding::char('e').shift(), EffectsGlowDown),
            (KeyBinding::char('f'), FontLarger),
            (KeyBinding::char('f').shift(), FontSmaller),
        ];

        Self { bindings }
    }
}

impl KeyBindings {
    /// Find the action that matches the given key event
    pub fn find_action(&self, key: &Key, modifiers: &Modifiers) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key, modifiers))
            .map(|(_, action)| *action)
    }

    /// One "keys  action" line per action, in table order
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<(Action, Vec<String>)> = Vec::new();
        for (binding, action) in &self.bindings {
            match lines.iter_mut().find(|(a, _)| a == action) {
                Some((_, keys)) => keys.push(binding.display()),
                None => lines.push((*action, vec![binding.display()])),
            }
        }
        lines
            .into_iter()
            .map(|(action, keys)| format!("{:<10} {}", keys.join("/"), action.display_name()))
            .collect()
    }
}
