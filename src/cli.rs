//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::features::VisualSettings;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "glowline")]
#[command(about = "Audio-reactive visualizer with karaoke lyrics", long_about = None)]
pub struct Args {
    /// Audio file to play
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// LRC file to use instead of the one found next to the audio
    #[arg(long, value_name = "FILE")]
    pub lyrics: Option<PathBuf>,

    /// Settings JSON (default: <config dir>/glowline/settings.json)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Highlight color as #rrggbb
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Use the highlight color instead of the rainbow sweep
    #[arg(long)]
    pub no_rainbow: bool,

    /// Global brightness (0.1 - 1.5)
    #[arg(long, value_name = "FACTOR")]
    pub brightness: Option<f32>,

    /// Lyric offset in seconds; positive shows lines earlier
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub offset: Option<f64>,

    #[arg(long)]
    pub no_rain: bool,

    #[arg(long)]
    pub no_fireworks: bool,

    #[arg(long)]
    pub no_bokeh: bool,

    /// Display scale factor used for canvas detail
    #[arg(long, value_name = "RATIO", default_value = "1.0")]
    pub pixel_ratio: f32,
}

impl Args {
    /// Overlay command-line values on loaded settings
    pub fn apply_to(&self, settings: &mut VisualSettings) {
        if let Some(color) = &self.color {
            settings.set_highlight_color(color.clone());
        }
        if self.no_rainbow {
            settings.rainbow = false;
        }
        if let Some(brightness) = self.brightness {
            settings.set_brightness(brightness);
        }
        if let Some(offset) = self.offset {
            settings.set_lyric_offset(offset);
        }
        if self.no_rain {
            settings.rain = false;
        }
        if self.no_fireworks {
            settings.fireworks = false;
        }
        if self.no_bokeh {
            settings.bokeh = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from(["glowline", "song.flac"]).unwrap();
        assert_eq!(args.audio, PathBuf::from("song.flac"));
        assert_eq!(args.pixel_ratio, 1.0);
        assert!(args.lyrics.is_none());
    }

    #[test]
    fn test_overrides_apply_with_clamping() {
        let args = Args::try_parse_from([
            "glowline",
            "song.mp3",
            "--no-rainbow",
            "--brightness",
            "3",
            "--offset",
            "-1.5",
            "--no-bokeh",
        ])
        .unwrap();

        let mut settings = VisualSettings::default();
        args.apply_to(&mut settings);
        assert!(!settings.rainbow);
        assert_eq!(settings.brightness, 1.5);
        assert_eq!(settings.lyric_offset, -1.5);
        assert!(!settings.bokeh);
        assert!(settings.rain);
    }

    #[test]
    fn test_audio_is_required() {
        assert!(Args::try_parse_from(["glowline"]).is_err());
    }
}
