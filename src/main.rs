//! glowline - audio-reactive visualizer with karaoke lyrics
//! Built with iced: neon particles and spectrum bars over ambient blobs

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod audio;
mod cli;
mod features;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    let args = cli::Args::parse();

    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glowline=info")),
        )
        .init();

    iced::application(move || app::App::new(&args), app::App::update, app::App::view)
        .title(app::App::title)
        .theme(app::App::theme)
        .subscription(app::App::subscription)
        .antialiasing(true)
        .run()
}
