//! Pages module
//! Overlays drawn above the visualizer canvases

pub mod help;
pub mod lyrics;
