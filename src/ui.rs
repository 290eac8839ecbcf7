//! UI module for the visualizer window
//! Dark backdrop with neon effects and karaoke lyrics on top
//!
//! # Architecture
//!
//! - **Effects** (`effects`): canvas programs drawing the visual layers
//! - **Pages** (`pages`): the lyrics panel and the help overlay
//! - **Theme** (`theme`): colors and sizes

pub mod effects;
pub mod pages;
pub mod theme;
