//! Audio-reactive rendering core
//!
//! Pure simulation and drawing logic. Nothing in here knows about iced:
//! layers draw through the [`surface::Surface`] trait and are ticked by an
//! [`scheduler::AnimationScheduler`] that the app drives from its refresh
//! subscription.

pub mod bands;
pub mod blobs;
pub mod bokeh;
pub mod color;
pub mod fireworks;
pub mod layers;
pub mod rain;
pub mod scheduler;
pub mod spectrum;
pub mod surface;

pub use bands::{BandEnergy, FrequencyFrame};
pub use color::{ColorMode, Hsl, Rgba};
pub use layers::{BackgroundLayer, EffectsLayer};
pub use scheduler::{AnimationScheduler, Layer, SurfaceSize, TickInput};
pub use surface::{BlendMode, ColorStop, Glow, Surface};
