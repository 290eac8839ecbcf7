//! Animation scheduler
//!
//! Each visual layer gets its own scheduler. While started, the scheduler
//! keeps one tick pending and listens for resizes; `stop` drops both at
//! once so no tick can run after teardown. The host (the iced app) asks
//! [`AnimationScheduler::wants_frames`] and [`AnimationScheduler::listens_resize`]
//! to decide which refresh subscriptions to keep alive.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::bands::{BandEnergy, FrequencyFrame};
use super::surface::Surface;
use crate::features::settings::VisualSettings;

/// Backing surface resolution derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    /// Device pixel ratio after the layer's cap
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, cap: f32) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(cap)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: ratio,
        }
    }

    /// Backing resolution in physical pixels
    pub fn physical(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

/// Everything one tick may read
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    pub frame: Option<&'a FrequencyFrame>,
    pub bands: BandEnergy,
    /// Energy-driven spawning only happens while playing
    pub playing: bool,
    pub settings: &'a VisualSettings,
}

impl<'a> TickInput<'a> {
    pub fn new(frame: Option<&'a FrequencyFrame>, playing: bool, settings: &'a VisualSettings) -> Self {
        Self {
            frame,
            bands: BandEnergy::extract(frame),
            playing,
            settings,
        }
    }
}

/// A visual layer driven by a scheduler
pub trait Layer {
    /// Name used in logs
    const NAME: &'static str;
    /// Device pixel ratio cap for the backing surface
    const MAX_PIXEL_RATIO: f32;

    fn resize(&mut self, size: SurfaceSize, rng: &mut StdRng);

    fn tick(&mut self, input: &TickInput<'_>, rng: &mut StdRng);

    fn draw(&self, surface: &mut dyn Surface, settings: &VisualSettings);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}

/// Drives one layer with its own tick loop
#[derive(Debug)]
pub struct AnimationScheduler<L: Layer> {
    layer: L,
    rng: StdRng,
    state: SchedulerState,
    tick_pending: bool,
    resize_attached: bool,
    size: Option<SurfaceSize>,
    ticks: u64,
}

impl<L: Layer> AnimationScheduler<L> {
    pub fn new(layer: L) -> Self {
        Self::with_rng(layer, StdRng::from_os_rng())
    }

    pub fn with_rng(layer: L, rng: StdRng) -> Self {
        Self {
            layer,
            rng,
            state: SchedulerState::Stopped,
            tick_pending: false,
            resize_attached: false,
            size: None,
            ticks: 0,
        }
    }

    /// Begin ticking; a no-op when already running
    pub fn start(&mut self) {
        if self.state == SchedulerState::Running {
            return;
        }
        tracing::debug!("Starting {} layer", L::NAME);
        self.state = SchedulerState::Running;
        self.tick_pending = true;
        self.resize_attached = true;
    }

    /// Cancel the pending tick and detach the resize listener together
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        tracing::debug!("Stopping {} layer after {} ticks", L::NAME, self.ticks);
        self.state = SchedulerState::Stopped;
        self.tick_pending = false;
        self.resize_attached = false;
    }

    /// Whether the host should deliver refresh callbacks
    pub fn wants_frames(&self) -> bool {
        self.tick_pending
    }

    /// Whether the host should deliver resize events
    pub fn listens_resize(&self) -> bool {
        self.resize_attached
    }

    /// Refresh callback; returns false when no tick was pending
    pub fn on_frame(&mut self, input: &TickInput<'_>) -> bool {
        if !self.tick_pending {
            return false;
        }
        self.layer.tick(input, &mut self.rng);
        self.ticks += 1;
        // Re-arm for the next refresh
        self.tick_pending = self.state == SchedulerState::Running;
        true
    }

    /// Viewport change; ignored while detached
    pub fn on_resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        if !self.resize_attached {
            return false;
        }
        let size = SurfaceSize::new(width, height, device_pixel_ratio, L::MAX_PIXEL_RATIO);
        if self.size == Some(size) {
            return false;
        }
        let (pw, ph) = size.physical();
        tracing::debug!(
            "Resizing {} layer to {}x{} ({}x{} px)",
            L::NAME,
            size.width,
            size.height,
            pw,
            ph
        );
        self.layer.resize(size, &mut self.rng);
        self.size = Some(size);
        true
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn draw(&self, surface: &mut dyn Surface, settings: &VisualSettings) {
        self.layer.draw(surface, settings);
    }
}
