use hearth_core::params::{EmberParams, SkyParams};
use hearth_core::types::{GradientCheckpoint, ViewportMetrics};
use serde::Serialize;

use crate::embers::{EmberField, TickReport};
use crate::events::{EventQueue, HostEvent};
use crate::gradient::GradientClock;
use crate::rng::{RandomSource, SimRng};

/// Snapshot of scene state for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneStats {
    pub mode: String,
    pub embers: usize,
    pub ticks: u64,
    pub sky: GradientCheckpoint,
    pub height_scale: f64,
}

/// Owns every piece of mutable effect state: the sky clock, the ember
/// field and the random stream that drives it.
///
/// Lives for the lifetime of the page. All mutation happens from the frame
/// callbacks or from queued host events applied between frames.
pub struct EffectScene<R: RandomSource = SimRng> {
    clock: GradientClock,
    field: EmberField,
    rng: R,
    sky: GradientCheckpoint,
    ticks: u64,
}

impl<R: RandomSource> EffectScene<R> {
    pub fn new(sky: &SkyParams, embers: EmberParams, viewport: ViewportMetrics, rng: R) -> Self {
        let clock = GradientClock::new(sky);
        let initial = sky.checkpoints.first().copied().unwrap_or_default();
        Self {
            clock,
            field: EmberField::new(embers, viewport),
            rng,
            sky: initial,
            ticks: 0,
        }
    }

    pub fn apply(&mut self, event: HostEvent) {
        match event {
            HostEvent::SetMode(name) => self.set_mode(&name),
            HostEvent::Resize {
                width,
                height,
                document_height,
            } => self.resize(ViewportMetrics::new(width, height, document_height)),
        }
    }

    /// Apply every queued event in order. Returns how many were applied.
    pub fn drain(&mut self, queue: &mut EventQueue) -> usize {
        let mut applied = 0;
        for event in queue.drain() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn set_mode(&mut self, name: &str) {
        self.clock.set_mode(name);
    }

    pub fn resize(&mut self, viewport: ViewportMetrics) {
        log::info!(
            "Viewport {}x{}, height scale: {}",
            viewport.width,
            viewport.height,
            viewport.height_scale
        );
        self.field.resize(viewport);
    }

    /// Sky colors for this frame.
    pub fn sample_sky(&mut self, now_ms: f64) -> GradientCheckpoint {
        self.sky = self.clock.sample(now_ms);
        self.sky
    }

    /// Advance the ember field by one frame.
    pub fn tick_embers(&mut self) -> TickReport {
        self.ticks += 1;
        self.field.tick(&mut self.rng)
    }

    pub fn clock(&self) -> &GradientClock {
        &self.clock
    }

    pub fn field(&self) -> &EmberField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut EmberField {
        &mut self.field
    }

    pub fn viewport(&self) -> &ViewportMetrics {
        self.field.viewport()
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            mode: self.clock.mode().name().to_string(),
            embers: self.field.len(),
            ticks: self.ticks,
            sky: self.sky,
            height_scale: self.field.viewport().height_scale,
        }
    }
}
