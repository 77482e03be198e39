use std::f64::consts::TAU;

use glam::DVec2;
use hearth_core::color::Rgb;
use hearth_core::config::VerticalVelocity;
use hearth_core::params::EmberParams;
use hearth_core::types::ViewportMetrics;
use serde::Serialize;

use crate::rng::RandomSource;

/// A single glowing particle. Owned exclusively by its [`EmberField`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ember {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Remaining life in (0, 1]; the ember is retired once this reaches 0.
    pub life: f64,
    /// Larger values decay more slowly.
    pub max_life: f64,
    /// Size in ember units; painters multiply by their pixel scale.
    pub size: u32,
    pub color: Rgb,
    /// Opacity multiplier, redrawn every tick.
    pub flicker: f64,
}

impl Ember {
    /// Draw opacity: `life * flicker`, clamped to [0, 1].
    pub fn alpha(&self) -> f64 {
        (self.life * self.flicker).clamp(0.0, 1.0)
    }
}

/// What happened during one [`EmberField::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub spawned: bool,
    pub retired: usize,
    pub evicted: usize,
}

/// Starting vertical speed factor before height scaling, for a uniform draw `u`.
///
/// Both variants evaluate `min(max(-u, lo), hi)`. `Faithful` passes the bounds
/// as (-0.5, -1), which pins the result to -1.
pub fn initial_rise(mode: VerticalVelocity, u: f64) -> f64 {
    match mode {
        VerticalVelocity::Faithful => bounded(-u, -0.5, -1.0),
        VerticalVelocity::Intended => bounded(-u, -1.0, -0.5),
    }
}

/// `min(max(value, lo), hi)` with no check that `lo <= hi`.
fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Bounded, creation-ordered collection of embers.
#[derive(Debug, Clone)]
pub struct EmberField {
    embers: Vec<Ember>,
    params: EmberParams,
    viewport: ViewportMetrics,
}

impl EmberField {
    pub fn new(params: EmberParams, viewport: ViewportMetrics) -> Self {
        Self {
            embers: Vec::with_capacity(params.hard_cap + 1),
            params,
            viewport,
        }
    }

    /// Replace the viewport. Existing embers keep their positions.
    pub fn resize(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> &ViewportMetrics {
        &self.viewport
    }

    pub fn params(&self) -> &EmberParams {
        &self.params
    }

    pub fn set_vertical_velocity(&mut self, mode: VerticalVelocity) {
        self.params.vertical_velocity = mode;
    }

    /// Embers oldest first.
    pub fn embers(&self) -> &[Ember] {
        &self.embers
    }

    pub fn len(&self) -> usize {
        self.embers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embers.is_empty()
    }

    /// Advance one frame: maybe spawn, age everything, retire the dead, enforce the hard cap.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        let mut report = TickReport::default();

        // Soft cap gates admission only; existing embers keep aging.
        if rng.chance(self.params.spawn_chance) && self.embers.len() <= self.params.soft_cap {
            let ember = self.spawn(rng);
            self.embers.push(ember);
            report.spawned = true;
        }

        let p = &self.params;
        for ember in &mut self.embers {
            ember.pos.x += ember.vel.x;
            ember.pos.y += ember.vel.y / 2.0;
            ember.vel.x += rng.range(-p.drift_jitter, p.drift_jitter);
            ember.vel.y += p.rise_damping;
            ember.life -= p.life_decay / ember.max_life;
            ember.flicker = rng.range(p.flicker_floor, 1.0);
        }

        let before = self.embers.len();
        // NaN life (zero decay over zero max life) counts as dead too.
        self.embers.retain(|ember| ember.life > 0.0);
        report.retired = before - self.embers.len();

        if self.embers.len() > self.params.hard_cap {
            let excess = self.embers.len() - self.params.hard_cap;
            self.embers.drain(..excess);
            report.evicted = excess;
        }

        report
    }

    fn spawn<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Ember {
        let p = &self.params;
        let origin = self.viewport.spawn_origin();

        let angle = rng.next_f64() * TAU;
        let radius = rng.next_f64() * p.spawn_radius;
        let depth = rng.next_f64() * p.spawn_depth;
        let pos = DVec2::new(origin.x + angle.cos() * radius, origin.y + depth);

        let vx = rng.range(-p.drift_speed, p.drift_speed);
        let rise = initial_rise(p.vertical_velocity, rng.next_f64());
        let vy = rise * self.viewport.height_scale * 2.0;

        let max_life = rng.next_f64() * p.max_life;

        let size_span = p.max_size.saturating_sub(p.min_size) + 1;
        let size = (p.min_size + (rng.next_f64() * size_span as f64) as u32).min(p.max_size);

        let color_index = (rng.next_f64() * p.palette.len() as f64) as usize;
        let color = p
            .palette
            .get(color_index.min(p.palette.len().saturating_sub(1)))
            .copied()
            .unwrap_or_default();

        let flicker = rng.range(p.flicker_floor, 1.0);

        Ember {
            pos,
            vel: DVec2::new(vx, vy),
            life: 1.0,
            max_life,
            size,
            color,
            flicker,
        }
    }
}
