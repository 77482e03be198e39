//! Compiled, ready-to-simulate parameters. Produced from RON data by
//! `hearth-rules`, or taken from the built-in defaults.

use crate::color::Rgb;
use crate::config::{UnknownModePolicy, VerticalVelocity};
use crate::constants::*;
use crate::types::GradientCheckpoint;

/// Sky parameters with every color already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParams {
    pub cycle_duration_ms: f64,
    pub buffer_size: u32,
    pub checkpoints: Vec<GradientCheckpoint>,
    /// (mode name, pinned colors)
    pub fixed_phases: Vec<(String, GradientCheckpoint)>,
    pub unknown_mode: UnknownModePolicy,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            cycle_duration_ms: CYCLE_DURATION_MS,
            buffer_size: SKY_BUFFER_SIZE,
            checkpoints: DEFAULT_CHECKPOINTS.to_vec(),
            fixed_phases: DEFAULT_FIXED_PHASES
                .iter()
                .map(|&(name, index)| (name.to_string(), DEFAULT_CHECKPOINTS[index]))
                .collect(),
            unknown_mode: UnknownModePolicy::default(),
        }
    }
}

/// Ember parameters with the palette already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmberParams {
    pub spawn_chance: f64,
    pub soft_cap: usize,
    pub hard_cap: usize,
    pub spawn_radius: f64,
    pub spawn_depth: f64,
    pub pixel_scale: f64,
    pub palette: Vec<Rgb>,
    pub drift_speed: f64,
    pub drift_jitter: f64,
    pub rise_damping: f64,
    pub life_decay: f64,
    pub max_life: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub flicker_floor: f64,
    pub vertical_velocity: VerticalVelocity,
}

impl Default for EmberParams {
    fn default() -> Self {
        Self {
            spawn_chance: EMBER_SPAWN_CHANCE,
            soft_cap: EMBER_SOFT_CAP,
            hard_cap: EMBER_HARD_CAP,
            spawn_radius: EMBER_SPAWN_RADIUS,
            spawn_depth: EMBER_SPAWN_DEPTH,
            pixel_scale: EMBER_PIXEL_SCALE,
            palette: EMBER_PALETTE.to_vec(),
            drift_speed: EMBER_DRIFT_SPEED,
            drift_jitter: EMBER_DRIFT_JITTER,
            rise_damping: EMBER_RISE_DAMPING,
            life_decay: EMBER_LIFE_DECAY,
            max_life: EMBER_MAX_LIFE,
            min_size: EMBER_MIN_SIZE,
            max_size: EMBER_MAX_SIZE,
            flicker_floor: EMBER_FLICKER_FLOOR,
            vertical_velocity: VerticalVelocity::default(),
        }
    }
}
