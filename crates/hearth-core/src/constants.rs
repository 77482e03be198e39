//! Single source of truth for shared constants.
//! The shipped `data/*.ron` files mirror these values; `hearth-rules`
//! tests check that the two never drift apart.

use crate::color::Rgb;
use crate::types::GradientCheckpoint;

/// Document height (in CSS px) at which the ember height scale is exactly 1.
pub const HEIGHT_SCALE_BASELINE_PX: f64 = 1000.0;

/// Height scale used when the document reports no scrollable height.
pub const DEFAULT_HEIGHT_SCALE: f64 = 1.0;

/// Frame gaps longer than this (ms) are treated as a backgrounded tab.
pub const FRAME_GAP_LIMIT_MS: f64 = 100.0;

/// Mode name that selects the time-driven cycle.
pub const MODE_CYCLE: &str = "cycle";

/// Length of one full day/night cycle in milliseconds.
pub const CYCLE_DURATION_MS: f64 = 60_000.0;

/// Side length of the low-resolution sky buffer in pixels.
pub const SKY_BUFFER_SIZE: u32 = 50;

/// Midnight, sunrise, midday, sunset, midnight. First and last match so the
/// cycle wraps without a seam.
pub const DEFAULT_CHECKPOINTS: [GradientCheckpoint; 5] = [
    GradientCheckpoint::new(Rgb::new(45, 13, 1), Rgb::new(0, 0, 0)),
    GradientCheckpoint::new(Rgb::new(255, 204, 102), Rgb::new(135, 206, 235)),
    GradientCheckpoint::new(Rgb::new(135, 206, 235), Rgb::new(102, 204, 255)),
    GradientCheckpoint::new(Rgb::new(255, 153, 102), Rgb::new(51, 0, 102)),
    GradientCheckpoint::new(Rgb::new(45, 13, 1), Rgb::new(0, 0, 0)),
];

/// Fixed phase names and the checkpoint each one pins.
pub const DEFAULT_FIXED_PHASES: [(&str, usize); 3] = [("midnight", 0), ("morning", 1), ("twilight", 3)];

/// Per-tick probability of an ember spawn attempt.
pub const EMBER_SPAWN_CHANCE: f64 = 0.02;

/// Spawns are admitted only while the field holds at most this many embers.
pub const EMBER_SOFT_CAP: usize = 30;

/// Oldest embers beyond this count are dropped at the end of every tick.
pub const EMBER_HARD_CAP: usize = 100;

/// Radius (px) of the spawn disk around the bottom-center of the viewport.
pub const EMBER_SPAWN_RADIUS: f64 = 50.0;

/// Spawn points sit up to this many px below the bottom edge.
pub const EMBER_SPAWN_DEPTH: f64 = 20.0;

/// Screen pixels per ember size unit.
pub const EMBER_PIXEL_SCALE: f64 = 3.0;

/// Horizontal spawn velocity is uniform in [-DRIFT, DRIFT].
pub const EMBER_DRIFT_SPEED: f64 = 0.15;

/// Per-tick horizontal velocity jitter is uniform in [-JITTER, JITTER].
pub const EMBER_DRIFT_JITTER: f64 = 0.01;

/// Added to vertical velocity every tick, slowing the rise.
pub const EMBER_RISE_DAMPING: f64 = 0.0001;

/// Life lost per tick is `EMBER_LIFE_DECAY / max_life`.
pub const EMBER_LIFE_DECAY: f64 = 0.005;

/// Upper bound (exclusive) of the per-ember max life draw.
pub const EMBER_MAX_LIFE: f64 = 10.0;

/// Ember sizes are integers in [MIN, MAX].
pub const EMBER_MIN_SIZE: u32 = 2;
pub const EMBER_MAX_SIZE: u32 = 3;

/// Flicker opacity factor is uniform in [FLOOR, 1).
pub const EMBER_FLICKER_FLOOR: f64 = 0.5;

/// Bright orange, light orange, peach, gold, light yellow, red-orange, dark orange.
pub const EMBER_PALETTE: [Rgb; 7] = [
    Rgb::new(0xff, 0x6b, 0x35),
    Rgb::new(0xff, 0x95, 0x58),
    Rgb::new(0xff, 0xb3, 0x47),
    Rgb::new(0xff, 0xd7, 0x00),
    Rgb::new(0xff, 0xed, 0x4e),
    Rgb::new(0xff, 0x45, 0x00),
    Rgb::new(0xff, 0x8c, 0x00),
];
