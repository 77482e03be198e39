use serde::{Deserialize, Serialize};

/// What the sky shows after `set_mode` receives a name it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownModePolicy {
    /// Keep emitting the last colors the clock produced.
    #[default]
    KeepPrevious,
    /// Behave as if `cycle` had been selected.
    FallbackToCycle,
}

/// How the initial vertical ember velocity is drawn.
///
/// `Faithful` evaluates `min(max(-u, -0.5), -1)`, which is always -1, so every
/// ember starts at the same speed. `Intended` clamps `-u` into [-1, -0.5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalVelocity {
    #[default]
    Faithful,
    Intended,
}

/// A named sky checkpoint as written in `sky.ron`. Colors are CSS-style text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointDef {
    pub name: String,
    pub top: String,
    pub bottom: String,
}

/// Maps a mode name (e.g. "twilight") to the checkpoint it pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPhaseDef {
    pub name: String,
    pub checkpoint: usize,
}

/// Sky gradient configuration loaded from RON data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyConfig {
    /// Length of one full cycle in milliseconds.
    pub cycle_duration_ms: f64,
    /// Side length of the square low-resolution buffer.
    pub buffer_size: u32,
    /// Ordered checkpoints; first and last should match for a seamless loop.
    pub checkpoints: Vec<CheckpointDef>,
    #[serde(default)]
    pub fixed_phases: Vec<FixedPhaseDef>,
    #[serde(default)]
    pub unknown_mode: UnknownModePolicy,
}

/// Ember particle configuration loaded from RON data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmberConfig {
    pub spawn_chance: f64,
    pub soft_cap: usize,
    pub hard_cap: usize,
    pub spawn_radius: f64,
    #[serde(default)]
    pub spawn_depth: f64,
    pub pixel_scale: f64,
    /// `#rrggbb` colors; one is drawn uniformly per ember.
    pub palette: Vec<String>,
    pub drift_speed: f64,
    pub drift_jitter: f64,
    pub rise_damping: f64,
    pub life_decay: f64,
    pub max_life: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub flicker_floor: f64,
    #[serde(default)]
    pub vertical_velocity: VerticalVelocity,
}
