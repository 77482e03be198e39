use hearth_core::color::Rgb;
use hearth_core::config::{EmberConfig, SkyConfig};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Sky needs at least 2 checkpoints, found {0}")]
    TooFewCheckpoints(usize),
    #[error("Cycle duration must be positive, got {0}ms")]
    NonPositiveDuration(f64),
    #[error("Sky buffer size must be non-zero")]
    EmptyBuffer,
    #[error("Checkpoint '{name}' has an invalid color: {reason}")]
    BadCheckpointColor { name: String, reason: String },
    #[error("Fixed phase '{name}' points at checkpoint {index}, but only {count} exist")]
    PhaseOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },
    #[error("Fixed phase '{0}' is defined more than once")]
    DuplicatePhase(String),
    #[error("Fixed phase name 'cycle' is reserved")]
    ReservedPhaseName,
    #[error("Ember palette is empty")]
    EmptyPalette,
    #[error("Palette entry '{entry}' is invalid: {reason}")]
    BadPaletteColor { entry: String, reason: String },
    #[error("Soft cap {soft} exceeds hard cap {hard}")]
    CapsInverted { soft: usize, hard: usize },
    #[error("Spawn chance {0} is outside [0, 1]")]
    SpawnChanceOutOfRange(f64),
    #[error("Ember size range {min}..={max} is empty")]
    SizeRangeEmpty { min: u32, max: u32 },
    #[error("Flicker floor {0} is outside [0, 1]")]
    FlickerFloorOutOfRange(f64),
    #[error("Field '{field}' must be finite and non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
}

/// Validate a sky configuration. Collects every problem instead of stopping at the first.
pub fn validate_sky(sky: &SkyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let count = sky.checkpoints.len();
    if count < 2 {
        errors.push(ValidationError::TooFewCheckpoints(count));
    }
    if !(sky.cycle_duration_ms.is_finite() && sky.cycle_duration_ms > 0.0) {
        errors.push(ValidationError::NonPositiveDuration(sky.cycle_duration_ms));
    }
    if sky.buffer_size == 0 {
        errors.push(ValidationError::EmptyBuffer);
    }

    for checkpoint in &sky.checkpoints {
        for text in [&checkpoint.top, &checkpoint.bottom] {
            if let Err(e) = Rgb::parse(text) {
                errors.push(ValidationError::BadCheckpointColor {
                    name: checkpoint.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for phase in &sky.fixed_phases {
        if phase.name == hearth_core::constants::MODE_CYCLE {
            errors.push(ValidationError::ReservedPhaseName);
        }
        if !seen.insert(phase.name.as_str()) {
            errors.push(ValidationError::DuplicatePhase(phase.name.clone()));
        }
        if phase.checkpoint >= count {
            errors.push(ValidationError::PhaseOutOfRange {
                name: phase.name.clone(),
                index: phase.checkpoint,
                count,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an ember configuration.
pub fn validate_embers(embers: &EmberConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if embers.palette.is_empty() {
        errors.push(ValidationError::EmptyPalette);
    }
    for entry in &embers.palette {
        if let Err(e) = Rgb::from_hex(entry) {
            errors.push(ValidationError::BadPaletteColor {
                entry: entry.clone(),
                reason: e.to_string(),
            });
        }
    }

    if embers.soft_cap > embers.hard_cap {
        errors.push(ValidationError::CapsInverted {
            soft: embers.soft_cap,
            hard: embers.hard_cap,
        });
    }
    if !(0.0..=1.0).contains(&embers.spawn_chance) {
        errors.push(ValidationError::SpawnChanceOutOfRange(embers.spawn_chance));
    }
    if embers.min_size > embers.max_size {
        errors.push(ValidationError::SizeRangeEmpty {
            min: embers.min_size,
            max: embers.max_size,
        });
    }
    if !(0.0..=1.0).contains(&embers.flicker_floor) {
        errors.push(ValidationError::FlickerFloorOutOfRange(embers.flicker_floor));
    }

    let non_negative = [
        ("spawn_radius", embers.spawn_radius),
        ("spawn_depth", embers.spawn_depth),
        ("pixel_scale", embers.pixel_scale),
        ("drift_speed", embers.drift_speed),
        ("drift_jitter", embers.drift_jitter),
        ("life_decay", embers.life_decay),
        ("max_life", embers.max_life),
    ];
    for (field, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ValidationError::NegativeValue { field, value });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
