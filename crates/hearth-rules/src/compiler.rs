use hearth_core::color::{FormatError, Rgb};
use hearth_core::config::{EmberConfig, SkyConfig};
use hearth_core::params::{EmberParams, SkyParams};
use hearth_core::types::GradientCheckpoint;

/// Compile a sky config into simulation parameters, parsing every color.
///
/// Phase indices are assumed validated; an out-of-range phase is skipped.
pub fn compile_sky(sky: &SkyConfig) -> Result<SkyParams, FormatError> {
    let checkpoints = sky
        .checkpoints
        .iter()
        .map(|c| Ok(GradientCheckpoint::new(Rgb::parse(&c.top)?, Rgb::parse(&c.bottom)?)))
        .collect::<Result<Vec<_>, FormatError>>()?;

    let fixed_phases = sky
        .fixed_phases
        .iter()
        .filter_map(|phase| {
            checkpoints
                .get(phase.checkpoint)
                .map(|checkpoint| (phase.name.clone(), *checkpoint))
        })
        .collect();

    Ok(SkyParams {
        cycle_duration_ms: sky.cycle_duration_ms,
        buffer_size: sky.buffer_size,
        checkpoints,
        fixed_phases,
        unknown_mode: sky.unknown_mode,
    })
}

/// Compile an ember config into simulation parameters, parsing the palette.
pub fn compile_embers(embers: &EmberConfig) -> Result<EmberParams, FormatError> {
    let palette = embers
        .palette
        .iter()
        .map(|entry| Rgb::from_hex(entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EmberParams {
        spawn_chance: embers.spawn_chance,
        soft_cap: embers.soft_cap,
        hard_cap: embers.hard_cap,
        spawn_radius: embers.spawn_radius,
        spawn_depth: embers.spawn_depth,
        pixel_scale: embers.pixel_scale,
        palette,
        drift_speed: embers.drift_speed,
        drift_jitter: embers.drift_jitter,
        rise_damping: embers.rise_damping,
        life_decay: embers.life_decay,
        max_life: embers.max_life,
        min_size: embers.min_size,
        max_size: embers.max_size,
        flicker_floor: embers.flicker_floor,
        vertical_velocity: embers.vertical_velocity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_embers_from_str, load_sky_from_str};

    #[test]
    fn test_shipped_sky_matches_builtin_defaults() {
        let sky = load_sky_from_str(include_str!("../../../data/sky.ron")).expect("sky.ron");
        let compiled = compile_sky(&sky).expect("colors parse");
        assert_eq!(compiled, SkyParams::default());
    }

    #[test]
    fn test_shipped_embers_match_builtin_defaults() {
        let embers =
            load_embers_from_str(include_str!("../../../data/embers.ron")).expect("embers.ron");
        let compiled = compile_embers(&embers).expect("palette parses");
        assert_eq!(compiled, EmberParams::default());
    }

    #[test]
    fn test_bad_checkpoint_color_is_format_error() {
        let mut sky = load_sky_from_str(include_str!("../../../data/sky.ron")).expect("sky.ron");
        sky.checkpoints[2].bottom = "rgb(1)".into();
        assert!(matches!(
            compile_sky(&sky),
            Err(FormatError::MissingComponents { found: 1, .. })
        ));
    }

    #[test]
    fn test_bad_palette_is_format_error() {
        let mut embers =
            load_embers_from_str(include_str!("../../../data/embers.ron")).expect("embers.ron");
        embers.palette[0] = "#12".into();
        assert!(matches!(
            compile_embers(&embers),
            Err(FormatError::InvalidHex(_))
        ));
    }
}
