pub mod compiler;
pub mod loader;
pub mod validator;

use hearth_core::color::FormatError;
use hearth_core::params::{EmberParams, SkyParams};
use thiserror::Error;

use crate::loader::LoadError;
use crate::validator::ValidationError;

/// Built-in sky data shipped with the crate.
pub const DEFAULT_SKY_RON: &str = include_str!("../../../data/sky.ron");

/// Built-in ember data shipped with the crate.
pub const DEFAULT_EMBERS_RON: &str = include_str!("../../../data/embers.ron");

/// Anything that can go wrong turning RON text into simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{} validation error(s): {}", .0.len(), join_errors(.0))]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Color(#[from] FormatError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Both halves of the effect configuration, compiled.
#[derive(Debug, Clone)]
pub struct EffectParams {
    pub sky: SkyParams,
    pub embers: EmberParams,
}

/// Load, validate and compile sky and ember RON sources.
pub fn load_effect_params(sky_ron: &str, embers_ron: &str) -> Result<EffectParams, ConfigError> {
    let sky = loader::load_sky_from_str(sky_ron)?;
    validator::validate_sky(&sky).map_err(ConfigError::Invalid)?;
    let embers = loader::load_embers_from_str(embers_ron)?;
    validator::validate_embers(&embers).map_err(ConfigError::Invalid)?;

    let params = EffectParams {
        sky: compiler::compile_sky(&sky)?,
        embers: compiler::compile_embers(&embers)?,
    };
    log::info!(
        "Loaded effect config: {} checkpoints over {}ms, {} fixed phases, {} palette colors",
        params.sky.checkpoints.len(),
        params.sky.cycle_duration_ms,
        params.sky.fixed_phases.len(),
        params.embers.palette.len()
    );
    Ok(params)
}

/// Load the built-in configuration.
pub fn load_default_params() -> Result<EffectParams, ConfigError> {
    load_effect_params(DEFAULT_SKY_RON, DEFAULT_EMBERS_RON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let params = load_default_params().expect("built-in config is valid");
        assert_eq!(params.sky, SkyParams::default());
        assert_eq!(params.embers, EmberParams::default());
    }

    #[test]
    fn test_invalid_config_reports_all_errors() {
        let sky = r#"(cycle_duration_ms: -1.0, buffer_size: 0, checkpoints: [])"#;
        let err = load_effect_params(sky, DEFAULT_EMBERS_RON).expect_err("invalid");
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation errors, got {other}"),
        }
    }

    #[test]
    fn test_parse_failure_is_load_error() {
        let err = load_effect_params(DEFAULT_SKY_RON, "nope").expect_err("garbage");
        assert!(matches!(err, ConfigError::Load(LoadError::EmberParseError(_))));
    }

    #[test]
    fn test_invalid_display_lists_errors() {
        let err = ConfigError::Invalid(vec![
            ValidationError::EmptyPalette,
            ValidationError::EmptyBuffer,
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 validation error(s)"), "{text}");
        assert!(text.contains("Ember palette is empty"));
    }
}
