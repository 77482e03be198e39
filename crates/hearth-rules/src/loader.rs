use hearth_core::config::{EmberConfig, SkyConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse sky RON: {0}")]
    SkyParseError(String),
    #[error("Failed to parse embers RON: {0}")]
    EmberParseError(String),
}

/// Parse a sky gradient RON string into a SkyConfig.
pub fn load_sky_from_str(ron_str: &str) -> Result<SkyConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::SkyParseError(e.to_string()))
}

/// Parse an ember field RON string into an EmberConfig.
pub fn load_embers_from_str(ron_str: &str) -> Result<EmberConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::EmberParseError(e.to_string()))
}
