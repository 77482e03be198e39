pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod params;
pub mod types;

pub use color::{FormatError, Rgb};
pub use error::HearthError;
pub use params::{EmberParams, SkyParams};
pub use types::{GradientCheckpoint, ViewportMetrics};
