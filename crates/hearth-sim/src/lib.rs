pub mod embers;
pub mod events;
pub mod frame_loop;
pub mod gradient;
pub mod rng;
pub mod scene;

#[cfg(test)]
mod test_harness;

pub use embers::{Ember, EmberField, TickReport};
pub use events::{EventQueue, HostEvent};
pub use frame_loop::{FrameLoop, FrameOutcome, StopHandle};
pub use gradient::{GradientClock, GradientMode};
pub use rng::{RandomSource, SimRng};
pub use scene::{EffectScene, SceneStats};
