use hearth_core::config::UnknownModePolicy;
use hearth_core::constants::MODE_CYCLE;
use hearth_core::params::SkyParams;
use hearth_core::types::GradientCheckpoint;

/// The sky's active mode. Switching is a plain assignment; the next
/// `sample` reflects it with no transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradientMode {
    /// Time-driven walk through every checkpoint.
    Cycle,
    /// Pinned to one checkpoint's colors.
    FixedPhase {
        name: String,
        checkpoint: GradientCheckpoint,
    },
    /// A name no phase answers to. Rendering follows the clock's
    /// [`UnknownModePolicy`].
    Unrecognized(String),
}

impl GradientMode {
    pub fn name(&self) -> &str {
        match self {
            GradientMode::Cycle => MODE_CYCLE,
            GradientMode::FixedPhase { name, .. } => name,
            GradientMode::Unrecognized(name) => name,
        }
    }
}

/// Maps wall-clock time, or a pinned phase, to the current sky colors.
#[derive(Debug, Clone)]
pub struct GradientClock {
    checkpoints: Vec<GradientCheckpoint>,
    duration_ms: f64,
    phases: Vec<(String, GradientCheckpoint)>,
    unknown_mode: UnknownModePolicy,
    mode: GradientMode,
    last: GradientCheckpoint,
}

impl GradientClock {
    pub fn new(params: &SkyParams) -> Self {
        let mut clock = Self::with_checkpoints(params.checkpoints.clone(), params.cycle_duration_ms);
        clock.phases = params.fixed_phases.clone();
        clock.unknown_mode = params.unknown_mode;
        clock
    }

    /// A cycling clock with no named phases.
    pub fn with_checkpoints(checkpoints: Vec<GradientCheckpoint>, duration_ms: f64) -> Self {
        let last = checkpoints.first().copied().unwrap_or_default();
        Self {
            checkpoints,
            duration_ms,
            phases: Vec::new(),
            unknown_mode: UnknownModePolicy::default(),
            mode: GradientMode::Cycle,
            last,
        }
    }

    pub fn set_unknown_mode_policy(&mut self, policy: UnknownModePolicy) {
        self.unknown_mode = policy;
    }

    /// Replace the active mode by name. Unknown names are accepted.
    pub fn set_mode(&mut self, name: &str) {
        self.mode = self.resolve(name);
        match &self.mode {
            GradientMode::Unrecognized(name) => {
                log::warn!("Unknown background mode '{name}' ({:?})", self.unknown_mode)
            }
            mode => log::info!("Switching background to: {}", mode.name()),
        }
    }

    pub fn mode(&self) -> &GradientMode {
        &self.mode
    }

    /// Names accepted by `set_mode` other than "cycle".
    pub fn phase_names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|(name, _)| name.as_str())
    }

    /// Top and bottom sky colors at `now_ms`.
    pub fn sample(&mut self, now_ms: f64) -> GradientCheckpoint {
        let colors = match &self.mode {
            GradientMode::Cycle => self.sample_cycle(now_ms),
            GradientMode::FixedPhase { checkpoint, .. } => *checkpoint,
            GradientMode::Unrecognized(_) => match self.unknown_mode {
                UnknownModePolicy::KeepPrevious => self.last,
                UnknownModePolicy::FallbackToCycle => self.sample_cycle(now_ms),
            },
        };
        self.last = colors;
        colors
    }

    fn resolve(&self, name: &str) -> GradientMode {
        if name == MODE_CYCLE {
            return GradientMode::Cycle;
        }
        match self.phases.iter().find(|(phase, _)| phase == name) {
            Some((phase, checkpoint)) => GradientMode::FixedPhase {
                name: phase.clone(),
                checkpoint: *checkpoint,
            },
            None => GradientMode::Unrecognized(name.to_string()),
        }
    }

    fn sample_cycle(&self, now_ms: f64) -> GradientCheckpoint {
        let count = self.checkpoints.len();
        if count < 2 || self.duration_ms.is_nan() || self.duration_ms <= 0.0 {
            return self.checkpoints.first().copied().unwrap_or(self.last);
        }

        let phase = now_ms.rem_euclid(self.duration_ms) / self.duration_ms;
        let step = 1.0 / (count - 1) as f64;
        // Clamp guards phase values that round onto the final boundary.
        let index = ((phase / step).floor() as usize).min(count - 2);
        let local_t = (phase - index as f64 * step) / step;

        self.checkpoints[index].blend(self.checkpoints[index + 1], local_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::color::Rgb;

    fn grey(v: u8) -> GradientCheckpoint {
        GradientCheckpoint::new(Rgb::new(v, v, v), Rgb::new(v, v, v))
    }

    fn default_clock() -> GradientClock {
        GradientClock::new(&SkyParams::default())
    }

    #[test]
    fn test_two_checkpoint_midpoint() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(0), grey(100)], 1000.0);
        let colors = clock.sample(500.0);
        assert_eq!(colors.top, Rgb::new(50, 50, 50));
        assert_eq!(colors.bottom, Rgb::new(50, 50, 50));
    }

    #[test]
    fn test_start_and_wrap_return_first_checkpoint() {
        let params = SkyParams::default();
        let mut clock = default_clock();
        assert_eq!(clock.sample(0.0), params.checkpoints[0]);
        assert_eq!(clock.sample(params.cycle_duration_ms), params.checkpoints[0]);
        assert_eq!(clock.sample(params.cycle_duration_ms * 7.0), params.checkpoints[0]);
    }

    #[test]
    fn test_checkpoint_boundaries_hit_exactly() {
        let params = SkyParams::default();
        let mut clock = default_clock();
        // 4 segments of 15s each
        for (i, expected) in params.checkpoints.iter().enumerate().take(4) {
            let now = i as f64 * 15_000.0;
            assert_eq!(clock.sample(now), *expected, "checkpoint {i}");
        }
    }

    #[test]
    fn test_end_of_cycle_approaches_last_checkpoint() {
        let params = SkyParams::default();
        let mut clock = default_clock();
        let colors = clock.sample(params.cycle_duration_ms - 0.001);
        let last = params.checkpoints[params.checkpoints.len() - 1];
        assert_eq!(colors, last);
    }

    #[test]
    fn test_negative_time_wraps() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(0), grey(100)], 1000.0);
        assert_eq!(clock.sample(-500.0), grey(50));
    }

    #[test]
    fn test_top_and_bottom_blend_independently() {
        let a = GradientCheckpoint::new(Rgb::new(0, 0, 0), Rgb::new(200, 0, 0));
        let b = GradientCheckpoint::new(Rgb::new(0, 100, 0), Rgb::new(0, 0, 0));
        let mut clock = GradientClock::with_checkpoints(vec![a, b], 1000.0);
        let colors = clock.sample(250.0);
        assert_eq!(colors.top, Rgb::new(0, 25, 0));
        assert_eq!(colors.bottom, Rgb::new(150, 0, 0));
    }

    #[test]
    fn test_fixed_phase_ignores_time() {
        let params = SkyParams::default();
        let mut clock = default_clock();
        clock.set_mode("twilight");
        for now in [0.0, 1234.0, 30_000.0, 59_999.0, 1e12] {
            assert_eq!(clock.sample(now), params.checkpoints[3], "at {now}");
        }
        clock.set_mode("morning");
        assert_eq!(clock.sample(42.0), params.checkpoints[1]);
        clock.set_mode("midnight");
        assert_eq!(clock.sample(30_000.0), params.checkpoints[0]);
    }

    #[test]
    fn test_switch_back_to_cycle() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(0), grey(100)], 1000.0);
        clock.set_mode("cycle");
        assert_eq!(clock.mode(), &GradientMode::Cycle);
        assert_eq!(clock.sample(250.0), grey(25));
    }

    #[test]
    fn test_unknown_mode_keeps_previous_colors() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(0), grey(100)], 1000.0);
        assert_eq!(clock.sample(300.0), grey(30));
        clock.set_mode("sunrise-ish");
        assert_eq!(clock.mode(), &GradientMode::Unrecognized("sunrise-ish".into()));
        assert_eq!(clock.sample(700.0), grey(30));
        assert_eq!(clock.sample(900.0), grey(30));
    }

    #[test]
    fn test_unknown_mode_before_any_sample_shows_first_checkpoint() {
        let mut clock = default_clock();
        clock.set_mode("bogus");
        assert_eq!(clock.sample(30_000.0), SkyParams::default().checkpoints[0]);
    }

    #[test]
    fn test_unknown_mode_fallback_cycles() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(0), grey(100)], 1000.0);
        clock.set_unknown_mode_policy(UnknownModePolicy::FallbackToCycle);
        clock.sample(300.0);
        clock.set_mode("bogus");
        assert_eq!(clock.sample(700.0), grey(70));
    }

    #[test]
    fn test_fixed_then_unknown_keeps_fixed_colors() {
        let params = SkyParams::default();
        let mut clock = default_clock();
        clock.set_mode("twilight");
        clock.sample(0.0);
        clock.set_mode("Twilight");
        assert_eq!(clock.sample(10_000.0), params.checkpoints[3]);
    }

    #[test]
    fn test_phase_names() {
        let clock = default_clock();
        let names: Vec<&str> = clock.phase_names().collect();
        assert_eq!(names, ["midnight", "morning", "twilight"]);
    }

    #[test]
    fn test_single_checkpoint_is_static() {
        let mut clock = GradientClock::with_checkpoints(vec![grey(9)], 1000.0);
        assert_eq!(clock.sample(123.0), grey(9));
    }
}
