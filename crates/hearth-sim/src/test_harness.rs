/// Deterministic test doubles for the simulation.
///
/// `ScriptedRng` replays a fixed list of draws so tests can steer spawn
/// decisions and per-tick jitter exactly.
use crate::rng::RandomSource;

pub(crate) struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
    fallback: f64,
}

impl ScriptedRng {
    /// Replays `values` in order, then returns `fallback` forever.
    pub(crate) fn new(values: &[f64], fallback: f64) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
            fallback,
        }
    }

    /// Always returns `value`.
    pub(crate) fn constant(value: f64) -> Self {
        Self::new(&[], value)
    }

    pub(crate) fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(self.fallback);
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_then_fallback() {
        let mut rng = ScriptedRng::new(&[0.1, 0.2], 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.2);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.draws(), 3);
    }
}
