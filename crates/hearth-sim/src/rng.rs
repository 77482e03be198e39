//! Seeded pseudo-random stream for the ember simulation.
//!
//! `sim_hash(seed, counter)` is a pure PCG-style mixer; `SimRng` walks the
//! counter so a given seed always replays the same ember history.

/// Source of uniform random numbers in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Hash a seed and counter into a well-distributed u32.
pub fn sim_hash(seed: u32, counter: u32) -> u32 {
    let mut state = seed
        .wrapping_mul(0x9E3779B9)
        .wrapping_add(counter.wrapping_mul(0x2545F491));

    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);

    state
}

/// Map a hash onto [0, 1).
pub fn hash_to_unit(hash: u32) -> f64 {
    hash as f64 / 4_294_967_296.0 // 2^32
}

/// Deterministic counter-based generator.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u32,
    counter: u32,
}

impl SimRng {
    pub fn new(seed: u32) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seed from a host timestamp (e.g. `performance.now()` in ms).
    pub fn from_timestamp(millis: f64) -> Self {
        let bits = millis.to_bits();
        Self::new((bits ^ (bits >> 32)) as u32)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        let value = hash_to_unit(sim_hash(self.seed, self.counter));
        self.counter = self.counter.wrapping_add(1);
        value
    }
}
