//! Injected randomness for the randomised palette strategies.
//!
//! Strategies never reach for a global generator: they take a
//! [`RandomSource`], so tests can hand in a fixed seed (or a fixed
//! sequence) and assert exact output.

/// A source of uniformly distributed `u32`s.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform float in [0, 1].
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// Uniform float in [lo, hi].
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        (hi - lo).mul_add(self.next_f64(), lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        self.next_u32() as usize % len
    }
}

// ---------------------------------------------------------------------------
// Xorshift32
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG. No external `rand` crate needed.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Seed the generator. Xorshift has a fixed point at zero, so a zero
    /// seed is bumped to 1.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }
}

impl RandomSource for Xorshift32 {
    fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

/// Replays a fixed list of values, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct Sequence {
    values: Vec<u32>,
    pos: usize,
}

impl Sequence {
    /// An empty list replays zeros.
    #[must_use]
    pub const fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for Sequence {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
