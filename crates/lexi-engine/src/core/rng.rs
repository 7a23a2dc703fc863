//! Seedable pseudo-random number generator (xorshift64) with a uniform shuffle.
//! Deterministic for a given seed, so boards can be replayed in tests.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Build a generator from a float in [0, 1), e.g. `Math.random()` on the JS side.
    pub fn from_unit_seed(seed: f64) -> Self {
        let scaled = (seed.clamp(0.0, 1.0) * u64::MAX as f64) as u64;
        // Mix so nearby floats do not produce nearby first outputs.
        Self::new(scaled ^ 0x9E37_79B9_7F4A_7C15)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform in-place shuffle (Fisher–Yates, walking down from the end).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}
