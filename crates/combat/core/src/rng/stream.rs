//! A single named RNG stream.
//!
//! The generator is xorshift128+ with its two state words seeded through the
//! murmur3 64-bit finalizer. Every public draw consumes exactly one 64-bit step and
//! bumps the counter by one, so a stream is fully described by `(seed, counter)`.

/// Stream state: seed, generator words, and the number of steps consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RngStream {
    seed: u64,
    s0: u64,
    s1: u64,
    counter: u64,
}

impl RngStream {
    /// Creates a fresh stream positioned at counter 0.
    pub fn new(seed: u64) -> Self {
        let s0 = murmur_fmix(if seed == 0 { 1 << 63 } else { seed });
        let s1 = murmur_fmix(s0);
        Self {
            seed,
            s0,
            s1,
            counter: 0,
        }
    }

    /// Creates a stream positioned after `counter` steps.
    pub fn restored(seed: u64, counter: u64) -> Self {
        let mut stream = Self::new(seed);
        for _ in 0..counter {
            stream.step();
        }
        stream
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Advances the generator by one 64-bit step.
    #[inline]
    fn step(&mut self) -> u64 {
        let mut s1 = self.s0;
        let s0 = self.s1;
        self.s0 = s0;
        s1 ^= s1 << 23;
        self.s1 = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
        self.counter += 1;
        self.s1.wrapping_add(s0)
    }

    /// Raw 64-bit draw.
    pub fn next_u64(&mut self) -> u64 {
        self.step()
    }

    /// Uniform integer in `[0, bound)`. A bound of 0 or 1 still consumes a step.
    ///
    /// Uses the top 63 bits with the classic rejection test; the rare rejected
    /// values are remapped from the same step so the counter stays one per draw.
    pub fn below(&mut self, bound: u64) -> u64 {
        let raw = self.step();
        if bound <= 1 {
            return 0;
        }
        let mut bits = raw >> 1;
        loop {
            let value = bits % bound;
            // Reject the final partial block of the 63-bit range.
            if bits - value <= (i64::MAX as u64) - (bound - 1) {
                return value;
            }
            bits = murmur_fmix(bits) >> 1;
        }
    }

    /// Uniform integer in `[low, high]` (inclusive).
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            self.step();
            return low;
        }
        let span = (i64::from(high) - i64::from(low) + 1) as u64;
        low + self.below(span) as i32
    }

    /// Uniform float in `[0, 1)` with 24 bits of precision.
    pub fn unit_f32(&mut self) -> f32 {
        (self.step() >> 40) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.step() & 1 != 0
    }
}

/// murmur3 64-bit finalizer, used to spread seed entropy over both state words.
#[inline]
pub(crate) fn murmur_fmix(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}
