//! Permutation source for pile shuffles.
//!
//! A shuffle takes one 64-bit draw from the `shuffle` stream and uses it to seed a
//! 48-bit linear congruential generator, which drives a descending Fisher–Yates pass.
//! The stream counter therefore advances by exactly one per shuffle, independent of
//! how many cards are permuted.

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit LCG with scrambled seed.
#[derive(Clone, Debug)]
pub(crate) struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = (self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND)) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Uniform integer in `[0, bound)`; `bound` must be positive.
    pub(crate) fn below(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0);
        if (bound & -bound) == bound {
            return ((i64::from(bound) * i64::from(self.next_bits(31))) >> 31) as i32;
        }
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if bits.checked_sub(value).and_then(|v| v.checked_add(bound - 1)).is_some() {
                return value;
            }
        }
    }
}

/// Fisher–Yates pass from the last index down, swapping each slot with a uniformly
/// chosen slot at or below it.
pub(crate) fn permute<T>(items: &mut [T], seed: u64) {
    let mut lcg = Lcg48::new(seed);
    for i in (1..items.len()).rev() {
        let j = lcg.below(i as i32 + 1) as usize;
        items.swap(i, j);
    }
}
