//! RNG oracle for deterministic shuffling.
//!
//! Every random decision in a match (opening shuffle, mulligan reshuffle) is
//! derived from the session seed, so a session replays identically from its
//! seed and action log.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range `[0, bound)`. Returns 0 for an empty range.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each call is keyed by the seed it receives, so callers derive a
/// fresh seed per draw with [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from session components.
///
/// * `session_seed` - seed fixed at session creation
/// * `nonce` - action sequence number at the time of the roll
/// * `salt` - distinguishes players (usually the player id)
/// * `context` - distinguishes independent rolls within one operation
pub fn compute_seed(session_seed: u64, nonce: u64, salt: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= salt.wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Fisher-Yates shuffle keyed by `seed`.
pub fn shuffle<T, R>(rng: &R, seed: u64, items: &mut [T])
where
    R: RngOracle + ?Sized,
{
    for i in (1..items.len()).rev() {
        let step_seed = compute_seed(seed, i as u64, 0, 0);
        let j = rng.below(step_seed, (i + 1) as u32) as usize;
        items.swap(i, j);
    }
}
