//! Reproducible random streams.
//!
//! Every sampling operation takes an explicit random handle. Monte Carlo
//! loops go one step further: path `i` draws from its own substream seeded
//! with `counter_rng_seed(root, i)`, so a forecast is bit-identical whether
//! paths run serially or on a rayon pool, and regardless of chunking.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::constants::DEFAULT_SEED;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Derive a well-distributed seed for substream `counter` of `seed`.
///
/// Uses the SplitMix64 finalizer over `seed ⊕ (counter × golden gamma)`, so
/// neighbouring counters land far apart in seed space.
#[inline]
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed ^ counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Injectable root of a family of independent random substreams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomStream {
    root: u64,
}

impl RandomStream {
    /// Create a stream rooted at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { root: seed }
    }

    /// The root seed.
    pub fn seed(&self) -> u64 {
        self.root
    }

    /// Generator for substream `index` (typically a path number).
    pub fn substream(&self, index: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(self.root, index))
    }

    /// Fork an independent stream for a distinct phase of work.
    ///
    /// Forks with different labels never share substreams with each other
    /// or with the parent, in practice.
    pub fn derive(&self, label: u64) -> Self {
        Self {
            root: counter_rng_seed(self.root.rotate_left(17) ^ 0xD1B5_4A32_D192_ED03, label),
        }
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Fill a row-major buffer one row per path.
///
/// Row `i` (of `width` cells) is handed to `fill` together with substream `i`
/// of `stream`. With the `parallel` feature rows are filled on the rayon
/// pool; the output is identical either way.
pub fn fill_rows<F>(buffer: &mut [f64], width: usize, stream: &RandomStream, fill: F)
where
    F: Fn(&mut Xoshiro256PlusPlus, &mut [f64]) + Sync + Send,
{
    if width == 0 {
        return;
    }
    debug_assert_eq!(buffer.len() % width, 0, "buffer must hold whole rows");

    #[cfg(feature = "parallel")]
    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row)| fill(&mut stream.substream(i as u64), row));

    #[cfg(not(feature = "parallel"))]
    for (i, row) in buffer.chunks_mut(width).enumerate() {
        fill(&mut stream.substream(i as u64), row);
    }
}
