//! Deterministic world seeding.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// RNG for a world seed. The same seed yields the same sequence on every
/// platform.
pub fn world_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws a fresh seed from the thread RNG, for worlds with no configured seed.
///
/// Log the returned value so the world can be rebuilt later.
pub fn random_seed() -> u64 {
    rand::rng().random()
}
