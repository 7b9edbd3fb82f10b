//! Random-walk movement generation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::SceneConfig;
use super::geometry::Offset2D;

/// Produces one displacement per cat per tick.
///
/// The walk is a per-axis uniform step in `[-move_step, move_step]` plus the
/// configured bias. Seeded construction makes trajectories reproducible in
/// tests; the default draws entropy from the OS.
#[derive(Debug)]
pub struct MoveGenerator {
    rng: SmallRng,
}

impl MoveGenerator {
    /// Creates an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a generator with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Next displacement under the configured step bound and bias.
    pub fn next_offset(&mut self, config: &SceneConfig) -> Offset2D {
        let step = config.move_step;
        Offset2D::new(
            self.rng.random_range(-step..=step) + config.move_bias.dx,
            self.rng.random_range(-step..=step) + config.move_bias.dy,
        )
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}
