//! Spawning of new cats.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::cat::CatParticle;
use super::config::SceneConfig;
use super::geometry::Point2D;

/// Factory for fresh calm cats at random in-bounds positions.
///
/// Ids increase monotonically, so every cat produced by one generator has a
/// distinct identity.
#[derive(Debug)]
pub struct CatGenerator {
    next_id: usize,
    rng: SmallRng,
}

impl CatGenerator {
    /// Creates an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a generator with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            next_id: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Keeps future ids clear of an externally supplied id.
    pub fn align_above(&mut self, id: usize) {
        if self.next_id <= id {
            self.next_id = id + 1;
        }
    }

    /// Produces one calm cat at a uniform random position inside the world.
    pub fn generate(&mut self, config: &SceneConfig) -> CatParticle {
        let pos = Point2D::new(
            self.rng.random_range(0.0..=config.grid_width),
            self.rng.random_range(0.0..=config.grid_height),
        );
        let id = self.next_id;
        self.next_id += 1;
        CatParticle::new(id, pos)
    }
}

impl Default for CatGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn policy over a [`CatGenerator`]: a per-tick count limited by the
/// population cap.
#[derive(Debug)]
pub struct CatEmitter {
    generator: CatGenerator,
}

impl CatEmitter {
    /// Wraps a generator.
    pub fn new(generator: CatGenerator) -> Self {
        Self { generator }
    }

    /// Emits at most `n` new cats, limited by the headroom under
    /// `config.max_particles` given the current population. May return fewer
    /// cats than asked for, or none.
    pub fn emit(&mut self, n: usize, population: usize, config: &SceneConfig) -> Vec<CatParticle> {
        let headroom = config.max_particles.saturating_sub(population);
        let count = n.min(headroom);
        (0..count).map(|_| self.generator.generate(config)).collect()
    }

    /// Keeps future ids clear of an externally supplied id.
    pub fn align_above(&mut self, id: usize) {
        self.generator.align_above(id);
    }
}
