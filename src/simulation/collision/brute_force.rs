//! Brute-force reference strategy.

use super::{Collision, CollisionDetection, DetectionError};
use crate::simulation::cat::CatParticle;
use crate::simulation::config::SceneConfig;

/// Checks every unordered pair of cats.
///
/// O(n²) in the population size; the correctness oracle for the spatial
/// strategy and perfectly adequate for small populations.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForceCollisionDetection;

impl CollisionDetection for BruteForceCollisionDetection {
    fn find_collisions(
        &self,
        cats: &[CatParticle],
        config: &SceneConfig,
    ) -> Result<Vec<Collision>, DetectionError> {
        let metric = config.metric;
        let range = metric.query_radius(config.hiss_dist);

        let mut collisions = Vec::new();
        for (i, cat) in cats.iter().enumerate() {
            for (j, other) in cats.iter().enumerate().skip(i + 1) {
                let raw = metric.index_distance(cat.pos, other.pos);
                if raw <= range {
                    let distance = metric.from_index_distance(raw);
                    collisions.push(Collision {
                        first: i,
                        second: j,
                        distance,
                        state: config.state_for_distance(distance),
                    });
                }
            }
        }
        Ok(collisions)
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }
}
