//! Collision-detection strategies.
//!
//! A scene runs exactly one [`CollisionDetection`] strategy per tick. The
//! brute-force strategy is the O(n²) reference; the KD-tree strategy must
//! return the same pair set while scaling to thousands of cats.

use thiserror::Error;

use super::cat::{CatParticle, CatState};
use super::config::SceneConfig;

mod brute_force;
mod kd_tree;

pub use brute_force::BruteForceCollisionDetection;
pub use kd_tree::KdTreeCollisionDetection;

/// One detected pair within hiss distance, annotated with the implied state.
///
/// Produced fresh on every call and never persisted. Exactly one value is
/// emitted per unordered pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Index of the lower-indexed cat in the slice handed to the strategy.
    pub first: usize,
    /// Index of the higher-indexed cat.
    pub second: usize,
    /// Distance between the pair under the configured metric.
    pub distance: f64,
    /// State implied by the distance: `Fight` or `Hiss`.
    pub state: CatState,
}

/// Raised when a detection call cannot produce a complete collision set.
///
/// A partial set is never returned; callers either get every colliding pair
/// or an error.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The spatial index rejected a position (non-finite coordinate).
    #[error("spatial index: {0}")]
    Index(#[from] kdtree::ErrorKind),
    /// The worker pool could not be constructed.
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    /// The call was cancelled before all batches completed.
    #[error("detection cancelled")]
    Cancelled,
}

/// A pluggable collision-detection strategy.
///
/// Implementations read positions only. A pair is colliding when its
/// distance under `config.metric` is at most `config.hiss_dist`; the derived
/// state is `Fight` within `config.fight_dist` and `Hiss` otherwise. The
/// pair set must be identical across implementations for any input, though
/// the emission order is unspecified.
pub trait CollisionDetection: Send + Sync {
    /// Finds every pair of cats within hiss distance of each other.
    fn find_collisions(
        &self,
        cats: &[CatParticle],
        config: &SceneConfig,
    ) -> Result<Vec<Collision>, DetectionError>;

    /// Human-readable name for logging and display.
    fn name(&self) -> &'static str;
}
