//! Cat particles and their behavioral states.

use serde::{Deserialize, Serialize};

use super::geometry::Point2D;

/// Behavioral state of a cat, ordered by severity.
///
/// The `Ord` derive makes `Fight` the maximum, so resolving several
/// simultaneous collisions is a running `max`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CatState {
    /// No other cat within hiss distance.
    #[default]
    Calm,
    /// Another cat within hiss distance but outside fight distance.
    Hiss,
    /// Another cat within fight distance.
    Fight,
}

/// A simulated cat with a stable identity, a position and a state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatParticle {
    /// Unique identifier within the owning scene.
    pub id: usize,
    /// Position in 2D space.
    pub pos: Point2D,
    /// Current behavioral state.
    pub state: CatState,
}

impl CatParticle {
    /// Creates a calm cat at the given position.
    pub fn new(id: usize, pos: Point2D) -> Self {
        Self {
            id,
            pos,
            state: CatState::Calm,
        }
    }
}
