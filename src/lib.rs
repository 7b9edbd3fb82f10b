//! # Catsim - Proximity-Driven Cat Simulation
//!
//! A simulation of cats wandering a 2D world. Every tick, each pair of cats
//! within hiss distance is detected and both participants escalate: `Hiss`
//! inside hiss range, `Fight` inside fight range, back to `Calm` otherwise.
//!
//! ## Features
//!
//! - Pluggable collision detection: a brute-force O(n²) reference and a
//!   parallel KD-tree strategy that agree exactly on the collision set
//! - Euclidean and Manhattan proximity metrics
//! - Batched range queries on a fixed-size worker pool
//! - Seedable movement and spawning for reproducible runs
//! - Validated, serde-backed configuration
//!
//! ## Core Modules
//!
//! - [`simulation::scene`] - Tick orchestration and the state machine
//! - [`simulation::collision`] - Collision-detection strategies
//! - [`simulation::geometry`] - Points, offsets and distance metrics
//! - [`simulation::emitter`] - Spawning of new cats
//! - [`simulation::movement`] - Random-walk movement

/// Core simulation logic and data structures.
pub mod simulation {
    /// Cat particles and behavioral states.
    pub mod cat;
    /// Collision-detection strategies and the strategy trait.
    pub mod collision;
    /// Scene configuration and validation.
    pub mod config;
    /// Spawning of new cats.
    pub mod emitter;
    /// 2D geometry primitives and distance metrics.
    pub mod geometry;
    /// Random-walk movement generation.
    pub mod movement;
    /// Scene orchestration and the tick state machine.
    pub mod scene;
}
