//! Scene orchestration: the per-tick state machine.

use thiserror::Error;
use tracing::debug;

use super::cat::{CatParticle, CatState};
use super::collision::{Collision, CollisionDetection, DetectionError};
use super::config::{ConfigError, SceneConfig};
use super::emitter::{CatEmitter, CatGenerator};
use super::movement::MoveGenerator;

/// Raised when a tick cannot complete.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Collision detection failed; no state was applied.
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

/// What one tick did, for logging and the embedding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Colliding pairs found this tick.
    pub collisions: usize,
    /// Cats added by the emitter this tick.
    pub spawned: usize,
}

/// A population of cats advancing tick by tick.
///
/// The tick loop is single-threaded per scene; only collision detection
/// fans out, and it is joined before any state is applied. Collaborators
/// may read [`cats`](Self::cats) whenever no `tick` call is in progress.
pub struct CatScene {
    cats: Vec<CatParticle>,
    config: SceneConfig,
    emitter: CatEmitter,
    mover: MoveGenerator,
    detector: Box<dyn CollisionDetection>,
    ticks: u64,
}

impl CatScene {
    /// Creates a scene populated with `config.particle_count` random cats.
    pub fn new(
        config: SceneConfig,
        detector: Box<dyn CollisionDetection>,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let mut emitter = CatEmitter::new(CatGenerator::new());
        let cats = emitter.emit(config.particle_count, 0, &config);
        Ok(Self {
            cats,
            config,
            emitter,
            mover: MoveGenerator::new(),
            detector,
            ticks: 0,
        })
    }

    /// Creates a reproducible scene: spawning and movement derive from `seed`.
    pub fn with_seed(
        config: SceneConfig,
        detector: Box<dyn CollisionDetection>,
        seed: u64,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let mut emitter = CatEmitter::new(CatGenerator::with_seed(seed));
        let cats = emitter.emit(config.particle_count, 0, &config);
        Ok(Self {
            cats,
            config,
            emitter,
            mover: MoveGenerator::with_seed(seed.wrapping_add(1)),
            detector,
            ticks: 0,
        })
    }

    /// Creates a scene around an existing population.
    ///
    /// The emitter's id counter is bumped past the largest supplied id, so
    /// later spawns cannot collide with the given identities.
    pub fn from_particles(
        cats: Vec<CatParticle>,
        config: SceneConfig,
        detector: Box<dyn CollisionDetection>,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let mut emitter = CatEmitter::new(CatGenerator::new());
        if let Some(max_id) = cats.iter().map(|cat| cat.id).max() {
            emitter.align_above(max_id);
        }
        Ok(Self {
            cats,
            config,
            emitter,
            mover: MoveGenerator::new(),
            detector,
            ticks: 0,
        })
    }

    /// Read-only snapshot of the population; valid between ticks.
    pub fn cats(&self) -> &[CatParticle] {
        &self.cats
    }

    /// The active configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Replaces the configuration between ticks after validating it.
    pub fn update_config(&mut self, config: SceneConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Runs the configured strategy without advancing the simulation.
    pub fn find_collisions(&self) -> Result<Vec<Collision>, DetectionError> {
        self.detector.find_collisions(&self.cats, &self.config)
    }

    /// State implied by a pairwise distance under the current thresholds.
    pub fn calc_new_state(&self, distance: f64) -> CatState {
        self.config.state_for_distance(distance)
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the simulation by one step.
    ///
    /// Detect, reset every cat to calm, apply the most severe state per cat,
    /// move everyone, then spawn. Detection runs against the pre-move
    /// positions and completes before anything is mutated, so a failure
    /// leaves the scene exactly as it was.
    pub fn tick(&mut self) -> Result<TickReport, SceneError> {
        let collisions = self.detector.find_collisions(&self.cats, &self.config)?;

        // Judged from this tick's distances only; prior states are irrelevant.
        for cat in &mut self.cats {
            cat.state = CatState::Calm;
        }
        for collision in &collisions {
            let state = collision.state;
            let first = &mut self.cats[collision.first];
            first.state = first.state.max(state);
            let second = &mut self.cats[collision.second];
            second.state = second.state.max(state);
        }

        for cat in &mut self.cats {
            let offset = self.mover.next_offset(&self.config);
            cat.pos = (cat.pos + offset).clamped(self.config.grid_width, self.config.grid_height);
        }

        // Spawned cats join after movement and are not part of this tick's
        // collision judgment.
        let spawned = self
            .emitter
            .emit(self.config.spawn_per_tick, self.cats.len(), &self.config);
        let report = TickReport {
            collisions: collisions.len(),
            spawned: spawned.len(),
        };
        self.cats.extend(spawned);

        self.ticks += 1;
        debug!(
            tick = self.ticks,
            collisions = report.collisions,
            spawned = report.spawned,
            strategy = self.detector.name(),
            "tick complete"
        );
        Ok(report)
    }
}
