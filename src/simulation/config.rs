//! Scene configuration and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cat::CatState;
use super::geometry::{Metric, Offset2D};

/// Raised when a configuration describes nonsensical geometry or scheduling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Batch size must allow at least one cat per unit of work.
    #[error("batch size must be at least 1")]
    NonPositiveBatchSize,
    /// Distance thresholds must be positive and finite.
    #[error("{name} must be positive, got {value}")]
    NonPositiveThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Hiss distance must not be below fight distance.
    #[error("hiss distance {hiss} is below fight distance {fight}")]
    ThresholdOrder {
        /// Configured fight distance.
        fight: f64,
        /// Configured hiss distance.
        hiss: f64,
    },
    /// World bounds must span a positive area.
    #[error("world bounds must be positive, got {width}x{height}")]
    NonPositiveBounds {
        /// Configured world width.
        width: f64,
        /// Configured world height.
        height: f64,
    },
    /// The movement step bound cannot be negative.
    #[error("move step must not be negative, got {0}")]
    NegativeMoveStep(f64),
    /// Reading or writing a configuration file failed.
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    /// A configuration file held invalid JSON.
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scene parameters, adjustable by the embedding layer between ticks.
///
/// Collision detection reads the configuration through a shared borrow and
/// snapshots `batch_size` once per call, so the values stay consistent for
/// the duration of a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Number of cats spawned at scene creation.
    pub particle_count: usize,
    /// Distance at or below which a pair fights.
    pub fight_dist: f64,
    /// Distance at or below which a pair hisses; also the collision range.
    pub hiss_dist: f64,
    /// Metric used for all proximity judgments.
    pub metric: Metric,
    /// Cats per unit of parallel work during collision detection.
    pub batch_size: usize,
    /// World width; positions are confined to `[0, grid_width]`.
    pub grid_width: f64,
    /// World height; positions are confined to `[0, grid_height]`.
    pub grid_height: f64,
    /// Per-axis bound of the random walk step.
    pub move_step: f64,
    /// Constant drift added to every step.
    pub move_bias: Offset2D,
    /// Cats the emitter may add per tick.
    pub spawn_per_tick: usize,
    /// Hard population cap; emission stops at this size.
    pub max_particles: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 500,
            fight_dist: 5.0,
            hiss_dist: 15.0,
            metric: Metric::Euclidean,
            batch_size: 64,
            grid_width: 800.0,
            grid_height: 600.0,
            move_step: 2.0,
            move_bias: Offset2D::default(),
            spawn_per_tick: 0,
            max_particles: 10_000,
        }
    }
}

impl SceneConfig {
    /// Checks the configuration, rejecting nonsensical geometry or scheduling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::NonPositiveBatchSize);
        }
        if !self.fight_dist.is_finite() || self.fight_dist <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold {
                name: "fight distance",
                value: self.fight_dist,
            });
        }
        if !self.hiss_dist.is_finite() || self.hiss_dist <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold {
                name: "hiss distance",
                value: self.hiss_dist,
            });
        }
        if self.hiss_dist < self.fight_dist {
            return Err(ConfigError::ThresholdOrder {
                fight: self.fight_dist,
                hiss: self.hiss_dist,
            });
        }
        if !self.grid_width.is_finite()
            || !self.grid_height.is_finite()
            || self.grid_width <= 0.0
            || self.grid_height <= 0.0
        {
            return Err(ConfigError::NonPositiveBounds {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !self.move_step.is_finite() || self.move_step < 0.0 {
            return Err(ConfigError::NegativeMoveStep(self.move_step));
        }
        Ok(())
    }

    /// State implied by a pairwise distance: fight inside `fight_dist`, hiss
    /// inside `hiss_dist`, calm beyond.
    pub fn state_for_distance(&self, distance: f64) -> CatState {
        if distance <= self.fight_dist {
            CatState::Fight
        } else if distance <= self.hiss_dist {
            CatState::Hiss
        } else {
            CatState::Calm
        }
    }

    /// Saves the configuration as pretty JSON.
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
