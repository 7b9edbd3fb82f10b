use std::env;

use tracing::info;

use catsim::simulation::collision::KdTreeCollisionDetection;
use catsim::simulation::config::SceneConfig;
use catsim::simulation::geometry::Metric;
use catsim::simulation::scene::CatScene;

const TICKS: u64 = 1_000;
const WORKER_THREADS: usize = 4;

fn seed_from_env() -> Option<u64> {
    env::var("CATSIM_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = SceneConfig {
        particle_count: 2_000,
        fight_dist: 3.0,
        hiss_dist: 9.0,
        metric: Metric::Euclidean,
        spawn_per_tick: 1,
        ..SceneConfig::default()
    };

    let detector = Box::new(KdTreeCollisionDetection::new(WORKER_THREADS)?);
    let mut scene = match seed_from_env() {
        Some(seed) => CatScene::with_seed(config, detector, seed)?,
        None => CatScene::new(config, detector)?,
    };

    info!(cats = scene.cats().len(), "simulation start");

    let mut total_collisions = 0usize;
    for _ in 0..TICKS {
        let report = scene.tick()?;
        total_collisions += report.collisions;
    }

    info!(
        ticks = scene.ticks(),
        cats = scene.cats().len(),
        total_collisions,
        "simulation finished"
    );
    Ok(())
}
