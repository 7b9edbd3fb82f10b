//! Parallel spatial-partition strategy.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use rayon::prelude::*;
use tracing::debug;

use super::{Collision, CollisionDetection, DetectionError};
use crate::simulation::cat::CatParticle;
use crate::simulation::config::SceneConfig;
use crate::simulation::geometry::{Metric, manhattan};

/// 2D KD-tree over cat positions; payloads are slice indices.
type Tree2D = KdTree<f64, usize, Vec<f64>>;

/// Spatial strategy: one KD-tree range query per cat, batched onto a
/// fixed-size worker pool.
///
/// The tree is rebuilt per call and shared read-only across workers. Batch
/// size is snapshotted from the config at call start, so adjusting it
/// between ticks never affects a call in flight. A failed batch fails the
/// whole call; the result is never a partial collision set.
pub struct KdTreeCollisionDetection {
    pool: rayon::ThreadPool,
    cancelled: Arc<AtomicBool>,
}

impl KdTreeCollisionDetection {
    /// Creates the strategy with a dedicated pool of `threads` workers.
    pub fn new(threads: usize) -> Result<Self, DetectionError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(Self {
            pool,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for aborting in-flight detection calls, e.g. on shutdown.
    ///
    /// Once the flag is set, calls return [`DetectionError::Cancelled`]
    /// instead of a partial collision set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn build_tree(cats: &[CatParticle]) -> Result<Tree2D, KdTreeError> {
        let mut tree = KdTree::with_capacity(2, cats.len());
        for (i, cat) in cats.iter().enumerate() {
            tree.add(cat.pos.to_vec(), i)?;
        }
        Ok(tree)
    }

    fn query(
        tree: &Tree2D,
        cat: &CatParticle,
        metric: Metric,
        range: f64,
    ) -> Result<Vec<(f64, usize)>, KdTreeError> {
        let point = cat.pos.to_vec();
        let found = match metric {
            Metric::Euclidean => tree.within(&point, range, &squared_euclidean)?,
            Metric::Manhattan => tree.within(&point, range, &manhattan)?,
        };
        Ok(found.into_iter().map(|(raw, &idx)| (raw, idx)).collect())
    }
}

impl CollisionDetection for KdTreeCollisionDetection {
    fn find_collisions(
        &self,
        cats: &[CatParticle],
        config: &SceneConfig,
    ) -> Result<Vec<Collision>, DetectionError> {
        if cats.len() < 2 {
            return Ok(Vec::new());
        }

        // One read per call; the value cannot change underneath the batches.
        let batch_size = config.batch_size.max(1);
        let metric = config.metric;
        let range = metric.query_radius(config.hiss_dist);

        let tree = Self::build_tree(cats)?;
        let cancelled = &self.cancelled;

        let collisions = self.pool.install(|| {
            cats.par_chunks(batch_size)
                .enumerate()
                .map(|(chunk_idx, chunk)| {
                    if cancelled.load(Ordering::Relaxed) {
                        return Err(DetectionError::Cancelled);
                    }
                    let mut local = Vec::new();
                    for (offset, cat) in chunk.iter().enumerate() {
                        let i = chunk_idx * batch_size + offset;
                        for (raw, j) in Self::query(&tree, cat, metric, range)? {
                            // Each pair is seen from both endpoints; keep the
                            // copy found from the lower index.
                            if j <= i || raw > range {
                                continue;
                            }
                            let distance = metric.from_index_distance(raw);
                            local.push(Collision {
                                first: i,
                                second: j,
                                distance,
                                state: config.state_for_distance(distance),
                            });
                        }
                    }
                    Ok(local)
                })
                .try_reduce(Vec::new, |mut merged, mut batch| {
                    merged.append(&mut batch);
                    Ok(merged)
                })
        })?;

        debug!(
            cats = cats.len(),
            batch_size,
            collisions = collisions.len(),
            "kd-tree detection complete"
        );
        Ok(collisions)
    }

    fn name(&self) -> &'static str {
        "KdTree"
    }
}
