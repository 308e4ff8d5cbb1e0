use std::sync::{Arc, PoisonError, RwLock};

use glam::{Vec2, Vec3};
use log::{info, warn};
use rand::Rng;

use crate::error::{MorphError, Result};
use crate::shapes::dispatcher::{build_targets, ShapeModel};

/// An immutable, fully populated set of targets for one model.
///
/// Cloning is cheap; readers keep the buffer they cloned even if a newer one
/// is published meanwhile.
#[derive(Clone, Debug)]
pub struct TargetSnapshot {
    pub model: ShapeModel,
    /// Bumped on every publish.
    pub generation: u64,
    pub points: Arc<[Vec3]>,
}

/// Per-particle destinations of the active model.
///
/// New targets are built into a fresh buffer and swapped in whole, so a
/// reader never sees targets from two different models.
pub struct TargetField {
    count: usize,
    current: RwLock<TargetSnapshot>,
}

impl TargetField {
    /// A field of `count` targets all at the origin.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: RwLock::new(TargetSnapshot {
                model: ShapeModel::default(),
                generation: 0,
                points: vec![Vec3::ZERO; count].into(),
            }),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn snapshot(&self) -> TargetSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn model(&self) -> ShapeModel {
        self.snapshot().model
    }

    /// Swap in a complete target buffer. Rejects any buffer whose length
    /// differs from the particle count.
    pub fn publish(&self, model: ShapeModel, points: Vec<Vec3>) -> Result<u64> {
        if points.len() != self.count {
            return Err(MorphError::TargetLengthMismatch {
                expected: self.count,
                actual: points.len(),
            });
        }
        let points: Arc<[Vec3]> = points.into();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.generation += 1;
        current.model = model;
        current.points = points;
        Ok(current.generation)
    }

    /// Rebuild every target for `model` and publish the result.
    pub fn regenerate<R: Rng + ?Sized>(
        &self,
        model: ShapeModel,
        glyphs: &[Vec2],
        depth_jitter: f32,
        rng: &mut R,
    ) -> u64 {
        let points = build_targets(model, self.count, glyphs, depth_jitter, rng);
        self.commit(model, points)
    }

    /// Publish, keeping the previous snapshot on failure. Returns the
    /// generation now visible to readers.
    fn commit(&self, model: ShapeModel, points: Vec<Vec3>) -> u64 {
        match self.publish(model, points) {
            Ok(generation) => {
                info!("targets for {model} published (generation {generation})");
                generation
            }
            Err(err) => {
                let kept = self.snapshot();
                warn!(
                    "targets for {model} not published: {err}; keeping {} (generation {})",
                    kept.model, kept.generation
                );
                kept.generation
            }
        }
    }
}
