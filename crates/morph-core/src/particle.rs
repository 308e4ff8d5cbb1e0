use glam::Vec3;
use rand::Rng;

use crate::math::centered;

/// Live particle positions. Particles are identified only by index.
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec3>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
        }
    }

    /// Scatter every particle uniformly in a centred cube of edge `extent`.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R, extent: f32) {
        for p in &mut self.position {
            *p = Vec3::new(
                centered(rng, extent),
                centered(rng, extent),
                centered(rng, extent),
            );
        }
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` slice for upload.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.position)
    }
}
