use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

/// Per-frame smoothing fraction.
///
/// With `independent == false` the factor is `k` for every call, so apparent
/// speed follows the frame rate. Otherwise it is rescaled so that a frame of
/// length `dt` closes as much distance as `dt / reference_dt` reference frames.
pub fn smoothing_factor(k: f32, dt: f32, reference_dt: f32, independent: bool) -> f32 {
    if !independent {
        return k;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return 0.0;
    }
    let frames = dt / reference_dt;
    (1.0 - (1.0 - k).powf(frames)).clamp(0.0, 1.0)
}

/// Distance fraction covered after `frames` steps of constant factor `k`.
pub fn relaxed_fraction(k: f32, frames: u32) -> f32 {
    1.0 - (1.0 - k).powi(frames as i32)
}

/// Uniform value in `[-extent/2, extent/2)`.
#[inline]
pub fn centered<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * extent
}

/// Random point in a ball from independently drawn radius, azimuth and polar
/// angle. Density rises toward the centre; callers rely on that look.
pub fn spherical_scatter<R: Rng + ?Sized>(rng: &mut R, max_radius: f32) -> Vec3 {
    let radius = rng.gen::<f32>() * max_radius;
    let phi = rng.gen::<f32>() * TAU;
    let theta = rng.gen::<f32>() * PI;
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Point uniformly distributed over a disk of `radius` in the XZ plane.
pub fn disk_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> (f32, f32) {
    let angle = rng.gen::<f32>() * TAU;
    let r = rng.gen::<f32>().sqrt() * radius;
    (r * angle.cos(), r * angle.sin())
}
