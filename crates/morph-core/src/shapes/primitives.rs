//! Geometric shape generators.
//!
//! Curve generators take a parametric angle `t` and are deterministic. The
//! volumetric ones place particle `i` of `count` and draw from `rng`, so two
//! regenerations of the same model differ point by point.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::math::{centered, disk_point, spherical_scatter};

/// Share of Saturn particles on the planet body; the rest form the ring.
pub const SATURN_BODY_SHARE: f32 = 0.6;
pub const SATURN_RADIUS: f32 = 7.0;

/// Heart curve `x = 16 sin^3 t`, `y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t`,
/// scaled by one half, flat in z.
pub fn shape_heart(t: f32) -> Vec3 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec3::new(x, y, 0.0) * 0.5
}

/// Five-petal rose `r = 8 cos 5t` with a `2 sin 10t` ripple in depth.
pub fn shape_flower(t: f32) -> Vec3 {
    let r = 8.0 * (5.0 * t).cos();
    Vec3::new(r * t.cos(), r * t.sin(), 2.0 * (10.0 * t).sin())
}

/// Planet on a golden-angle spiral sphere plus a flattened random ring.
pub fn shape_saturn<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let body = count as f32 * SATURN_BODY_SHARE;
    if (i as f32) < body {
        let phi = (-1.0 + 2.0 * i as f32 / body).clamp(-1.0, 1.0).acos();
        let theta = (body * std::f32::consts::PI).sqrt() * phi;
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        ) * SATURN_RADIUS
    } else {
        let angle = rng.gen::<f32>() * TAU;
        let radius = 10.0 + rng.gen::<f32>() * 5.0;
        Vec3::new(
            radius * angle.cos(),
            radius * angle.sin() * 0.2,
            radius * angle.sin(),
        )
    }
}

/// Seated-figure silhouette: widest at the middle, tapering to the top and
/// bottom of a 15 unit column.
pub fn shape_zen<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let y = centered(rng, 15.0);
    let width = ((1.0 - (y / 7.5).abs()) * 5.0).max(0.2);
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(
        angle.cos() * width * rng.gen::<f32>(),
        y,
        angle.sin() * width * rng.gen::<f32>(),
    )
}

/// Burst of radius 12, denser toward the centre.
pub fn shape_fireworks<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    spherical_scatter(rng, 12.0)
}

/// Cake tier as `(radius, height, base y)`.
const CAKE_TIERS: [(f32, f32, f32); 3] = [(9.0, 4.5, -7.0), (6.5, 4.5, -2.5), (4.5, 4.0, 2.0)];

/// Three stacked tiers, a candle and a flame.
pub fn shape_cake<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let fi = i as f32;
    let n = count as f32;
    if fi < n * 0.94 {
        let (radius, height, base) = CAKE_TIERS[i % 3];
        let (x, z) = disk_point(rng, radius);
        Vec3::new(x, base + rng.gen::<f32>() * height, z)
    } else if fi < n * 0.99 {
        let angle = rng.gen::<f32>() * TAU;
        let r = rng.gen::<f32>() * 0.3;
        let h = rng.gen::<f32>() * 3.5;
        Vec3::new(r * angle.cos(), h + 6.0, r * angle.sin())
    } else {
        let angle = rng.gen::<f32>() * TAU;
        let r = rng.gen::<f32>() * 0.8;
        let h = rng.gen::<f32>() * 1.5;
        Vec3::new(r * angle.cos() * 0.5, h + 9.5, r * angle.sin() * 0.5)
    }
}

pub const BALLOON_OFFSETS: [Vec3; 3] = [
    Vec3::new(-4.0, 8.0, 0.0),
    Vec3::new(4.0, 10.0, 2.0),
    Vec3::new(0.0, 12.0, -3.0),
];

/// Ground confetti, crossing streamers and three balloons.
pub fn shape_celebration<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let fi = i as f32;
    let n = count as f32;
    if fi < n * 0.5 {
        Vec3::new(
            centered(rng, 10.0),
            centered(rng, 10.0) - 5.0,
            centered(rng, 10.0),
        )
    } else if fi < n * 0.6 {
        if rng.gen::<f32>() > 0.5 {
            // horizontal band
            Vec3::new(
                centered(rng, 11.0),
                -5.0 + centered(rng, 0.5),
                centered(rng, 11.0),
            )
        } else {
            Vec3::new(
                centered(rng, 0.5),
                centered(rng, 11.0) - 5.0,
                centered(rng, 11.0),
            )
        }
    } else {
        BALLOON_OFFSETS[i % 3] + spherical_scatter(rng, 3.5)
    }
}
