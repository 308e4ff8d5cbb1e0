use glam::Vec3;

/// Advance live positions one frame toward `control`-scaled targets.
///
/// Each particle closes `k` of its remaining distance, then gets a jitter of
/// `jitter * (sin, cos)(time + i)` in x and y. The phase offset `i` keeps the
/// shimmer of neighbouring particles out of step.
///
/// `live` and `targets` must have equal length.
pub fn relax_toward(
    live: &mut [Vec3],
    targets: &[Vec3],
    control: f32,
    k: f32,
    jitter: f32,
    time: f32,
) {
    debug_assert_eq!(live.len(), targets.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        live.par_iter_mut()
            .zip(targets.par_iter())
            .enumerate()
            .for_each(|(i, (p, t))| relax_one(p, *t, i, control, k, jitter, time));
    }

    #[cfg(not(feature = "parallel"))]
    for (i, (p, t)) in live.iter_mut().zip(targets).enumerate() {
        relax_one(p, *t, i, control, k, jitter, time);
    }
}

#[inline]
fn relax_one(p: &mut Vec3, target: Vec3, i: usize, control: f32, k: f32, jitter: f32, time: f32) {
    let scaled = target * control;
    *p += (scaled - *p) * k;

    let phase = time + i as f32;
    p.x += phase.sin() * jitter;
    p.y += phase.cos() * jitter;
}
