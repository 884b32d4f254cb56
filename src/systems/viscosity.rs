//! Viscosity force: pulls a particle's velocity toward its neighbors'.

use crate::core::math::Vec2;
use crate::domain::settings::StepParams;
use crate::spatial::SpatialHash;

/// Kernel-weighted sum of velocity differences against every neighbor.
/// Reads only the pre-stage velocity snapshot, so it composes with the
/// pressure force in one race-free pass.
pub(crate) fn force_at(
    i: usize,
    predicted: &[Vec2],
    velocities: &[Vec2],
    hash: &SpatialHash,
    params: &StepParams,
) -> Vec2 {
    if params.viscosity_strength == 0.0 {
        return Vec2::zero();
    }

    let pos = predicted[i];
    let velocity = velocities[i];
    let mut force = Vec2::zero();

    for key in hash.neighbor_keys(pos) {
        for &j in hash.bucket(key) {
            let j = j as usize;
            if j == i {
                continue;
            }
            let r_squared = (predicted[j] - pos).length_squared();
            if r_squared > params.scales.h_squared {
                continue;
            }
            let weight = params.scales.spiky_pow2(r_squared.sqrt());
            force += (velocities[j] - velocity) * weight;
        }
    }

    force * params.viscosity_strength
}
