//! Stage 4: density and near-density sums over the hashed neighborhood.

use crate::core::math::kernels::KernelScales;
use crate::core::math::Vec2;
use crate::domain::settings::StepParams;
use crate::particles::ParticleStore;
use crate::spatial::SpatialHash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn compute(store: &mut ParticleStore, hash: &SpatialHash, params: &StepParams) {
    let ParticleStore { predicted, densities, near_densities, .. } = store;
    let predicted: &[Vec2] = predicted;

    #[cfg(feature = "parallel")]
    {
        densities
            .par_iter_mut()
            .zip(near_densities.par_iter_mut())
            .enumerate()
            .for_each(|(i, (density, near_density))| {
                let (d, nd) = density_at(predicted[i], predicted, hash, &params.scales);
                *density = d;
                *near_density = nd;
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, (density, near_density)) in
            densities.iter_mut().zip(near_densities.iter_mut()).enumerate()
        {
            let (d, nd) = density_at(predicted[i], predicted, hash, &params.scales);
            *density = d;
            *near_density = nd;
        }
    }
}

/// Sum both kernels over every particle within h of `pos`, self included
/// (r = 0 contributes the kernel peak). Buckets over-approximate, so the
/// exact distance check is what actually defines the neighborhood.
pub(crate) fn density_at(
    pos: Vec2,
    predicted: &[Vec2],
    hash: &SpatialHash,
    scales: &KernelScales,
) -> (f32, f32) {
    let mut density = 0.0;
    let mut near_density = 0.0;

    for key in hash.neighbor_keys(pos) {
        for &j in hash.bucket(key) {
            let r_squared = (predicted[j as usize] - pos).length_squared();
            if r_squared > scales.h_squared {
                continue;
            }
            let r = r_squared.sqrt();
            density += scales.poly6(r);
            near_density += scales.spiky_pow2(r);
        }
    }

    (density, near_density)
}
