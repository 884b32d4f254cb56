//! Stage 5: pressure + viscosity forces, then a velocity commit pass.
//!
//! The accumulation pass reads the stage-entry snapshot (predicted
//! positions, densities, velocities) and writes only the per-particle force
//! scratch slot; the commit pass then folds the forces into the velocities.
//! The split is what keeps the stage free of cross-particle read/write
//! aliasing.

use crate::core::math::Vec2;
use crate::domain::settings::StepParams;
use crate::particles::ParticleStore;
use crate::spatial::SpatialHash;

use super::viscosity;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn apply(store: &mut ParticleStore, hash: &SpatialHash, params: &StepParams) {
    accumulate_forces(store, hash, params);
    commit_velocities(store, params);
}

fn accumulate_forces(store: &mut ParticleStore, hash: &SpatialHash, params: &StepParams) {
    let ParticleStore { predicted, velocities, densities, near_densities, forces, .. } = store;
    let predicted: &[Vec2] = predicted;
    let velocities: &[Vec2] = velocities;
    let densities: &[f32] = densities;
    let near_densities: &[f32] = near_densities;

    #[cfg(feature = "parallel")]
    {
        forces.par_iter_mut().enumerate().for_each(|(i, force)| {
            *force = pressure_force_at(i, predicted, densities, near_densities, hash, params)
                + viscosity::force_at(i, predicted, velocities, hash, params);
        });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, force) in forces.iter_mut().enumerate() {
            *force = pressure_force_at(i, predicted, densities, near_densities, hash, params)
                + viscosity::force_at(i, predicted, velocities, hash, params);
        }
    }
}

fn commit_velocities(store: &mut ParticleStore, params: &StepParams) {
    let ParticleStore { velocities, densities, forces, .. } = store;
    let dt = params.dt;
    let target_density = params.target_density;

    #[cfg(feature = "parallel")]
    {
        velocities
            .par_iter_mut()
            .zip(forces.par_iter())
            .zip(densities.par_iter())
            .for_each(|((velocity, force), density)| {
                commit_one(velocity, *force, *density, target_density, dt);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((velocity, force), density) in
            velocities.iter_mut().zip(forces.iter()).zip(densities.iter())
        {
            commit_one(velocity, *force, *density, target_density, dt);
        }
    }
}

fn commit_one(velocity: &mut Vec2, force: Vec2, density: f32, target_density: f32, dt: f32) {
    // Near-empty neighborhoods must not blow up the update: floor a zero
    // density to the target, and if that is zero too, drop the force term.
    let density = if density > 0.0 { density } else { target_density };
    if density > 0.0 {
        *velocity += force * (dt / density);
    }
}

/// Symmetric double-density pressure force on particle `i`.
///
/// The direction runs from i to its neighbor and the spiky slope is
/// negative inside the support, so a positive shared pressure (density
/// above target) pushes the pair apart.
fn pressure_force_at(
    i: usize,
    predicted: &[Vec2],
    densities: &[f32],
    near_densities: &[f32],
    hash: &SpatialHash,
    params: &StepParams,
) -> Vec2 {
    let pos = predicted[i];
    let density = densities[i];
    let near_density = near_densities[i];
    let mut force = Vec2::zero();

    for key in hash.neighbor_keys(pos) {
        for &j in hash.bucket(key) {
            let j = j as usize;
            if j == i {
                continue;
            }

            let offset = predicted[j] - pos;
            let r_squared = offset.length_squared();
            if r_squared > params.scales.h_squared {
                continue;
            }

            let r = r_squared.sqrt();
            // Coincident pair: no defined direction, skip the force term
            // (the density stage still counted the overlap).
            if r < 1e-6 {
                continue;
            }
            let direction = offset * (1.0 / r);

            let shared_pressure = params.pressure_multiplier
                * (density + densities[j] - 2.0 * params.target_density)
                * 0.5
                + params.near_pressure_multiplier * (near_density + near_densities[j]) * 0.5;

            let neighbor_density =
                if densities[j] > 0.0 { densities[j] } else { params.target_density };
            if neighbor_density <= 0.0 {
                continue;
            }

            let slope = params.scales.spiky_pow3_derivative(r);
            force += direction * (shared_pressure * slope / neighbor_density);
        }
    }

    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{Interaction, SimulationSettings};
    use crate::systems::density;

    fn pressure_only_params(h: f32, target_density: f32) -> StepParams {
        let settings = SimulationSettings {
            gravity: Vec2::zero(),
            interaction_radius: h,
            target_density,
            pressure_multiplier: 1.0,
            near_pressure_multiplier: 0.0,
            viscosity_strength: 0.0,
            ..SimulationSettings::default()
        };
        StepParams::derive(&settings, Interaction::default(), 0.016)
    }

    fn prepared_store(positions: &[Vec2], params: &StepParams) -> (ParticleStore, SpatialHash) {
        let mut store = ParticleStore::new(positions.len());
        store.initialize(positions, &vec![Vec2::zero(); positions.len()]);
        let mut hash = SpatialHash::new(positions.len());
        hash.build(&store.predicted, params.scales.h);
        density::compute(&mut store, &hash, params);
        (store, hash)
    }

    #[test]
    fn compressed_pair_repels_symmetrically() {
        let params = pressure_only_params(2.0, 0.0);
        let (mut store, hash) = prepared_store(&[Vec2::zero(), Vec2::new(0.5, 0.0)], &params);

        apply(&mut store, &hash, &params);

        // Densities exceed the zero target, so the pair pushes apart.
        assert!(store.velocities[0].x < 0.0);
        assert!(store.velocities[1].x > 0.0);
        assert!((store.velocities[0].x + store.velocities[1].x).abs() < 1e-6);
        assert_eq!(store.velocities[0].y, 0.0);
    }

    #[test]
    fn sparse_pair_below_target_attracts() {
        let params = pressure_only_params(2.0, 100.0);
        let (mut store, hash) = prepared_store(&[Vec2::zero(), Vec2::new(1.0, 0.0)], &params);

        apply(&mut store, &hash, &params);

        assert!(store.velocities[0].x > 0.0);
        assert!(store.velocities[1].x < 0.0);
    }

    #[test]
    fn coincident_pair_produces_no_force() {
        let params = pressure_only_params(2.0, 0.0);
        let (mut store, hash) = prepared_store(&[Vec2::zero(), Vec2::zero()], &params);

        apply(&mut store, &hash, &params);

        assert_eq!(store.velocities[0], Vec2::zero());
        assert_eq!(store.velocities[1], Vec2::zero());
    }

    #[test]
    fn out_of_range_pair_is_untouched() {
        let params = pressure_only_params(1.0, 0.0);
        let (mut store, hash) = prepared_store(&[Vec2::zero(), Vec2::new(5.0, 0.0)], &params);

        apply(&mut store, &hash, &params);

        assert_eq!(store.velocities[0], Vec2::zero());
        assert_eq!(store.velocities[1], Vec2::zero());
    }
}
