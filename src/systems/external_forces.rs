//! Stage 1: gravity, host interaction force, position prediction.

use crate::core::math::Vec2;
use crate::domain::settings::StepParams;
use crate::particles::ParticleStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn apply(store: &mut ParticleStore, params: &StepParams) {
    let ParticleStore { positions, predicted, velocities, .. } = store;

    #[cfg(feature = "parallel")]
    {
        positions
            .par_iter()
            .zip(predicted.par_iter_mut())
            .zip(velocities.par_iter_mut())
            .for_each(|((position, prediction), velocity)| {
                apply_one(*position, prediction, velocity, params);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((position, prediction), velocity) in
            positions.iter().zip(predicted.iter_mut()).zip(velocities.iter_mut())
        {
            apply_one(*position, prediction, velocity, params);
        }
    }
}

fn apply_one(position: Vec2, prediction: &mut Vec2, velocity: &mut Vec2, params: &StepParams) {
    *velocity += params.gravity * params.dt;

    if params.interaction_strength != 0.0 {
        *velocity += interaction_force(position, params) * params.dt;
    }

    // Explicit Euler prediction, used only for this substep's neighbor
    // search; collisions are resolved against the real position later.
    *prediction = position + *velocity * params.dt;
}

/// Radial falloff force around the host's interaction point. Positive
/// strength pushes particles away; the host sends a negative strength to
/// attract.
fn interaction_force(position: Vec2, params: &StepParams) -> Vec2 {
    let radius = params.interaction_radius;
    if radius <= 0.0 {
        return Vec2::zero();
    }

    let offset = position - params.interaction_point;
    let dist_squared = offset.length_squared();
    if dist_squared >= radius * radius || dist_squared < 1e-12 {
        return Vec2::zero();
    }

    let dist = dist_squared.sqrt();
    let falloff = 1.0 - dist / radius;
    offset * (params.interaction_strength * falloff / dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{Interaction, SimulationSettings};

    fn quiet_settings() -> SimulationSettings {
        SimulationSettings {
            gravity: Vec2::zero(),
            ..SimulationSettings::default()
        }
    }

    #[test]
    fn gravity_accelerates_and_predicts() {
        let mut settings = quiet_settings();
        settings.gravity = Vec2::new(0.0, -10.0);
        let params = StepParams::derive(&settings, Interaction::default(), 0.1);

        let mut store = ParticleStore::new(1);
        store.initialize(&[Vec2::new(2.0, 3.0)], &[Vec2::zero()]);
        apply(&mut store, &params);

        assert_eq!(store.velocities[0], Vec2::new(0.0, -1.0));
        assert_eq!(store.predicted[0], Vec2::new(2.0, 3.0 - 0.1));
        // Authoritative position is untouched until the integrate stage.
        assert_eq!(store.positions[0], Vec2::new(2.0, 3.0));
    }

    #[test]
    fn negative_strength_attracts_toward_point() {
        let mut settings = quiet_settings();
        settings.user_interaction_radius = 5.0;
        let interaction = Interaction { point: Vec2::zero(), strength: -10.0 };
        let params = StepParams::derive(&settings, interaction, 0.1);

        let mut store = ParticleStore::new(1);
        store.initialize(&[Vec2::new(1.0, 0.0)], &[Vec2::zero()]);
        apply(&mut store, &params);

        assert!(store.velocities[0].x < 0.0);
        assert_eq!(store.velocities[0].y, 0.0);
    }

    #[test]
    fn interaction_ignores_particles_outside_radius() {
        let mut settings = quiet_settings();
        settings.user_interaction_radius = 0.5;
        let interaction = Interaction { point: Vec2::zero(), strength: 100.0 };
        let params = StepParams::derive(&settings, interaction, 0.1);

        let mut store = ParticleStore::new(1);
        store.initialize(&[Vec2::new(1.0, 0.0)], &[Vec2::zero()]);
        apply(&mut store, &params);

        assert_eq!(store.velocities[0], Vec2::zero());
    }

    #[test]
    fn force_fades_to_zero_at_radius_edge() {
        let mut settings = quiet_settings();
        settings.user_interaction_radius = 2.0;
        let interaction = Interaction { point: Vec2::zero(), strength: 10.0 };
        let params = StepParams::derive(&settings, interaction, 1.0);

        let near = interaction_force(Vec2::new(0.5, 0.0), &params);
        let far = interaction_force(Vec2::new(1.9, 0.0), &params);
        assert!(near.x > far.x);
        assert!(far.x > 0.0);
        assert!(far.x < 1.0);
    }
}
