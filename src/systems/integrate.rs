//! Stage 6: position integration and collision response.
//!
//! Bounds are resolved axis by axis: clamp the penetrated component back to
//! the wall and reflect that velocity component scaled by the restitution
//! coefficient. The obstacle applies the same rule inverted (particles must
//! stay outside), resolved along the axis of least penetration.

use crate::core::math::Vec2;
use crate::domain::settings::StepParams;
use crate::particles::ParticleStore;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn advance(store: &mut ParticleStore, params: &StepParams) {
    let ParticleStore { positions, velocities, .. } = store;

    #[cfg(feature = "parallel")]
    {
        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .for_each(|(position, velocity)| advance_one(position, velocity, params));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            advance_one(position, velocity, params);
        }
    }
}

fn advance_one(position: &mut Vec2, velocity: &mut Vec2, params: &StepParams) {
    *position += *velocity * params.dt;
    resolve_bounds(position, velocity, params);
    resolve_obstacle(position, velocity, params);
}

fn resolve_bounds(position: &mut Vec2, velocity: &mut Vec2, params: &StepParams) {
    let half = params.half_bounds;

    if position.x.abs() > half.x {
        position.x = half.x * position.x.signum();
        velocity.x *= -params.restitution;
    }
    if position.y.abs() > half.y {
        position.y = half.y * position.y.signum();
        velocity.y *= -params.restitution;
    }
}

fn resolve_obstacle(position: &mut Vec2, velocity: &mut Vec2, params: &StepParams) {
    let half = params.obstacle_half;
    if half.x <= 0.0 || half.y <= 0.0 {
        return;
    }

    let local = *position - params.obstacle_center;
    let penetration_x = half.x - local.x.abs();
    let penetration_y = half.y - local.y.abs();
    if penetration_x < 0.0 || penetration_y < 0.0 {
        return;
    }

    // Inside the solid region: push out through the nearest face.
    if penetration_x < penetration_y {
        position.x = params.obstacle_center.x + half.x * local.x.signum();
        velocity.x *= -params.restitution;
    } else {
        position.y = params.obstacle_center.y + half.y * local.y.signum();
        velocity.y *= -params.restitution;
    }
}
