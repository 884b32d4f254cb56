//! Particle state store - Structure of Arrays (SoA)
//!
//! Instead of: Vec<Particle>        // many small structs, poor cache use
//! We have:    positions[], velocities[], densities[]  // linear memory
//!
//! All arrays share one length, fixed at spawn time. Only the stage
//! pipeline writes them; host consumers get read-only views.

use crate::core::math::Vec2;

pub struct ParticleStore {
    /// Authoritative positions, advanced only by the integrate stage.
    pub positions: Vec<Vec2>,
    /// Forces-applied prediction, valid only within the current substep.
    pub predicted: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub densities: Vec<f32>,
    pub near_densities: Vec<f32>,

    /// Per-particle force accumulator for the pressure+viscosity stage.
    /// Lets the stage read the velocity snapshot while writes stay
    /// exclusive to each particle's own slot.
    pub(crate) forces: Vec<Vec2>,
}

impl ParticleStore {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec2::zero(); count],
            predicted: vec![Vec2::zero(); count],
            velocities: vec![Vec2::zero(); count],
            densities: vec![0.0; count],
            near_densities: vec![0.0; count],
            forces: vec![Vec2::zero(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Overwrite every array from spawn data. Predicted positions start at
    /// the authoritative positions and densities at zero.
    pub fn initialize(&mut self, positions: &[Vec2], velocities: &[Vec2]) {
        debug_assert_eq!(positions.len(), velocities.len());
        let count = positions.len();

        self.positions.clear();
        self.positions.extend_from_slice(positions);
        self.predicted.clear();
        self.predicted.extend_from_slice(positions);
        self.velocities.clear();
        self.velocities.extend_from_slice(velocities);

        self.densities.clear();
        self.densities.resize(count, 0.0);
        self.near_densities.clear();
        self.near_densities.resize(count, 0.0);
        self.forces.clear();
        self.forces.resize(count, Vec2::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_overwrites_all_arrays() {
        let mut store = ParticleStore::new(2);
        store.densities[0] = 9.0;
        store.velocities[1] = Vec2::new(5.0, 5.0);

        let positions = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let velocities = [Vec2::zero(), Vec2::new(-1.0, 0.0)];
        store.initialize(&positions, &velocities);

        assert_eq!(store.len(), 2);
        assert_eq!(store.positions[0], Vec2::new(1.0, 2.0));
        assert_eq!(store.predicted, store.positions);
        assert_eq!(store.velocities[1], Vec2::new(-1.0, 0.0));
        assert_eq!(store.densities, vec![0.0, 0.0]);
        assert_eq!(store.near_densities, vec![0.0, 0.0]);
    }
}
