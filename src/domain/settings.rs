//! Simulation configuration.
//!
//! `SimulationSettings` is the host-facing knob surface, replaced atomically
//! through validated setters. The pipeline itself never reads it directly:
//! each substep derives an immutable `StepParams` snapshot (settings + dt +
//! interaction input + kernel scales) and the stages read only that.

use serde::{Deserialize, Serialize};

use crate::core::math::kernels::KernelScales;
use crate::core::math::Vec2;
use crate::error::SimError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SimulationSettings {
    pub simulation_speed: f32,
    pub use_fixed_time_steps: bool,
    pub steps_per_frame: u32,
    pub gravity: Vec2,
    pub restitution_coefficient: f32,
    /// Smoothing radius h: the neighbor cutoff distance.
    pub interaction_radius: f32,
    pub target_density: f32,
    pub pressure_multiplier: f32,
    pub near_pressure_multiplier: f32,
    pub viscosity_strength: f32,
    /// Full extent of the rectangular bounds, centered on the origin.
    pub bounds_size: Vec2,
    /// Full extent of the solid obstacle; zero disables it.
    pub obstacle_size: Vec2,
    pub obstacle_position: Vec2,
    pub user_interaction_radius: f32,
    pub user_force_magnitude: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            simulation_speed: 1.0,
            use_fixed_time_steps: false,
            steps_per_frame: 3,
            gravity: Vec2::new(0.0, -9.81),
            restitution_coefficient: 0.95,
            interaction_radius: 2.0,
            target_density: 3.0,
            pressure_multiplier: 50.0,
            near_pressure_multiplier: 2.0,
            viscosity_strength: 0.05,
            bounds_size: Vec2::new(30.0, 20.0),
            obstacle_size: Vec2::zero(),
            obstacle_position: Vec2::zero(),
            user_interaction_radius: 4.0,
            user_force_magnitude: 30.0,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.interaction_radius > 0.0) || !self.interaction_radius.is_finite() {
            return Err(SimError::NonPositive {
                name: "interactionRadius",
                value: self.interaction_radius,
            });
        }
        if self.steps_per_frame == 0 {
            return Err(SimError::ZeroSubstepCount);
        }
        if !(0.0..=1.0).contains(&self.restitution_coefficient) {
            return Err(SimError::OutOfUnitRange {
                name: "restitutionCoefficient",
                value: self.restitution_coefficient,
            });
        }
        Ok(())
    }
}

/// The host's per-step interaction input: a point force that is inactive at
/// strength zero. The host sends a negative strength to attract (pull
/// toward the pointer) and a positive one to repel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interaction {
    pub point: Vec2,
    pub strength: f32,
}

/// Immutable per-substep parameter snapshot read by the pipeline stages.
pub struct StepParams {
    pub dt: f32,
    pub gravity: Vec2,
    pub restitution: f32,
    pub target_density: f32,
    pub pressure_multiplier: f32,
    pub near_pressure_multiplier: f32,
    pub viscosity_strength: f32,
    pub half_bounds: Vec2,
    pub obstacle_half: Vec2,
    pub obstacle_center: Vec2,
    pub interaction_point: Vec2,
    pub interaction_strength: f32,
    pub interaction_radius: f32,
    pub scales: KernelScales,
}

impl StepParams {
    pub fn derive(settings: &SimulationSettings, interaction: Interaction, dt: f32) -> Self {
        Self {
            dt,
            gravity: settings.gravity,
            restitution: settings.restitution_coefficient,
            target_density: settings.target_density,
            pressure_multiplier: settings.pressure_multiplier,
            near_pressure_multiplier: settings.near_pressure_multiplier,
            viscosity_strength: settings.viscosity_strength,
            half_bounds: settings.bounds_size * 0.5,
            obstacle_half: settings.obstacle_size * 0.5,
            obstacle_center: settings.obstacle_position,
            interaction_point: interaction.point,
            interaction_strength: interaction.strength,
            interaction_radius: settings.user_interaction_radius,
            scales: KernelScales::new(settings.interaction_radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SimulationSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_smoothing_radius() {
        let mut settings = SimulationSettings::default();
        settings.interaction_radius = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SimError::NonPositive { name: "interactionRadius", .. })
        ));
    }

    #[test]
    fn rejects_zero_substep_count() {
        let mut settings = SimulationSettings::default();
        settings.steps_per_frame = 0;
        assert!(matches!(settings.validate(), Err(SimError::ZeroSubstepCount)));
    }

    #[test]
    fn rejects_restitution_outside_unit_range() {
        let mut settings = SimulationSettings::default();
        settings.restitution_coefficient = 1.5;
        assert!(matches!(
            settings.validate(),
            Err(SimError::OutOfUnitRange { name: "restitutionCoefficient", .. })
        ));
    }

    #[test]
    fn step_params_carry_half_extents() {
        let mut settings = SimulationSettings::default();
        settings.bounds_size = Vec2::new(10.0, 6.0);
        let params = StepParams::derive(&settings, Interaction::default(), 0.01);
        assert_eq!(params.half_bounds, Vec2::new(5.0, 3.0));
        assert_eq!(params.scales.h, settings.interaction_radius);
    }
}
