//! Simulation core - orchestration only
//!
//! The six-stage substep pipeline lives in step/, host commands in
//! commands/, configuration plumbing in init/. All particle math is in
//! systems/; this module owns the state and the ordering, nothing else.

use crate::core::math::Vec2;
use crate::domain::settings::{Interaction, SimulationSettings};
use crate::domain::spawner::SpawnData;
use crate::error::SimError;
use crate::particles::ParticleStore;
use crate::spatial::SpatialHash;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Simulation;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation engine: particle state, spatial hash, and the pristine
/// spawn snapshot that reset replays from.
pub struct SimulationCore {
    particles: ParticleStore,
    hash: SpatialHash,
    settings: SimulationSettings,
    interaction: Interaction,

    // Pristine spawn snapshot, kept for deterministic reset.
    spawn_positions: Vec<Vec2>,
    spawn_velocities: Vec<Vec2>,

    // State
    paused: bool,
    pause_after_step: bool,
    frame: u64,

    // Host readout scratch
    speed_buffer: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Create a simulation from explicit spawn data. Fails on mismatched
    /// array lengths, an empty spawn, or invalid settings.
    pub fn new(spawn: SpawnData, settings: SimulationSettings) -> Result<Self, SimError> {
        init::create_core(spawn, settings)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Read-only position view for the host renderer. Only valid between
    /// frames; the pipeline owns the arrays while a frame is stepping.
    pub fn positions(&self) -> &[Vec2] {
        &self.particles.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.particles.velocities
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Run one frame: `steps_per_frame` substeps at
    /// `dt = frame_duration / steps_per_frame * simulation_speed`.
    /// No-op while paused.
    pub fn step_frame(&mut self, frame_duration: f32) {
        step::step_frame(self, frame_duration);
    }

    pub fn set_paused(&mut self, paused: bool) {
        commands::set_paused(self, paused);
    }

    pub fn toggle_paused(&mut self) -> bool {
        commands::toggle_paused(self)
    }

    /// Resume, then auto-pause after the next single substep.
    pub fn step_once(&mut self) {
        commands::step_once(self);
    }

    /// Restore the pristine spawn snapshot. Replays exactly one substep
    /// between two restores, then leaves the simulation paused.
    pub fn reset(&mut self) {
        commands::reset(self);
    }

    pub fn set_interaction(&mut self, x: f32, y: f32, strength: f32) {
        settings::set_interaction(self, x, y, strength);
    }

    pub fn clear_interaction(&mut self) {
        settings::clear_interaction(self);
    }

    pub fn apply_settings(&mut self, new_settings: SimulationSettings) -> Result<(), SimError> {
        settings::apply_settings(self, new_settings)
    }

    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), SimError> {
        settings::apply_settings_json(self, json)
    }

    pub fn settings_json(&self) -> String {
        settings::settings_json(self)
    }

    /// Enable or disable per-stage perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Get pointer to positions as flat (x, y) pairs (for JS rendering)
    pub fn positions_ptr(&self) -> *const f32 {
        render_extract::positions_ptr(self)
    }

    pub fn velocities_ptr(&self) -> *const f32 {
        render_extract::velocities_ptr(self)
    }

    /// Fill and return the speed readout buffer (for JS color ramps)
    pub fn extract_speeds(&mut self) -> *const f32 {
        render_extract::extract_speeds(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
