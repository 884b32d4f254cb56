use wasm_bindgen::prelude::*;

use crate::core::math::Vec2;
use crate::domain::settings::SimulationSettings;
use crate::domain::spawner::{self, SpawnConfig, SpawnData};

use super::perf_stats::PerfStats;
use super::SimulationCore;

#[wasm_bindgen]
pub struct Simulation {
    core: SimulationCore,
}

#[wasm_bindgen]
impl Simulation {
    /// Create a simulation from interleaved (x, y) spawn arrays. An empty
    /// settings string selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        positions: &[f32],
        velocities: &[f32],
        settings_json: &str,
    ) -> Result<Simulation, JsValue> {
        let settings = parse_settings(settings_json)?;

        if positions.len() % 2 != 0 || velocities.len() % 2 != 0 {
            return Err(JsValue::from_str("spawn arrays must hold (x, y) pairs"));
        }

        let spawn = SpawnData {
            positions: pair_up(positions),
            velocities: pair_up(velocities),
        };

        SimulationCore::new(spawn, settings)
            .map(|core| Simulation { core })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a simulation from the deterministic spawner instead of
    /// explicit arrays.
    #[wasm_bindgen(js_name = withSpawner)]
    #[allow(clippy::too_many_arguments)]
    pub fn with_spawner(
        settings_json: &str,
        count: u32,
        center_x: f32,
        center_y: f32,
        size_x: f32,
        size_y: f32,
        speed_x: f32,
        speed_y: f32,
        jitter_intensity: f32,
        seed: u32,
    ) -> Result<Simulation, JsValue> {
        let settings = parse_settings(settings_json)?;
        let spawn = spawner::generate(&SpawnConfig {
            count,
            center: Vec2::new(center_x, center_y),
            size: Vec2::new(size_x, size_y),
            initial_speed: Vec2::new(speed_x, speed_y),
            jitter_intensity,
            seed,
        });

        SimulationCore::new(spawn, settings)
            .map(|core| Simulation { core })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 {
        self.core.particle_count() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool {
        self.core.is_paused()
    }

    /// Advance one frame; a no-op while paused.
    #[wasm_bindgen(js_name = stepFrame)]
    pub fn step_frame(&mut self, frame_duration: f32) {
        self.core.step_frame(frame_duration);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.core.toggle_paused()
    }

    /// Resume, then auto-pause after a single substep.
    pub fn step_once(&mut self) {
        self.core.step_once();
    }

    /// Re-initialize from the original spawn snapshot.
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Point the interaction force at (x, y). Negative strength attracts,
    /// positive repels; zero disables.
    pub fn set_interaction(&mut self, x: f32, y: f32, strength: f32) {
        self.core.set_interaction(x, y, strength);
    }

    pub fn clear_interaction(&mut self) {
        self.core.clear_interaction();
    }

    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        self.core
            .apply_settings_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn settings_json(&self) -> String {
        self.core.settings_json()
    }

    // === RENDER READOUT API ===
    // Zero-copy views into the particle arrays. Read between frames only.

    pub fn positions_ptr(&self) -> *const f32 {
        self.core.positions_ptr()
    }

    pub fn velocities_ptr(&self) -> *const f32 {
        self.core.velocities_ptr()
    }

    pub fn positions_len_elements(&self) -> usize {
        self.core.particle_count() * 2
    }

    pub fn positions_len_bytes(&self) -> usize {
        self.positions_len_elements() * std::mem::size_of::<f32>()
    }

    pub fn velocities_len_elements(&self) -> usize {
        self.core.particle_count() * 2
    }

    pub fn velocities_len_bytes(&self) -> usize {
        self.velocities_len_elements() * std::mem::size_of::<f32>()
    }

    /// Per-particle speeds for velocity-based coloring.
    pub fn speeds_ptr(&mut self) -> *const f32 {
        self.core.extract_speeds()
    }

    pub fn speeds_len_elements(&self) -> usize {
        self.core.particle_count()
    }

    /// Enable or disable per-stage perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

fn pair_up(flat: &[f32]) -> Vec<Vec2> {
    flat.chunks_exact(2).map(|pair| Vec2::new(pair[0], pair[1])).collect()
}

fn parse_settings(settings_json: &str) -> Result<SimulationSettings, JsValue> {
    if settings_json.trim().is_empty() {
        return Ok(SimulationSettings::default());
    }
    serde_json::from_str(settings_json)
        .map_err(|e| JsValue::from_str(&format!("malformed settings: {}", e)))
}
