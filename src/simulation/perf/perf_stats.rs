use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) external_forces_ms: f64,
    pub(super) hash_ms: f64,
    pub(super) sort_ms: f64,
    pub(super) density_ms: f64,
    pub(super) pressure_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) substeps: u32,
    pub(super) particle_count: u32,
    pub(super) table_size: u32,
    pub(super) max_speed: f32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            external_forces_ms: 0.0,
            hash_ms: 0.0,
            sort_ms: 0.0,
            density_ms: 0.0,
            pressure_ms: 0.0,
            integrate_ms: 0.0,
            substeps: 0,
            particle_count: 0,
            table_size: 0,
            max_speed: 0.0,
            memory_bytes: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn external_forces_ms(&self) -> f64 { self.external_forces_ms }
    #[wasm_bindgen(getter)]
    pub fn hash_ms(&self) -> f64 { self.hash_ms }
    #[wasm_bindgen(getter)]
    pub fn sort_ms(&self) -> f64 { self.sort_ms }
    #[wasm_bindgen(getter)]
    pub fn density_ms(&self) -> f64 { self.density_ms }
    #[wasm_bindgen(getter)]
    pub fn pressure_ms(&self) -> f64 { self.pressure_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn table_size(&self) -> u32 { self.table_size }
    #[wasm_bindgen(getter)]
    pub fn max_speed(&self) -> f32 { self.max_speed }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
