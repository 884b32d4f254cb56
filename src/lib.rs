//! Fluida Engine - SPH fluid simulation in WASM
//!
//! A 2D smoothed-particle-hydrodynamics fluid with near-density correction
//! (double-density relaxation), run as a strict six-stage pipeline per
//! substep: external forces -> spatial hash -> sort/offsets -> density ->
//! pressure+viscosity -> integrate/collide.
//!
//! Architecture:
//! - core/       - math primitives (vectors, smoothing kernels)
//! - spatial/    - uniform hash grid + counting sort for neighbor search
//! - domain/     - settings, deterministic spawner
//! - particles/  - SoA particle state store
//! - systems/    - the pipeline stages
//! - simulation/ - orchestration + wasm facade

pub mod core;
pub mod domain;
pub mod error;
pub mod particles;
pub mod simulation;
pub mod spatial;
pub mod systems;

// Re-export main types
pub use crate::core::math::Vec2;
pub use crate::domain::settings::SimulationSettings;
pub use crate::domain::spawner::{generate, SpawnConfig, SpawnData};
pub use crate::error::SimError;
pub use crate::simulation::{PerfStats, Simulation, SimulationCore};

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon so the JS host can initialize the thread pool
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"🌊 Fluida WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
