use crate::domain::settings::StepParams;
use crate::systems::{density, external_forces, integrate, pressure};

use super::{PerfTimer, SimulationCore};

/// Canonical 60 Hz frame duration. Reset's single replayed substep uses it
/// so reset stays deterministic regardless of the host's actual clock.
pub(super) const REFERENCE_FRAME_DURATION: f32 = 1.0 / 60.0;

pub(super) fn step_frame(core: &mut SimulationCore, frame_duration: f32) {
    if core.paused {
        return;
    }

    let steps_per_frame = core.settings.steps_per_frame;
    let dt = frame_duration / steps_per_frame as f32 * core.settings.simulation_speed;

    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
        core.perf_stats.particle_count = core.particles.len() as u32;
        core.perf_stats.table_size = core.hash.table_size();
        // rough memory estimate of the SoA arrays (bytes):
        // pos/pred/vel/forces (8 each) + density/near (4 each)
        core.perf_stats.memory_bytes = (core.particles.len() as u32)
            .saturating_mul(40)
            .saturating_add(core.hash.table_size().saturating_mul(12));
    }
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // Single-stepping runs exactly one substep, then re-pauses below.
    let substeps = if core.pause_after_step { 1 } else { steps_per_frame };
    for _ in 0..substeps {
        substep(core, dt);
    }

    if core.pause_after_step {
        core.paused = true;
        core.pause_after_step = false;
    }

    if perf_on {
        let mut max_speed = 0.0f32;
        for v in &core.particles.velocities {
            let speed = v.length();
            if speed > max_speed {
                max_speed = speed;
            }
        }
        core.perf_stats.max_speed = max_speed;
        if let Some(start) = frame_start {
            core.perf_stats.step_ms = start.elapsed_ms();
        }
    }

    core.frame += 1;
}

/// One full run of the six-stage pipeline. Stage order is fixed: density
/// and forces must read the same predicted-position snapshot the hash was
/// built from, and only the final stage advances the real positions.
pub(super) fn substep(core: &mut SimulationCore, dt: f32) {
    let params = StepParams::derive(&core.settings, core.interaction, dt);
    let perf_on = core.perf_enabled;

    // 1. External forces + position prediction
    if perf_on {
        let t0 = PerfTimer::start();
        external_forces::apply(&mut core.particles, &params);
        core.perf_stats.external_forces_ms += t0.elapsed_ms();
    } else {
        external_forces::apply(&mut core.particles, &params);
    }

    // 2. Hash keys from the predicted positions
    if perf_on {
        let t0 = PerfTimer::start();
        core.hash.compute_keys(&core.particles.predicted, params.scales.h);
        core.perf_stats.hash_ms += t0.elapsed_ms();
    } else {
        core.hash.compute_keys(&core.particles.predicted, params.scales.h);
    }

    // 3. Counting sort + offset table
    if perf_on {
        let t0 = PerfTimer::start();
        core.hash.sort_and_offsets();
        core.perf_stats.sort_ms += t0.elapsed_ms();
    } else {
        core.hash.sort_and_offsets();
    }

    // 4. Density + near-density
    if perf_on {
        let t0 = PerfTimer::start();
        density::compute(&mut core.particles, &core.hash, &params);
        core.perf_stats.density_ms += t0.elapsed_ms();
    } else {
        density::compute(&mut core.particles, &core.hash, &params);
    }

    // 5. Pressure + viscosity forces
    if perf_on {
        let t0 = PerfTimer::start();
        pressure::apply(&mut core.particles, &core.hash, &params);
        core.perf_stats.pressure_ms += t0.elapsed_ms();
    } else {
        pressure::apply(&mut core.particles, &core.hash, &params);
    }

    // 6. Integrate + collide
    if perf_on {
        let t0 = PerfTimer::start();
        integrate::advance(&mut core.particles, &params);
        core.perf_stats.integrate_ms += t0.elapsed_ms();
    } else {
        integrate::advance(&mut core.particles, &params);
    }

    if perf_on {
        core.perf_stats.substeps += 1;
    }
}
