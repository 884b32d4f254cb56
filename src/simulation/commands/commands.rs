use super::{step, SimulationCore};

pub(super) fn set_paused(core: &mut SimulationCore, paused: bool) {
    core.paused = paused;
}

pub(super) fn toggle_paused(core: &mut SimulationCore) -> bool {
    core.paused = !core.paused;
    core.paused
}

pub(super) fn step_once(core: &mut SimulationCore) {
    core.paused = false;
    core.pause_after_step = true;
}

/// Restore the pristine spawn snapshot, replay a single substep, then
/// restore again. The second restore makes the observable state exactly
/// the fresh spawn, so reset + step_frame equals init + step_frame.
pub(super) fn reset(core: &mut SimulationCore) {
    core.paused = true;
    core.pause_after_step = false;

    restore_spawn(core);

    let dt = step::REFERENCE_FRAME_DURATION / core.settings.steps_per_frame as f32
        * core.settings.simulation_speed;
    step::substep(core, dt);

    restore_spawn(core);
    core.frame = 0;
}

fn restore_spawn(core: &mut SimulationCore) {
    core.particles.initialize(&core.spawn_positions, &core.spawn_velocities);
}
