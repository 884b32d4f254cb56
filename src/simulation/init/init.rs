use crate::domain::settings::{Interaction, SimulationSettings};
use crate::domain::spawner::SpawnData;
use crate::error::SimError;
use crate::particles::ParticleStore;
use crate::spatial::SpatialHash;

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn create_core(
    spawn: SpawnData,
    settings: SimulationSettings,
) -> Result<SimulationCore, SimError> {
    settings.validate()?;

    let SpawnData { positions, velocities } = spawn;
    if positions.len() != velocities.len() {
        return Err(SimError::MismatchedSpawnArrays {
            positions: positions.len(),
            velocities: velocities.len(),
        });
    }
    if positions.is_empty() {
        return Err(SimError::EmptySpawn);
    }

    let count = positions.len();
    let mut particles = ParticleStore::new(count);
    particles.initialize(&positions, &velocities);

    Ok(SimulationCore {
        particles,
        hash: SpatialHash::new(count),
        settings,
        interaction: Interaction::default(),
        spawn_positions: positions,
        spawn_velocities: velocities,
        paused: false,
        pause_after_step: false,
        frame: 0,
        speed_buffer: vec![0.0; count],
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}
