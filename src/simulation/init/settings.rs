use crate::core::math::Vec2;
use crate::domain::settings::{Interaction, SimulationSettings};
use crate::error::SimError;

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn apply_settings(
    core: &mut SimulationCore,
    new_settings: SimulationSettings,
) -> Result<(), SimError> {
    new_settings.validate()?;
    core.settings = new_settings;
    Ok(())
}

pub(super) fn apply_settings_json(core: &mut SimulationCore, json: &str) -> Result<(), SimError> {
    let parsed: SimulationSettings =
        serde_json::from_str(json).map_err(|e| SimError::MalformedSettings(e.to_string()))?;
    apply_settings(core, parsed)
}

pub(super) fn settings_json(core: &SimulationCore) -> String {
    serde_json::to_string(&core.settings).unwrap_or_default()
}

pub(super) fn set_interaction(core: &mut SimulationCore, x: f32, y: f32, strength: f32) {
    core.interaction = Interaction { point: Vec2::new(x, y), strength };
}

pub(super) fn clear_interaction(core: &mut SimulationCore) {
    core.interaction = Interaction::default();
}

pub(super) fn enable_perf_metrics(core: &mut SimulationCore, enabled: bool) {
    core.perf_enabled = enabled;
}

pub(super) fn get_perf_stats(core: &SimulationCore) -> PerfStats {
    core.perf_stats.clone()
}
