use fluida_engine::{generate, SimulationCore, SimulationSettings, SpawnConfig, Vec2};

#[test]
fn sim_smoke_dam_break_settles_inside_bounds() {
    let settings = SimulationSettings {
        gravity: Vec2::new(0.0, -9.81),
        interaction_radius: 0.5,
        target_density: 10.0,
        pressure_multiplier: 100.0,
        near_pressure_multiplier: 5.0,
        viscosity_strength: 0.1,
        bounds_size: Vec2::new(12.0, 8.0),
        steps_per_frame: 3,
        ..SimulationSettings::default()
    };

    let spawn = generate(&SpawnConfig {
        count: 400,
        center: Vec2::new(-3.0, 1.0),
        size: Vec2::new(4.0, 4.0),
        jitter_intensity: 0.2,
        seed: 42,
        ..SpawnConfig::default()
    });

    let mut sim = SimulationCore::new(spawn, settings).expect("valid setup");
    sim.enable_perf_metrics(true);

    for _ in 0..60 {
        sim.step_frame(1.0 / 60.0);
    }

    assert_eq!(sim.particle_count(), 400);
    for p in sim.positions() {
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(p.x.abs() <= 6.0 + 1e-4);
        assert!(p.y.abs() <= 4.0 + 1e-4);
    }

    let stats = sim.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.particle_count(), 400);
    assert_eq!(stats.substeps(), 3);
}

#[test]
fn sim_smoke_obstacle_stays_particle_free() {
    let settings = SimulationSettings {
        gravity: Vec2::new(0.0, -9.81),
        interaction_radius: 0.5,
        target_density: 10.0,
        pressure_multiplier: 100.0,
        bounds_size: Vec2::new(12.0, 8.0),
        obstacle_size: Vec2::new(3.0, 1.5),
        obstacle_position: Vec2::new(0.0, -1.0),
        ..SimulationSettings::default()
    };

    let spawn = generate(&SpawnConfig {
        count: 300,
        center: Vec2::new(0.0, 2.5),
        size: Vec2::new(5.0, 2.0),
        seed: 7,
        ..SpawnConfig::default()
    });

    let mut sim = SimulationCore::new(spawn, settings).expect("valid setup");
    for _ in 0..120 {
        sim.step_frame(1.0 / 60.0);
    }

    // Interior of the obstacle (shrunk slightly for the boundary itself).
    for p in sim.positions() {
        let inside_x = (p.x - 0.0).abs() < 1.5 - 1e-3;
        let inside_y = (p.y - -1.0).abs() < 0.75 - 1e-3;
        assert!(!(inside_x && inside_y), "particle inside obstacle at ({}, {})", p.x, p.y);
    }
}
