//! Behavioural properties of the explicit radial conduction scheme
//!
//! Each test drives the public API end to end: configuration, stepper, run
//! loop and snapshot sink.

use approx::assert_relative_eq;
use radial_heat_core::solver::{
    ConfigError, Geometry, PhysicalInputs, SimulationConfig, ThermalDiffusionStepper,
};
use radial_heat_core::{run_simulation, Meters, SnapshotRecorder};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Five-cell slab: `kappa = 1`, `delta_r = 1`, `delta_t = 0.1`, field `[50, 50, 50, 50, 100]`
fn five_cell_slab(nstep: usize) -> SimulationConfig {
    SimulationConfig::new(1.0, 50.0, 100.0, 5.0, 0.0, 1.0, 0.1, nstep, 1).unwrap()
}

#[test]
fn test_single_step_stays_within_stencil_extremes() {
    let mut stepper = ThermalDiffusionStepper::new(five_cell_slab(1)).unwrap();
    stepper.step();
    let field = stepper.field().as_slice();

    for (k, &value) in field.iter().enumerate().take(4).skip(1) {
        assert!(
            (50.0..=100.0).contains(&value),
            "interior cell {k} left [50, 100]: {value}"
        );
    }
    assert_eq!(field[0], field[1]);
    assert_eq!(field[4], 100.0);
}

#[test]
fn test_outer_boundary_pinned_every_step() {
    for geometry in [Geometry::Slab, Geometry::Cylinder, Geometry::Sphere] {
        let config =
            SimulationConfig::new(0.5, 20.0, 80.0, 10.0, geometry.a_factor(), 1.0, 0.5, 0, 1)
                .unwrap();
        let mut stepper = ThermalDiffusionStepper::new(config).unwrap();
        for step in 0..500 {
            stepper.step();
            assert_eq!(
                stepper.field().boundary(),
                Some(80.0),
                "{geometry} boundary moved at step {step}"
            );
        }
    }
}

#[test]
fn test_centre_rate_mirrors_first_interior_cell() {
    for geometry in [Geometry::Slab, Geometry::Cylinder, Geometry::Sphere] {
        let config =
            SimulationConfig::new(1.0, 0.0, 100.0, 12.0, geometry.a_factor(), 1.0, 0.2, 0, 1)
                .unwrap();
        let mut stepper = ThermalDiffusionStepper::new(config).unwrap();
        for _ in 0..300 {
            let rate = stepper.time_derivative();
            assert_eq!(rate[0].to_bits(), rate[1].to_bits());
            stepper.step();
            let field = stepper.field().as_slice();
            assert_eq!(field[0].to_bits(), field[1].to_bits());
        }
    }
}

#[test]
fn test_slab_heats_monotonically_under_stability_bound() {
    let config = SimulationConfig::new(1.0, 10.0, 100.0, 20.0, 0.0, 1.0, 0.4, 0, 1).unwrap();
    assert!(config.is_stable());
    let mut stepper = ThermalDiffusionStepper::new(config).unwrap();

    let mut previous = stepper.field().clone();
    for _ in 0..2_000 {
        stepper.step();
        let current = stepper.field();
        for (k, (&now, &before)) in current
            .as_slice()
            .iter()
            .zip(previous.as_slice())
            .enumerate()
        {
            assert!(now >= before - 1e-9, "cell {k} cooled: {before} -> {now}");
            assert!(now <= 100.0 + 1e-9, "cell {k} overshot: {now}");
        }
        previous = current.clone();
    }

    // Long enough for the centre to approach the surface temperature
    assert!(stepper.field().center().unwrap() > 90.0);
}

#[test]
fn test_curved_geometries_heat_faster_at_centre() {
    let centre_after = |geometry: Geometry| {
        let config =
            SimulationConfig::new(1.0, 0.0, 100.0, 15.0, geometry.a_factor(), 1.0, 0.2, 400, 50)
                .unwrap();
        let mut recorder = SnapshotRecorder::new();
        let summary = run_simulation(config, &mut recorder).unwrap();
        assert!(summary.final_field.is_finite());
        summary.final_field.center().unwrap()
    };

    let slab = centre_after(Geometry::Slab);
    let cylinder = centre_after(Geometry::Cylinder);
    let sphere = centre_after(Geometry::Sphere);

    assert!(slab < cylinder, "slab {slab} vs cylinder {cylinder}");
    assert!(cylinder < sphere, "cylinder {cylinder} vs sphere {sphere}");
}

#[test]
fn test_zero_step_run_emits_exactly_one_snapshot() {
    let mut recorder = SnapshotRecorder::new();
    let summary = run_simulation(five_cell_slab(0), &mut recorder).unwrap();

    assert_eq!(recorder.iterations(), vec![0]);
    assert_eq!(summary.snapshots_emitted, 1);
    assert!(recorder.is_complete());
}

#[test]
fn test_derivative_is_idempotent() {
    let mut stepper = ThermalDiffusionStepper::new(
        SimulationConfig::new(1.1e-7, 10.0, 100.0, 0.02, 2.0, 0.0008, 0.16, 0, 1).unwrap(),
    )
    .unwrap();
    for _ in 0..37 {
        stepper.step();
    }

    let first: Vec<u64> = stepper.time_derivative().iter().map(|v| v.to_bits()).collect();
    let second: Vec<u64> = stepper.time_derivative().iter().map(|v| v.to_bits()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_default_scenario_snapshots() {
    let config = SimulationConfig::from_inputs(&PhysicalInputs::default()).unwrap();
    let mut recorder = SnapshotRecorder::new();
    let summary = run_simulation(config, &mut recorder).unwrap();

    assert_eq!(recorder.snapshots().len(), config.snapshot_count());
    assert_eq!(recorder.iterations()[1], 200);
    assert_relative_eq!(
        recorder.snapshots()[1].elapsed.value(),
        200.0 * config.delta_t(),
        epsilon = 1e-9
    );

    // After ~40 minutes a 4 cm slab of beef in boiling water is hot throughout
    let centre = summary.final_field.center().unwrap();
    assert!(centre > 60.0 && centre < 100.0, "centre at {centre}");
    assert_eq!(summary.final_field.boundary(), Some(100.0));
}

#[test]
fn test_larger_body_takes_proportionally_longer() {
    let small = PhysicalInputs::default();
    let large = PhysicalInputs {
        half_extent: Meters::new(0.04),
        ..PhysicalInputs::default()
    };

    let small = SimulationConfig::from_inputs(&small).unwrap();
    let large = SimulationConfig::from_inputs(&large).unwrap();

    assert_relative_eq!(large.delta_t() / small.delta_t(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(large.stability_number(), small.stability_number(), epsilon = 1e-12);
}

#[test]
fn test_too_few_cells_rejected_before_run() {
    let inputs = PhysicalInputs {
        radial_cells: 1,
        ..PhysicalInputs::default()
    };
    let config = SimulationConfig::from_inputs(&inputs).unwrap();
    let mut recorder = SnapshotRecorder::new();

    assert_eq!(
        run_simulation(config, &mut recorder).unwrap_err(),
        ConfigError::DomainTooSmall { nr: 1 }
    );
    assert!(recorder.snapshots().is_empty());
}

#[test]
fn test_unstable_parameters_propagate_non_finite_values() {
    let config = SimulationConfig::new(1.0, 0.0, 100.0, 10.0, 0.0, 1.0, 3.0, 1_000, 100).unwrap();
    let mut recorder = SnapshotRecorder::new();
    let summary = run_simulation(config, &mut recorder).unwrap();

    assert_eq!(summary.steps_completed, 1_000);
    assert!(!summary.final_field.is_finite());
    assert_eq!(summary.final_field.boundary(), Some(100.0));
}
