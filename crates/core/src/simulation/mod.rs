//! Run loop for a conduction simulation
//!
//! [`ConductionRun`] drives a [`ThermalDiffusionStepper`] for exactly `nstep`
//! steps. Before advancing every `plot_intvl`-th iteration (iteration 0
//! included) it hands a copy of the field to a [`SnapshotSink`]; after the
//! last step it signals completion. A run with `nstep = 0` still emits the
//! iteration-0 snapshot.

mod profiler;
mod sink;

pub use profiler::ProfilerScope;
pub use sink::{FnSink, Snapshot, SnapshotRecorder, SnapshotSink, TracingSink};

use crate::core_types::Seconds;
use crate::solver::{ConfigError, SimulationConfig, TemperatureField, ThermalDiffusionStepper};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Outcome of a run, also passed to [`SnapshotSink::on_complete`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Steps actually applied
    pub steps_completed: usize,
    /// Snapshots handed to the sink
    pub snapshots_emitted: usize,
    /// Whether the stop signal ended the loop before `nstep`
    pub stopped_early: bool,
    /// Simulated time reached
    pub final_time: Seconds,
    /// Field after the last applied step
    pub final_field: TemperatureField,
}

/// One conduction run: a stepper plus the snapshot cadence of its config
#[derive(Debug, Clone)]
pub struct ConductionRun {
    stepper: ThermalDiffusionStepper,
}

impl ConductionRun {
    /// Prepare a run
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DomainTooSmall`] if the configuration yields fewer
    /// than two radial cells; the loop never starts in that case.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            stepper: ThermalDiffusionStepper::new(config)?,
        })
    }

    /// The stepper this run drives
    pub fn stepper(&self) -> &ThermalDiffusionStepper {
        &self.stepper
    }

    /// Run all `nstep` steps, emitting snapshots to `sink`
    pub fn run<S: SnapshotSink + ?Sized>(self, sink: &mut S) -> RunSummary {
        self.run_until(sink, &AtomicBool::new(false))
    }

    /// Run until `nstep` steps are done or `stop` is raised
    ///
    /// `stop` is checked before every step. Completion is signalled to the
    /// sink in both cases.
    pub fn run_until<S: SnapshotSink + ?Sized>(
        mut self,
        sink: &mut S,
        stop: &AtomicBool,
    ) -> RunSummary {
        let config = *self.stepper.config();
        let _scope = ProfilerScope::new("conduction run");

        info!(
            "Starting conduction run: nr={}, nstep={}, plot_intvl={}, a_factor={}, stability={:.4}",
            config.nr(),
            config.nstep(),
            config.plot_intvl(),
            config.a_factor(),
            config.stability_number()
        );

        let mut snapshots_emitted = 0;
        let mut stopped_early = false;

        if config.nstep() == 0 {
            sink.on_snapshot(Snapshot::capture(self.stepper.field(), 0, &config), &config);
            snapshots_emitted += 1;
        }

        for i in 0..config.nstep() {
            if stop.load(Ordering::Relaxed) {
                info!("Stop requested at iteration {i}");
                stopped_early = true;
                break;
            }
            if config.is_snapshot_iteration(i) {
                sink.on_snapshot(Snapshot::capture(self.stepper.field(), i, &config), &config);
                snapshots_emitted += 1;
            }
            self.stepper.step();
        }

        let summary = RunSummary {
            steps_completed: self.stepper.iteration(),
            snapshots_emitted,
            stopped_early,
            final_time: self.stepper.elapsed_time(),
            final_field: self.stepper.into_field(),
        };

        info!(
            "Conduction run finished: {} steps, {} snapshots, t={}",
            summary.steps_completed, summary.snapshots_emitted, summary.final_time
        );

        sink.on_complete(&summary);
        summary
    }
}

/// Build and run a simulation in one call
///
/// # Errors
///
/// Returns [`ConfigError::DomainTooSmall`] if the configuration yields fewer
/// than two radial cells.
pub fn run_simulation<S: SnapshotSink + ?Sized>(
    config: SimulationConfig,
    sink: &mut S,
) -> Result<RunSummary, ConfigError> {
    Ok(ConductionRun::new(config)?.run(sink))
}
