//! Snapshot delivery from the run loop to its consumers
//!
//! The run loop never hands out a live reference to the field: every
//! [`Snapshot`] owns a copy taken before the next step mutates the field.
//! Rendering, logging and test recording all sit behind [`SnapshotSink`].

use super::RunSummary;
use crate::core_types::Seconds;
use crate::solver::{SimulationConfig, TemperatureField};
use serde::Serialize;
use tracing::{debug, info};

/// Copy of the field at the start of one iteration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Iteration the snapshot was taken at, before that step was applied
    pub iteration: usize,
    /// Simulated time `iteration * delta_t`
    pub elapsed: Seconds,
    /// Temperatures from centre to outer boundary
    pub field: TemperatureField,
}

impl Snapshot {
    /// Copy `field` as it stands at `iteration`
    pub fn capture(field: &TemperatureField, iteration: usize, config: &SimulationConfig) -> Self {
        Self {
            iteration,
            elapsed: config.elapsed_time(iteration),
            field: field.clone(),
        }
    }

    /// Zero-padded frame label, e.g. `000200`
    pub fn frame_label(&self) -> String {
        format!("{:06}", self.iteration)
    }
}

/// Consumer of field snapshots emitted by the run loop
///
/// `on_snapshot` is called synchronously between steps; `on_complete` once
/// after the last step, also when the run was stopped early.
pub trait SnapshotSink {
    /// Receive one snapshot
    fn on_snapshot(&mut self, snapshot: Snapshot, config: &SimulationConfig);

    /// Called once the loop has finished
    fn on_complete(&mut self, _summary: &RunSummary) {}
}

/// Keeps every snapshot in memory
#[derive(Debug, Default, Clone)]
pub struct SnapshotRecorder {
    snapshots: Vec<Snapshot>,
    summary: Option<RunSummary>,
}

impl SnapshotRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots in emission order
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Iteration indices in emission order
    pub fn iterations(&self) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.iteration).collect()
    }

    /// Summary received through `on_complete`, if the run finished
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Whether completion was signalled
    pub fn is_complete(&self) -> bool {
        self.summary.is_some()
    }
}

impl SnapshotSink for SnapshotRecorder {
    fn on_snapshot(&mut self, snapshot: Snapshot, _config: &SimulationConfig) {
        self.snapshots.push(snapshot);
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        self.summary = Some(summary.clone());
    }
}

/// Logs a one-line profile summary per snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SnapshotSink for TracingSink {
    fn on_snapshot(&mut self, snapshot: Snapshot, _config: &SimulationConfig) {
        let field = &snapshot.field;
        debug!(
            "Snapshot {}: t={}, centre={:.3}, mean={:.3}, min={:.3}, max={:.3}",
            snapshot.frame_label(),
            snapshot.elapsed,
            field.center().unwrap_or(f64::NAN),
            field.mean().unwrap_or(f64::NAN),
            field.min().unwrap_or(f64::NAN),
            field.max().unwrap_or(f64::NAN)
        );
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        info!(
            "Run complete: {} steps, {} snapshots, t={}",
            summary.steps_completed, summary.snapshots_emitted, summary.final_time
        );
    }
}

/// Adapts a closure into a [`SnapshotSink`]
pub struct FnSink<F>(pub F);

impl<F> SnapshotSink for FnSink<F>
where
    F: FnMut(Snapshot, &SimulationConfig),
{
    fn on_snapshot(&mut self, snapshot: Snapshot, config: &SimulationConfig) {
        (self.0)(snapshot, config);
    }
}
