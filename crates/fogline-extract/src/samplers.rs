//! Per-tick scalar samplers, independent of the unit cache.

use fogline_core::{PlayerResources, ResourceSnapshot, UpgradeCompletion, UpgradeEvent};

/// Full-density economy sampler: one snapshot per in-window step.
///
/// No interval gating — downstream supply/income features need the full
/// curve, and five scalars per step are cheap.
#[derive(Debug, Default)]
pub struct ResourceSampler {
    snapshots: Vec<ResourceSnapshot>,
}

impl ResourceSampler {
    /// An empty sampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one snapshot of the observing player's economy at `time`.
    pub fn sample(&mut self, time: f64, resources: &PlayerResources) {
        self.snapshots.push(ResourceSnapshot::sample(time, resources));
    }

    /// Snapshots accumulated so far.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot was taken.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consume the sampler, yielding the accumulated snapshots.
    pub fn into_snapshots(self) -> Vec<ResourceSnapshot> {
        self.snapshots
    }
}

/// Event-driven upgrade sampler: one record per completion event.
///
/// Records are immutable once appended — the imputed start time is
/// computed at append and never revisited.
#[derive(Debug, Default)]
pub struct UpgradeSampler {
    completions: Vec<UpgradeCompletion>,
}

impl UpgradeSampler {
    /// An empty sampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion event observed at `time`.
    pub fn record(&mut self, time: f64, event: &UpgradeEvent) {
        self.completions.push(UpgradeCompletion::from_event(time, event));
    }

    /// Consume the sampler, yielding the accumulated completions.
    pub fn into_completions(self) -> Vec<UpgradeCompletion> {
        self.completions
    }
}
