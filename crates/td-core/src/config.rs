//! Top-level sweep configuration.

use std::time::Duration;

use crate::{ParameterGrid, TdError, TdResult};

/// Fraction of assigned nodes that must be active for a run to converge.
pub const DEFAULT_CONVERGENCE_FRACTION: f64 = 0.95;

/// Per-run timestep bound used when none is configured.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// What the sweep does when one setting fails (e.g. `InsufficientPopulation`).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailurePolicy {
    /// Log the failure, record it in the report, and continue.
    #[default]
    SkipSetting,
    /// Stop the sweep and return the error.
    AbortSweep,
}

/// Sweep configuration.
///
/// Typically loaded from a JSON file by the binary and passed to the sweep
/// driver.  Every field has a default, so a config file only needs the fields
/// it changes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepConfig {
    /// Size of the node universe.  `floor(n_nodes / s) * s` nodes are assigned
    /// to cliques; the remainder sits out that run.  Default: 3000.
    pub n_nodes: usize,

    /// Parameter levels to sweep.
    pub grid: ParameterGrid,

    /// A run converges once this fraction of assigned nodes is active.
    /// Must be in `(0, 1]`.  Default: 0.95.
    pub convergence_fraction: f64,

    /// Safety bound on timesteps per run.  Runs that hit it are reported as
    /// non-convergent, not as errors.  Default: 10 000.
    pub max_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    /// Ignored without the `parallel` feature of `td-sim`.
    pub num_threads: Option<usize>,

    /// Skip a failing setting or abort the whole sweep.
    pub failure_policy: FailurePolicy,

    /// Optional per-run wall-clock budget in milliseconds.
    pub wall_clock_budget_ms: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_nodes:              3_000,
            grid:                 ParameterGrid::default(),
            convergence_fraction: DEFAULT_CONVERGENCE_FRACTION,
            max_steps:            DEFAULT_MAX_STEPS,
            seed:                 42,
            num_threads:          None,
            failure_policy:       FailurePolicy::SkipSetting,
            wall_clock_budget_ms: None,
        }
    }
}

impl SweepConfig {
    /// Check the scalar fields.  Grid levels are checked by
    /// [`ParameterGrid::settings`].
    pub fn validate(&self) -> TdResult<()> {
        if self.n_nodes == 0 {
            return Err(TdError::Config("n_nodes must be positive".into()));
        }
        if !(self.convergence_fraction > 0.0 && self.convergence_fraction <= 1.0) {
            return Err(TdError::Config(format!(
                "convergence_fraction {} is outside (0, 1]",
                self.convergence_fraction
            )));
        }
        if self.max_steps == 0 {
            return Err(TdError::Config("max_steps must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(TdError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }

    pub fn wall_clock_budget(&self) -> Option<Duration> {
        self.wall_clock_budget_ms.map(Duration::from_millis)
    }
}
