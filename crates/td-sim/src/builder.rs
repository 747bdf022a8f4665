//! Fluent builder for constructing a [`Run`].

use std::time::Duration;

use td_core::config::{DEFAULT_CONVERGENCE_FRACTION, DEFAULT_MAX_STEPS};
use td_core::{ParameterSetting, RunRng, SubnetId};
use td_network::{ActivationState, GlobalNetwork, WeakTieSampler};

use crate::{ActivationUpdate, Run, SimError, SimResult};

/// Slack subtracted before rounding the convergence threshold up.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Fluent builder for [`Run`].
///
/// # Required inputs
///
/// - `n_nodes` — size of the node universe
/// - [`ParameterSetting`] — `(s, w, alpha, beta_w, beta_s)`
/// - `seed` — the run's RNG seed
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default  |
/// |-----------------------------|----------|
/// | `.convergence_fraction(f)`  | `0.95`   |
/// | `.max_steps(n)`             | `10_000` |
/// | `.wall_clock_budget(d)`     | none     |
///
/// # Example
///
/// ```rust,ignore
/// let trajectory = RunBuilder::new(3_000, setting, seed)
///     .max_steps(5_000)
///     .build()?
///     .run(&mut NoopObserver)?;
/// ```
pub struct RunBuilder {
    n_nodes:              usize,
    setting:              ParameterSetting,
    seed:                 u64,
    convergence_fraction: f64,
    max_steps:            u64,
    wall_clock_budget:    Option<Duration>,
}

impl RunBuilder {
    pub fn new(n_nodes: usize, setting: ParameterSetting, seed: u64) -> Self {
        Self {
            n_nodes,
            setting,
            seed,
            convergence_fraction: DEFAULT_CONVERGENCE_FRACTION,
            max_steps:            DEFAULT_MAX_STEPS,
            wall_clock_budget:    None,
        }
    }

    /// Fraction of assigned nodes that must be active to stop.  `(0, 1]`.
    pub fn convergence_fraction(mut self, fraction: f64) -> Self {
        self.convergence_fraction = fraction;
        self
    }

    /// Upper bound on recorded timesteps.
    pub fn max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Stop early (tagged `TimedOut`) once this much wall-clock time has passed.
    /// Checked between timesteps, never inside a pass.
    pub fn wall_clock_budget(mut self, budget: Duration) -> Self {
        self.wall_clock_budget = Some(budget);
        self
    }

    /// Validate inputs, build the network, and return a ready-to-run [`Run`].
    ///
    /// Fails before any timestep if the setting is invalid, the network would
    /// be empty, or `w` exceeds the population outside one clique.
    pub fn build(self) -> SimResult<Run> {
        self.setting.validate()?;

        if !(self.convergence_fraction > 0.0 && self.convergence_fraction <= 1.0) {
            return Err(SimError::Config(format!(
                "convergence_fraction {} is outside (0, 1]",
                self.convergence_fraction
            )));
        }
        if self.max_steps == 0 {
            return Err(SimError::Config("max_steps must be at least 1".into()));
        }

        let network = GlobalNetwork::build(self.n_nodes, self.setting.s)?;
        WeakTieSampler::new(self.setting.w).ensure_population(&network, SubnetId(0))?;

        let assigned = network.assigned_nodes();
        // Absorb representation error (0.55 * 100.0 == 55.000000000000007).
        let exact = self.convergence_fraction * assigned as f64 - THRESHOLD_EPSILON;
        let threshold = (exact.ceil().max(0.0) as usize).min(assigned);

        Ok(Run {
            state:             ActivationState::reset(&network),
            update:            ActivationUpdate::new(&network, self.setting.w),
            rng:               RunRng::new(self.seed),
            setting:           self.setting,
            network,
            threshold,
            max_steps:         self.max_steps,
            wall_clock_budget: self.wall_clock_budget,
            t:                 0,
        })
    }
}
