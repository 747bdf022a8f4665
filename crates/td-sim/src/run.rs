//! The `Run` struct, its step loop, and the trajectory it produces.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::trace;

use td_core::{ParameterSetting, RunRng};
use td_network::{ActivationState, GlobalNetwork};

use crate::{ActivationUpdate, ResultRow, RunObserver, SimResult};

// ── Trajectory ────────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunStatus {
    /// Active count reached the convergence threshold.
    Converged,
    /// Hit `max_steps` first.  Not an error.
    NonConvergent,
    /// Hit the wall-clock budget first.  Not an error.
    TimedOut,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Converged     => "converged",
            RunStatus::NonConvergent => "non_convergent",
            RunStatus::TimedOut      => "timed_out",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active-node count after timestep `t`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TrajectoryPoint {
    pub t:      u64,
    pub active: usize,
}

/// The output of one run: `(t, active)` for `t = 1, 2, …` plus how it ended.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub points:         Vec<TrajectoryPoint>,
    pub status:         RunStatus,
    /// `s * floor(n_nodes / s)` for the run's network.
    pub assigned_nodes: usize,
    /// `ceil(convergence_fraction * assigned_nodes)`.
    pub threshold:      usize,
}

impl Trajectory {
    /// Last timestep recorded.  For a converged run this is the T95 value.
    pub fn steps(&self) -> u64 {
        self.points.last().map_or(0, |p| p.t)
    }

    pub fn final_active(&self) -> usize {
        self.points.last().map_or(0, |p| p.active)
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status == RunStatus::Converged
    }

    /// Flatten into result rows tagged with `setting`.
    pub fn rows<'a>(&'a self, setting: &'a ParameterSetting) -> impl Iterator<Item = ResultRow> + 'a {
        self.points.iter().map(move |p| ResultRow::new(setting, p.t, p.active as u64))
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// One simulation run for one parameter setting.
///
/// Owns its network, activation state and RNG exclusively; all three are
/// dropped once [`run`](Self::run) returns the trajectory.
///
/// Create via [`RunBuilder`][crate::RunBuilder].
pub struct Run {
    pub(crate) setting:           ParameterSetting,
    pub(crate) network:           GlobalNetwork,
    pub(crate) state:             ActivationState,
    pub(crate) update:            ActivationUpdate,
    pub(crate) rng:               RunRng,
    pub(crate) threshold:         usize,
    pub(crate) max_steps:         u64,
    pub(crate) wall_clock_budget: Option<Duration>,
    /// Timesteps completed so far.
    pub(crate) t:                 u64,
}

impl Run {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until convergence, `max_steps`, or the wall-clock budget.
    ///
    /// Always records at least one timestep.
    pub fn run<O: RunObserver>(mut self, observer: &mut O) -> SimResult<Trajectory> {
        observer.on_run_start(&self.setting, &self.network);
        let started = Instant::now();
        let mut points = Vec::new();

        let status = loop {
            let active = self.step()?;
            points.push(TrajectoryPoint { t: self.t, active });
            observer.on_step_end(self.t, active);
            trace!(t = self.t, active, "step");

            if active >= self.threshold {
                break RunStatus::Converged;
            }
            if self.t >= self.max_steps {
                break RunStatus::NonConvergent;
            }
            if self.wall_clock_budget.is_some_and(|budget| started.elapsed() >= budget) {
                break RunStatus::TimedOut;
            }
        };

        let trajectory = Trajectory {
            points,
            status,
            assigned_nodes: self.network.assigned_nodes(),
            threshold: self.threshold,
        };
        observer.on_run_end(&trajectory);
        Ok(trajectory)
    }

    /// Apply one activation pass and return `total_active()` afterwards.
    ///
    /// Ignores the stop conditions; useful for tests and incremental stepping.
    pub fn step(&mut self) -> SimResult<usize> {
        self.update
            .apply(&self.network, &mut self.state, &self.setting, &mut self.rng)?;
        self.t += 1;
        Ok(self.state.total_active())
    }

    pub fn setting(&self) -> &ParameterSetting {
        &self.setting
    }

    pub fn network(&self) -> &GlobalNetwork {
        &self.network
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    /// Active count at which the run counts as converged.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn current_step(&self) -> u64 {
        self.t
    }
}
