//! Observer traits for progress reporting and data collection.

use td_core::ParameterSetting;
use td_network::GlobalNetwork;

use crate::{ResultTable, SimError, Trajectory};

/// Callbacks invoked by [`Run::run`][crate::Run::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl RunObserver for ProgressPrinter {
///     fn on_step_end(&mut self, t: u64, active: usize) {
///         if t % self.interval == 0 {
///             println!("t={t}: {active} active");
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called once the network is built, before the first pass.
    fn on_run_start(&mut self, _setting: &ParameterSetting, _network: &GlobalNetwork) {}

    /// Called after every pass with the new `total_active()`.
    fn on_step_end(&mut self, _t: u64, _active: usize) {}

    /// Called once with the finished trajectory.
    fn on_run_end(&mut self, _trajectory: &Trajectory) {}
}

/// Callbacks invoked by [`SweepDriver::run`][crate::SweepDriver::run].
///
/// Calls arrive in grid order on the calling thread, also when the runs
/// themselves executed in parallel.
pub trait SweepObserver {
    /// Called once before any run, with the number of settings in the grid.
    fn on_sweep_start(&mut self, _settings: usize) {}

    /// Called for each setting whose run finished, converged or not.
    fn on_run_complete(&mut self, _index: usize, _setting: &ParameterSetting, _trajectory: &Trajectory) {}

    /// Called for each setting whose run failed (e.g. insufficient population).
    fn on_run_failed(&mut self, _index: usize, _setting: &ParameterSetting, _error: &SimError) {}

    /// Called once after the last setting, with the assembled table.
    fn on_sweep_end(&mut self, _table: &ResultTable) {}
}

/// An observer that does nothing.  Use when you need to call `run` but don't
/// want callbacks.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

impl SweepObserver for NoopObserver {}
