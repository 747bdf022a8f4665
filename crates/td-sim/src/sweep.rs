//! Parameter sweep: one run per grid setting, merged into a [`ResultTable`].

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use td_core::{FailurePolicy, ParameterSetting, RunRng, SweepConfig};

use crate::{
    NoopObserver, ResultTable, RunBuilder, RunStatus, SimError, SimResult, SweepObserver,
    Trajectory,
};

/// A setting that failed and was skipped.
#[derive(Debug)]
pub struct SweepFailure {
    pub index:   usize,
    pub setting: ParameterSetting,
    pub error:   SimError,
}

/// Everything a sweep produced.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub table:    ResultTable,
    /// Settings skipped under [`FailurePolicy::SkipSetting`], in grid order.
    pub failures: Vec<SweepFailure>,
    pub elapsed:  Duration,
}

impl SweepReport {
    pub fn converged_count(&self) -> usize {
        self.count_status(RunStatus::Converged)
    }

    /// Runs that stopped on `max_steps` or the wall-clock budget.
    pub fn unconverged_count(&self) -> usize {
        self.table.len() - self.converged_count()
    }

    fn count_status(&self, status: RunStatus) -> usize {
        self.table
            .entries()
            .iter()
            .filter(|e| e.trajectory.status == status)
            .count()
    }
}

/// Drives one [`Run`][crate::Run] per setting of the configured grid.
///
/// # Determinism
///
/// The setting at grid index `i` is seeded with `RunRng::mix(seed, i)`, so
/// every trajectory depends only on `(setting, n_nodes, seed, i)`.  With the
/// `parallel` feature the runs execute on Rayon's pool and are then merged in
/// grid order by the calling thread; the report is identical to a sequential
/// sweep.
pub struct SweepDriver {
    config: SweepConfig,
}

impl SweepDriver {
    /// Validate `config` and wrap it.
    pub fn new(config: SweepConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Expand the grid.  Every setting is validated before any run starts.
    pub fn settings(&self) -> SimResult<Vec<ParameterSetting>> {
        Ok(self.config.grid.settings()?)
    }

    /// Run every setting and return the assembled report.
    ///
    /// Under [`FailurePolicy::AbortSweep`] the first failing setting (in grid
    /// order) ends the sweep with [`SimError::Aborted`].
    pub fn run<O: SweepObserver>(&self, observer: &mut O) -> SimResult<SweepReport> {
        let settings = self.settings()?;
        let started = Instant::now();

        info!(
            settings = settings.len(),
            n_nodes = self.config.n_nodes,
            seed = self.config.seed,
            "starting sweep"
        );
        for (index, setting) in settings.iter().enumerate() {
            if !setting.is_ordered() {
                debug!(index, %setting, "setting does not satisfy alpha < beta_w < beta_s");
            }
        }
        observer.on_sweep_start(settings.len());

        let mut report = SweepReport::default();

        #[cfg(not(feature = "parallel"))]
        for (index, setting) in settings.iter().enumerate() {
            let result = self.run_one(index, setting);
            self.merge(index, *setting, result, &mut report, observer)?;
        }

        #[cfg(feature = "parallel")]
        {
            let results = self.run_parallel(&settings)?;
            for (index, (setting, result)) in settings.iter().zip(results).enumerate() {
                self.merge(index, *setting, result, &mut report, observer)?;
            }
        }

        report.elapsed = started.elapsed();
        observer.on_sweep_end(&report.table);

        info!(
            completed = report.table.len(),
            converged = report.converged_count(),
            failed = report.failures.len(),
            rows = report.table.row_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "sweep finished"
        );
        Ok(report)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn run_one(&self, index: usize, setting: &ParameterSetting) -> SimResult<Trajectory> {
        let seed = RunRng::mix(self.config.seed, index as u64);
        let mut builder = RunBuilder::new(self.config.n_nodes, *setting, seed)
            .convergence_fraction(self.config.convergence_fraction)
            .max_steps(self.config.max_steps);
        if let Some(budget) = self.config.wall_clock_budget() {
            builder = builder.wall_clock_budget(budget);
        }
        builder.build()?.run(&mut NoopObserver)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, settings: &[ParameterSetting]) -> SimResult<Vec<SimResult<Trajectory>>> {
        use rayon::prelude::*;

        // Indexed collect keeps results in grid order regardless of which
        // worker finished first.
        let work = || {
            settings
                .par_iter()
                .enumerate()
                .map(|(index, setting)| self.run_one(index, setting))
                .collect::<Vec<_>>()
        };

        match self.config.num_threads {
            None => Ok(work()),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("cannot build thread pool: {e}")))?;
                Ok(pool.install(work))
            }
        }
    }

    /// Fold one setting's outcome into the report.
    fn merge<O: SweepObserver>(
        &self,
        index:    usize,
        setting:  ParameterSetting,
        result:   SimResult<Trajectory>,
        report:   &mut SweepReport,
        observer: &mut O,
    ) -> SimResult<()> {
        match result {
            Ok(trajectory) => {
                match trajectory.status {
                    RunStatus::Converged => debug!(
                        index, %setting, steps = trajectory.steps(), "run converged"
                    ),
                    status => warn!(
                        index, %setting, %status,
                        steps = trajectory.steps(),
                        active = trajectory.final_active(),
                        threshold = trajectory.threshold,
                        "run stopped before converging"
                    ),
                }
                observer.on_run_complete(index, &setting, &trajectory);
                report.table.push(index, setting, trajectory);
                Ok(())
            }
            Err(error) => {
                warn!(index, %setting, %error, "run failed");
                observer.on_run_failed(index, &setting, &error);
                match self.config.failure_policy {
                    FailurePolicy::AbortSweep => Err(SimError::Aborted {
                        index,
                        setting,
                        source: Box::new(error),
                    }),
                    FailurePolicy::SkipSetting => {
                        report.failures.push(SweepFailure { index, setting, error });
                        Ok(())
                    }
                }
            }
        }
    }
}

/// Run the sweep described by `config` and return only the result table.
pub fn run_sweep(config: &SweepConfig) -> SimResult<ResultTable> {
    SweepDriver::new(config.clone())?
        .run(&mut NoopObserver)
        .map(|report| report.table)
}
