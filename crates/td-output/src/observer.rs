//! `SweepOutputObserver<W>`: bridges `SweepObserver` to an `OutputWriter`.

use td_core::ParameterSetting;
use td_sim::{ResultRow, ResultTable, SimError, SweepObserver, Trajectory};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, RunSummaryRow};

/// A [`SweepObserver`] that streams each finished setting to any
/// [`OutputWriter`] backend.
///
/// Completed settings produce their trajectory rows and a summary row; failed
/// settings produce only a summary row with status `failed`.
///
/// Errors from the writer are stored internally because `SweepObserver`
/// methods have no return value.  After `driver.run()` returns, check for
/// errors with [`take_error`][Self::take_error].  An aborted sweep never
/// reaches `on_sweep_end`; call [`finish`][Self::finish] yourself in that case.
pub struct SweepOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SweepOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `driver.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush and close the writer.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sweep).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SweepObserver for SweepOutputObserver<W> {
    fn on_run_complete(&mut self, _index: usize, setting: &ParameterSetting, trajectory: &Trajectory) {
        let rows: Vec<ResultRow> = trajectory.rows(setting).collect();
        let result = self.writer.write_rows(&rows);
        self.store_err(result);

        let result = self.writer.write_summary(&RunSummaryRow::completed(setting, trajectory));
        self.store_err(result);
    }

    fn on_run_failed(&mut self, _index: usize, setting: &ParameterSetting, _error: &SimError) {
        let result = self.writer.write_summary(&RunSummaryRow::failed(setting));
        self.store_err(result);
    }

    fn on_sweep_end(&mut self, _table: &ResultTable) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
