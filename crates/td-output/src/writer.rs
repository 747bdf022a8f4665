//! The `OutputWriter` trait implemented by all backend writers.

use td_sim::{ResultRow, ResultTable};

use crate::{OutputResult, RunSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// When driven by [`SweepOutputObserver`][crate::SweepOutputObserver], errors
/// are stored by the observer and retrieved with `take_error`.
pub trait OutputWriter {
    /// Write a batch of per-timestep rows (typically one setting's trajectory).
    fn write_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()>;

    /// Write one per-setting summary row.
    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write an already assembled table (rows plus one summary per setting) and
/// finish the writer.
pub fn write_table<W: OutputWriter>(writer: &mut W, table: &ResultTable) -> OutputResult<()> {
    for entry in table.entries() {
        let rows: Vec<ResultRow> = entry.trajectory.rows(&entry.setting).collect();
        writer.write_rows(&rows)?;
        writer.write_summary(&RunSummaryRow::from(entry))?;
    }
    writer.finish()
}
