//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectories.csv`
//! - `run_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use td_sim::ResultRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummaryRow};

pub const TRAJECTORY_HEADER: [&str; 7] = ["s", "w", "alpha", "beta_w", "beta_s", "t", "num_engaged"];

pub const SUMMARY_HEADER: [&str; 9] = [
    "s", "w", "alpha", "beta_w", "beta_s", "steps", "final_engaged", "assigned_nodes", "status",
];

/// Writes sweep results to two CSV files.
pub struct CsvWriter {
    trajectories: Writer<File>,
    summaries:    Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectories = Writer::from_path(dir.join("trajectories.csv"))?;
        trajectories.write_record(TRAJECTORY_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            trajectories,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.s.to_string(),
                row.w.to_string(),
                row.alpha.to_string(),
                row.beta_w.to_string(),
                row.beta_s.to_string(),
                row.t.to_string(),
                row.num_engaged.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.s.to_string(),
            row.w.to_string(),
            row.alpha.to_string(),
            row.beta_w.to_string(),
            row.beta_s.to_string(),
            row.steps.to_string(),
            row.final_engaged.to_string(),
            row.assigned_nodes.to_string(),
            row.status.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
