//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `results.db` file in the configured output directory with
//! two tables: `trajectories` and `run_summaries`.  Both are dropped and
//! recreated on open, so rerunning a sweep into the same directory replaces
//! its results like the CSV and Parquet writers do.

use std::path::Path;

use rusqlite::Connection;
use td_sim::ResultRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummaryRow};

/// Writes sweep results to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `results.db` in `dir` and reset the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("results.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS trajectories;
             DROP TABLE IF EXISTS run_summaries;
             CREATE TABLE trajectories (
                 s           INTEGER NOT NULL,
                 w           INTEGER NOT NULL,
                 alpha       REAL    NOT NULL,
                 beta_w      REAL    NOT NULL,
                 beta_s      REAL    NOT NULL,
                 t           INTEGER NOT NULL,
                 num_engaged INTEGER NOT NULL
             );
             CREATE TABLE run_summaries (
                 s              INTEGER NOT NULL,
                 w              INTEGER NOT NULL,
                 alpha          REAL    NOT NULL,
                 beta_w         REAL    NOT NULL,
                 beta_s         REAL    NOT NULL,
                 steps          INTEGER NOT NULL,
                 final_engaged  INTEGER NOT NULL,
                 assigned_nodes INTEGER NOT NULL,
                 status         TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trajectories (s, w, alpha, beta_w, beta_s, t, num_engaged) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.s,
                    row.w,
                    row.alpha,
                    row.beta_w,
                    row.beta_s,
                    row.t as i64,
                    row.num_engaged as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summaries \
             (s, w, alpha, beta_w, beta_s, steps, final_engaged, assigned_nodes, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.s,
                row.w,
                row.alpha,
                row.beta_w,
                row.beta_s,
                row.steps as i64,
                row.final_engaged as i64,
                row.assigned_nodes as i64,
                row.status,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
