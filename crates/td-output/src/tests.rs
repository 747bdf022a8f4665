//! Integration tests for td-output.

use tempfile::TempDir;

use td_core::{FailurePolicy, Levels, ParameterGrid, ParameterSetting, SweepConfig};
use td_sim::{ResultRow, SweepDriver};

use crate::row::RunSummaryRow;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn setting() -> ParameterSetting {
    ParameterSetting::new(5, 3, 0.01, 0.02, 0.05)
}

fn traj_rows(n: u64) -> Vec<ResultRow> {
    (1..=n).map(|t| ResultRow::new(&setting(), t, t * 10)).collect()
}

fn summary() -> RunSummaryRow {
    RunSummaryRow {
        steps:          12,
        final_engaged:  95,
        assigned_nodes: 100,
        status:         "converged",
        ..RunSummaryRow::failed(&setting())
    }
}

/// Two w levels on 100 nodes; `w = 200` exceeds the 95 available strangers.
fn sweep_config(policy: FailurePolicy) -> SweepConfig {
    SweepConfig {
        n_nodes:        100,
        grid:           ParameterGrid {
            s:      Levels::Explicit(vec![5.0]),
            w:      Levels::Explicit(vec![5.0, 200.0]),
            alpha:  Levels::Explicit(vec![0.05]),
            beta_w: Levels::Explicit(vec![0.05]),
            beta_s: Levels::Explicit(vec![0.1, 0.2]),
        },
        max_steps:      200,
        seed:           11,
        failure_policy: policy,
        ..SweepConfig::default()
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

mod csv_tests {
    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn read_records(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("trajectories.csv").exists());
        assert!(dir.path().join("run_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trajectories.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["s", "w", "alpha", "beta_w", "beta_s", "t", "num_engaged"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("run_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["s", "w", "alpha", "beta_w", "beta_s", "steps", "final_engaged", "assigned_nodes", "status"]
        );
    }

    #[test]
    fn csv_trajectory_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_rows(&traj_rows(3)).unwrap();
        w.finish().unwrap();

        let rows = read_records(&dir.path().join("trajectories.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5");    // s
        assert_eq!(&rows[0][1], "3");    // w
        assert_eq!(&rows[0][2], "0.01"); // alpha
        assert_eq!(&rows[0][5], "1");    // t
        assert_eq!(&rows[2][5], "3");
        assert_eq!(&rows[2][6], "30");   // num_engaged
    }

    #[test]
    fn csv_summary_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_summary(&summary()).unwrap();
        w.write_summary(&RunSummaryRow::failed(&setting())).unwrap();
        w.finish().unwrap();

        let rows = read_records(&dir.path().join("run_summaries.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][5], "12");
        assert_eq!(&rows[0][6], "95");
        assert_eq!(&rows[0][7], "100");
        assert_eq!(&rows[0][8], "converged");
        assert_eq!(&rows[1][5], "0");
        assert_eq!(&rows[1][8], "failed");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Observer / sweep integration ──────────────────────────────────────────────

mod sweep_tests {
    use super::*;
    use crate::csv::CsvWriter;
    use crate::{SweepOutputObserver, write_table};

    fn count_records(path: &std::path::Path) -> usize {
        csv::Reader::from_path(path).unwrap().records().count()
    }

    #[test]
    fn observer_writes_every_setting() {
        let dir = tmp();
        let driver = SweepDriver::new(sweep_config(FailurePolicy::SkipSetting)).unwrap();
        let mut obs = SweepOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let report = driver.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        assert_eq!(report.table.len(), 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(
            count_records(&dir.path().join("trajectories.csv")),
            report.table.row_count()
        );
        // Failed settings still get a summary row.
        assert_eq!(count_records(&dir.path().join("run_summaries.csv")), 4);
    }

    #[test]
    fn failed_settings_marked_in_summaries() {
        let dir = tmp();
        let driver = SweepDriver::new(sweep_config(FailurePolicy::SkipSetting)).unwrap();
        let mut obs = SweepOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        driver.run(&mut obs).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("run_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // Grid order: w=5 (two beta_s levels), then w=200.
        assert_eq!(&rows[0][1], "5");
        assert_ne!(&rows[0][8], "failed");
        assert_eq!(&rows[2][1], "200");
        assert_eq!(&rows[2][8], "failed");
        assert_eq!(&rows[3][8], "failed");
    }

    #[test]
    fn aborted_sweep_can_still_be_finished() {
        let dir = tmp();
        let driver = SweepDriver::new(sweep_config(FailurePolicy::AbortSweep)).unwrap();
        let mut obs = SweepOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        assert!(driver.run(&mut obs).is_err());
        obs.finish().unwrap();
        assert!(obs.take_error().is_none());

        assert_eq!(count_records(&dir.path().join("run_summaries.csv")), 3);
    }

    #[test]
    fn write_table_matches_table() {
        let dir = tmp();
        let driver = SweepDriver::new(sweep_config(FailurePolicy::SkipSetting)).unwrap();
        let report = driver.run(&mut td_sim::NoopObserver).unwrap();

        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_table(&mut w, &report.table).unwrap();

        assert_eq!(
            count_records(&dir.path().join("trajectories.csv")),
            report.table.row_count()
        );
        assert_eq!(count_records(&dir.path().join("run_summaries.csv")), report.table.len());
    }

    #[test]
    fn summary_steps_match_trajectory() {
        let driver = SweepDriver::new(sweep_config(FailurePolicy::SkipSetting)).unwrap();
        let report = driver.run(&mut td_sim::NoopObserver).unwrap();
        for entry in report.table.entries() {
            let row = RunSummaryRow::from(entry);
            assert_eq!(row.steps, entry.trajectory.steps());
            assert_eq!(row.final_engaged, entry.trajectory.final_active() as u64);
            assert_eq!(row.assigned_nodes, 100);
            assert_eq!(row.status, entry.trajectory.status.as_str());
        }
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join("results.db")).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("results.db").exists());
    }

    #[test]
    fn sqlite_trajectory_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_rows(&traj_rows(4)).unwrap();
        w.finish().unwrap();

        let n: i64 = open(&dir)
            .query_row("SELECT COUNT(*) FROM trajectories", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 4);
    }

    #[test]
    fn sqlite_reopen_replaces_previous_results() {
        let dir = tmp();
        for _ in 0..2 {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_rows(&traj_rows(4)).unwrap();
            w.write_summary(&summary()).unwrap();
            w.finish().unwrap();
        }

        let conn = open(&dir);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM trajectories", [], |r| r.get(0))
            .unwrap();
        let summaries: i64 = conn
            .query_row("SELECT COUNT(*) FROM run_summaries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 4);
        assert_eq!(summaries, 1);
    }

    #[test]
    fn sqlite_summary_values() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_summary(&summary()).unwrap();
        w.finish().unwrap();

        let (steps, status): (i64, String) = open(&dir)
            .query_row("SELECT steps, status FROM run_summaries", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(steps, 12);
        assert_eq!(status, "converged");
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(feature = "parquet")]
mod parquet_tests {
    use arrow::array::{Array, StringArray, UInt64Array};
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn read_batches(path: std::path::PathBuf) -> Vec<arrow::record_batch::RecordBatch> {
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        reader.map(|b| b.unwrap()).collect()
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("trajectories.parquet").exists());
        assert!(dir.path().join("run_summaries.parquet").exists());
    }

    #[test]
    fn parquet_trajectory_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_rows(&traj_rows(5)).unwrap();
        w.finish().unwrap();

        let batches = read_batches(dir.path().join("trajectories.parquet"));
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 5);

        let engaged = batches[0]
            .column_by_name("num_engaged")
            .unwrap()
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(engaged.value(4), 50);
    }

    #[test]
    fn parquet_status_is_utf8() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_summary(&summary()).unwrap();
        w.finish().unwrap();

        let batches = read_batches(dir.path().join("run_summaries.parquet"));
        let col = batches[0].column_by_name("status").unwrap();
        assert_eq!(col.data_type(), &DataType::Utf8);
        let status = col.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(status.value(0), "converged");
        assert!(!status.is_null(0));
    }

    #[test]
    fn parquet_finish_idempotent() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
