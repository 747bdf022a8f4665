//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `trajectories.parquet`
//! - `run_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use td_sim::ResultRow;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunSummaryRow};

/// The five parameter columns shared by both files.
fn parameter_fields() -> Vec<Field> {
    vec![
        Field::new("s",      DataType::UInt32,  false),
        Field::new("w",      DataType::UInt32,  false),
        Field::new("alpha",  DataType::Float64, false),
        Field::new("beta_w", DataType::Float64, false),
        Field::new("beta_s", DataType::Float64, false),
    ]
}

fn trajectory_schema() -> Arc<Schema> {
    let mut fields = parameter_fields();
    fields.push(Field::new("t",           DataType::UInt64, false));
    fields.push(Field::new("num_engaged", DataType::UInt64, false));
    Arc::new(Schema::new(fields))
}

fn summary_schema() -> Arc<Schema> {
    let mut fields = parameter_fields();
    fields.push(Field::new("steps",          DataType::UInt64, false));
    fields.push(Field::new("final_engaged",  DataType::UInt64, false));
    fields.push(Field::new("assigned_nodes", DataType::UInt64, false));
    fields.push(Field::new("status",         DataType::Utf8,   false));
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Column builders for the five parameter columns.
#[derive(Default)]
struct ParameterColumns {
    s:      UInt32Builder,
    w:      UInt32Builder,
    alpha:  Float64Builder,
    beta_w: Float64Builder,
    beta_s: Float64Builder,
}

impl ParameterColumns {
    fn append(&mut self, s: u32, w: u32, alpha: f64, beta_w: f64, beta_s: f64) {
        self.s.append_value(s);
        self.w.append_value(w);
        self.alpha.append_value(alpha);
        self.beta_w.append_value(beta_w);
        self.beta_s.append_value(beta_s);
    }

    fn finish(mut self) -> Vec<arrow::array::ArrayRef> {
        vec![
            Arc::new(self.s.finish()),
            Arc::new(self.w.finish()),
            Arc::new(self.alpha.finish()),
            Arc::new(self.beta_w.finish()),
            Arc::new(self.beta_s.finish()),
        ]
    }
}

/// Writes sweep results to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    trajectories: Option<ArrowWriter<File>>,
    summaries:    Option<ArrowWriter<File>>,
    traj_schema:  Arc<Schema>,
    summ_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let traj_schema = trajectory_schema();
        let summ_schema = summary_schema();

        let traj_file = File::create(dir.join("trajectories.parquet"))?;
        let trajectories = ArrowWriter::try_new(
            traj_file,
            Arc::clone(&traj_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("run_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            trajectories: Some(trajectories),
            summaries:    Some(summaries),
            traj_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_rows(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.trajectories.as_mut() else {
            return Ok(());
        };

        let mut params  = ParameterColumns::default();
        let mut ts      = UInt64Builder::new();
        let mut engaged = UInt64Builder::new();

        for row in rows {
            params.append(row.s, row.w, row.alpha, row.beta_w, row.beta_s);
            ts.append_value(row.t);
            engaged.append_value(row.num_engaged);
        }

        let mut columns = params.finish();
        columns.push(Arc::new(ts.finish()));
        columns.push(Arc::new(engaged.finish()));

        let batch = RecordBatch::try_new(Arc::clone(&self.traj_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut params   = ParameterColumns::default();
        let mut steps    = UInt64Builder::new();
        let mut engaged  = UInt64Builder::new();
        let mut assigned = UInt64Builder::new();
        let mut status   = StringBuilder::new();

        params.append(row.s, row.w, row.alpha, row.beta_w, row.beta_s);
        steps.append_value(row.steps);
        engaged.append_value(row.final_engaged);
        assigned.append_value(row.assigned_nodes);
        status.append_value(row.status);

        let mut columns = params.finish();
        columns.push(Arc::new(steps.finish()));
        columns.push(Arc::new(engaged.finish()));
        columns.push(Arc::new(assigned.finish()));
        columns.push(Arc::new(status.finish()));

        let batch = RecordBatch::try_new(Arc::clone(&self.summ_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.trajectories.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
