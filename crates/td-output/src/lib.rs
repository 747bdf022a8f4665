//! `td-output` — result-table writers for the tie_diffusion simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                       |
//! |-----------|-------------|-----------------------------------------------------|
//! | *(none)*  | CSV         | `trajectories.csv`, `run_summaries.csv`             |
//! | `sqlite`  | SQLite      | `results.db`                                        |
//! | `parquet` | Parquet     | `trajectories.parquet`, `run_summaries.parquet`     |
//!
//! `trajectories` holds one row per timestep per setting with columns
//! `s, w, alpha, beta_w, beta_s, t, num_engaged`.  `run_summaries` holds one
//! row per setting (including failed ones) with its final step count and
//! status.
//!
//! All backends implement [`OutputWriter`] and can be driven either live by
//! [`SweepOutputObserver`] (a `td_sim::SweepObserver`) or after the fact by
//! [`write_table`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use td_output::{CsvWriter, SweepOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SweepOutputObserver::new(writer);
//! let report = driver.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SweepOutputObserver;
pub use row::RunSummaryRow;
pub use writer::{OutputWriter, write_table};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
