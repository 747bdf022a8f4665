//! diffusion-sweep — run a tie_diffusion parameter sweep from the command line.
//!
//! Loads a `SweepConfig` from JSON (or uses the defaults), applies any flag
//! overrides, runs one simulation per grid setting and writes the result
//! table to `--out` in the chosen format.
//!
//! ```text
//! diffusion-sweep --config configs/default.json --out output/default
//! RUST_LOG=td_sim=debug diffusion-sweep --n-nodes 500 --format sqlite
//! ```

// Many short-lived runs each allocate a network, state and order buffer.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use td_core::{FailurePolicy, SweepConfig};
use td_output::{CsvWriter, OutputWriter, SweepOutputObserver};
use td_sim::{SweepDriver, SweepReport};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
    Parquet,
}

#[derive(Parser, Debug)]
#[command(name = "diffusion-sweep")]
#[command(about = "Sweep weak/strong tie diffusion parameters and record time to 95% engagement")]
struct Cli {
    /// JSON sweep configuration.  Missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Size of the node universe.
    #[arg(long)]
    n_nodes: Option<usize>,

    /// Master RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Timestep bound per run.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Fraction of assigned nodes that counts as converged.
    #[arg(long)]
    convergence: Option<f64>,

    /// Worker threads for the parallel sweep (default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Per-run wall-clock budget in milliseconds.
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Stop at the first failing setting instead of skipping it.
    #[arg(long)]
    abort_on_error: bool,

    /// Output directory (created if missing).
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

impl Cli {
    fn sweep_config(&self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<SweepConfig>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => SweepConfig::default(),
        };

        if let Some(n) = self.n_nodes {
            config.n_nodes = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(steps) = self.max_steps {
            config.max_steps = steps;
        }
        if let Some(fraction) = self.convergence {
            config.convergence_fraction = fraction;
        }
        if self.threads.is_some() {
            config.num_threads = self.threads;
        }
        if self.budget_ms.is_some() {
            config.wall_clock_budget_ms = self.budget_ms;
        }
        if self.abort_on_error {
            config.failure_policy = FailurePolicy::AbortSweep;
        }
        Ok(config)
    }
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

/// Run the sweep, streaming results into `writer`.
fn sweep_into<W: OutputWriter>(driver: &SweepDriver, writer: W) -> Result<SweepReport> {
    let mut obs = SweepOutputObserver::new(writer);
    let result = driver.run(&mut obs);

    // An aborted sweep skips `on_sweep_end`; close the files regardless.
    obs.finish().context("finishing output")?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing output");
    }
    Ok(result?)
}

fn run_format(driver: &SweepDriver, format: Format, out: &Path) -> Result<SweepReport> {
    match format {
        Format::Csv => sweep_into(driver, CsvWriter::new(out)?),

        #[cfg(feature = "sqlite")]
        Format::Sqlite => sweep_into(driver, td_output::SqliteWriter::new(out)?),
        #[cfg(not(feature = "sqlite"))]
        Format::Sqlite => anyhow::bail!("built without the `sqlite` feature"),

        #[cfg(feature = "parquet")]
        Format::Parquet => sweep_into(driver, td_output::ParquetWriter::new(out)?),
        #[cfg(not(feature = "parquet"))]
        Format::Parquet => anyhow::bail!("built without the `parquet` feature"),
    }
}

fn output_files(format: Format) -> &'static [&'static str] {
    match format {
        Format::Csv => &["trajectories.csv", "run_summaries.csv"],
        Format::Sqlite => &["results.db"],
        Format::Parquet => &["trajectories.parquet", "run_summaries.parquet"],
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.sweep_config()?;
    let driver = SweepDriver::new(config)?;
    let settings = driver.settings()?.len();

    println!("=== diffusion-sweep ===");
    println!(
        "Nodes: {}  |  Settings: {settings}  |  Seed: {}  |  Max steps: {}",
        driver.config().n_nodes,
        driver.config().seed,
        driver.config().max_steps,
    );
    println!();

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    info!(out = %cli.out.display(), format = ?cli.format, "writing results");

    let report = run_format(&driver, cli.format, &cli.out)?;

    println!("Sweep complete in {:.3} s", report.elapsed.as_secs_f64());
    println!("  settings run   : {}", report.table.len());
    println!("  converged      : {}", report.converged_count());
    println!("  not converged  : {}", report.unconverged_count());
    println!("  failed         : {}", report.failures.len());
    println!("  trajectory rows: {}", report.table.row_count());
    for file in output_files(cli.format) {
        println!("  {}", cli.out.join(file).display());
    }
    println!();

    println!(
        "{:>4} {:>4} {:>9} {:>9} {:>9} {:>7} {:<15}",
        "s", "w", "alpha", "beta_w", "beta_s", "steps", "status"
    );
    println!("{}", "-".repeat(62));
    for entry in report.table.entries() {
        let p = &entry.setting;
        println!(
            "{:>4} {:>4} {:>9.5} {:>9.5} {:>9.5} {:>7} {:<15}",
            p.s, p.w, p.alpha, p.beta_w, p.beta_s,
            entry.trajectory.steps(),
            entry.trajectory.status.as_str(),
        );
    }
    for failure in &report.failures {
        println!("  failed: {}: {}", failure.setting, failure.error);
    }

    Ok(())
}
