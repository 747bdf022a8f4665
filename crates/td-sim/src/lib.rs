//! `td-sim` — diffusion engine for the tie_diffusion simulator.
//!
//! # One run
//!
//! ```text
//! build GlobalNetwork(n_nodes, s); reset ActivationState
//! for t in 1..=max_steps:
//!   ① Order   — shuffle every (subnet, local) address.
//!   ② Visit   — for each address in that order, skipping active nodes:
//!                 strong = active members of its own clique
//!                 weak   = active members of w fresh weak ties
//!                 p      = 1 − (1−α)(1−β_w)^weak (1−β_s)^strong
//!                 activate with probability p; later visits in the
//!                 same pass see it.
//!   ③ Record  — append (t, total_active) to the trajectory.
//!   ④ Stop    — converged once total_active ≥ ceil(fraction · assigned).
//! ```
//!
//! A sweep repeats this for every setting of a [`ParameterGrid`] and collects
//! the trajectories into a [`ResultTable`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs sweep settings on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use td_core::ParameterSetting;
//! use td_sim::{NoopObserver, RunBuilder};
//!
//! let setting = ParameterSetting::new(5, 5, 0.05, 0.05, 0.1);
//! let trajectory = RunBuilder::new(100, setting, 42)
//!     .max_steps(200)
//!     .build()?
//!     .run(&mut NoopObserver)?;
//! println!("T95 = {}", trajectory.steps());
//! ```
//!
//! [`ParameterGrid`]: td_core::ParameterGrid

pub mod builder;
pub mod error;
pub mod observer;
pub mod run;
pub mod sweep;
pub mod table;
pub mod update;


pub use builder::RunBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RunObserver, SweepObserver};
pub use run::{Run, RunStatus, Trajectory, TrajectoryPoint};
pub use sweep::{SweepDriver, SweepFailure, SweepReport, run_sweep};
pub use table::{ResultRow, ResultTable, TableEntry};
pub use update::{ActivationUpdate, activation_probability};
