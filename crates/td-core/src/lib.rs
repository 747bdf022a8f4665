//! `td-core` — foundational types for the `tie_diffusion` simulator.
//!
//! This crate is a dependency of every other `td-*` crate.  It has no `td-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SubnetId`, `NodeAddr`                                |
//! | [`params`]      | `ParameterSetting` and its validation                 |
//! | [`grid`]        | `Levels`, `ParameterGrid` (cartesian expansion)       |
//! | [`config`]      | `SweepConfig`, `FailurePolicy`                        |
//! | [`rng`]         | `RunRng` (one independent stream per run)             |
//! | [`error`]       | `TdError`, `TdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on config and grid types; needed |
//! |         | to load a `SweepConfig` from JSON.                         |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod params;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FailurePolicy, SweepConfig};
pub use error::{TdError, TdResult};
pub use grid::{Levels, ParameterGrid};
pub use ids::{NodeAddr, SubnetId};
pub use params::ParameterSetting;
pub use rng::RunRng;
