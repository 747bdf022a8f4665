//! `td-network` — network topology and per-node state for `tie_diffusion`.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`network`]     | `GlobalNetwork` (disjoint cliques), `SubNetwork` views    |
//! | [`state`]       | `ActivationState` (monotonic informed flags)              |
//! | [`sampler`]     | `WeakTieSampler` (duplicate-free cross-clique contacts)   |
//! | [`error`]       | `NetworkError`, `NetworkResult`                           |
//!
//! All three structures are owned by exactly one simulation run and are
//! rebuilt for every parameter setting.

pub mod error;
pub mod network;
pub mod sampler;
pub mod state;


pub use error::{NetworkError, NetworkResult};
pub use network::{GlobalNetwork, SubNetwork};
pub use sampler::WeakTieSampler;
pub use state::ActivationState;
