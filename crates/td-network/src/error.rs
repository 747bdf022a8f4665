//! Network-subsystem error type.

use thiserror::Error;

use td_core::{SubnetId, TdError};

/// Errors produced by `td-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Parameter(#[from] TdError),

    #[error("{n_nodes} nodes cannot fill a single subnetwork of size {s}")]
    EmptyNetwork { n_nodes: usize, s: u32 },

    #[error(
        "cannot draw {requested} distinct weak ties outside {own}: only {available} nodes available"
    )]
    InsufficientPopulation {
        own:       SubnetId,
        requested: u32,
        available: usize,
    },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
