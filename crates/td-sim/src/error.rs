use td_core::{ParameterSetting, TdError};
use td_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Parameter(#[from] TdError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("sweep aborted at setting {index} ({setting}): {source}")]
    Aborted {
        index:   usize,
        setting: ParameterSetting,
        #[source]
        source:  Box<SimError>,
    },
}

pub type SimResult<T> = Result<T, SimError>;
