use crate::{Continous, Discrete};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RlError>;

#[derive(Debug, Error)]
pub enum RlError {
    #[error("{what} index {index} out of range [0, {bound})")]
    IndexOutOfRange {
        what: &'static str,
        index: Discrete,
        bound: usize,
    },

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("value estimates became non-finite after {iterations} iterations")]
    NonFinite { iterations: usize },

    /// The partial result of the last sweep is kept for inspection.
    #[error("no convergence after {iterations} iterations (last delta {delta})")]
    NonConvergence {
        iterations: usize,
        delta: Continous,
        v: Vec<Continous>,
        q: Vec<Vec<Continous>>,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
