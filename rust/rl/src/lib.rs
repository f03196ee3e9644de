pub mod algos;
pub mod config;
pub mod envs;
pub mod policies;

pub use algos::model_based::mdp::{estimator::*, vi::*, *};
pub use config::*;
pub use policies::discrete::*;
