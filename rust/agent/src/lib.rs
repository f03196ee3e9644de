pub mod agent;
pub mod common;
pub mod error;
pub mod logging;
pub mod memory;

pub use agent::*;
pub use common::defs::*;
pub use error::*;
pub use memory::*;

pub type Discrete = usize;
pub type Continous = f64;
