pub mod config;
pub mod error;
pub mod safety;
pub mod types;

pub use config::SolaceConfig;
pub use error::{Result, SolaceError};
pub use safety::{SafetyCheck, SafetyGate};
pub use types::*;
