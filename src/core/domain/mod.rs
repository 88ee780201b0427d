//! Domain types.

mod environment;
mod parameter;

pub use environment::Environment;
pub use parameter::{Parameter, ParameterSummary, ParameterType, PutParameter};
