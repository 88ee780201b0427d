//! ssm-migrate - copy AWS SSM parameters to a new naming hierarchy.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── migrate       # Copy every mapped parameter
//! │   ├── list          # List parameters in the store
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # ssm-migrate.toml and flag resolution
//!     ├── domain/       # Parameter and environment types
//!     ├── mapping       # Old-to-new name mapping
//!     ├── migrate       # Read, describe, write per pair
//!     └── store/        # ParameterStore trait
//!         ├── ssm       # AWS Systems Manager backend
//!         └── memory    # In-memory backend
//! ```
//!
//! Old names look like `/{namespace}/{environment}/{variable}`; new names
//! insert a subsystem segment: `/{namespace}/{subsystem}/{environment}/{variable}`.
//! Each parameter keeps its value, type and description.

pub mod cli;
pub mod core;
pub mod error;
