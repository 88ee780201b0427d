//! Parameter store backends.
//!
//! The migration only needs four operations from a store, so they are
//! abstracted behind [`ParameterStore`]. Implementations:
//!
//! - `Ssm`: AWS Systems Manager Parameter Store
//! - `Memory`: in-process map used by tests
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `ParameterStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::core::domain::{Parameter, ParameterSummary, PutParameter};
use crate::error::StoreError;

mod memory;
mod ssm;

pub use memory::{Call, Memory};
pub use ssm::Ssm;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Parameter store operations used by the migration.
///
/// All calls block until the store answers.
pub trait ParameterStore {
    /// List every parameter in the store, across all pages.
    fn list_all(&self) -> StoreResult<Vec<ParameterSummary>>;

    /// Read a parameter with its value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no parameter has this name.
    fn get_by_name(&self, name: &str, decrypt: bool) -> StoreResult<Parameter>;

    /// Metadata of parameters whose name equals `name`.
    ///
    /// Returns at most one entry for a store with unique names; an empty
    /// result means the name is unknown to the metadata index.
    fn describe_by_name(&self, name: &str) -> StoreResult<Vec<ParameterSummary>>;

    /// Write a parameter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rejected` if the store refuses the write, for
    /// instance when the name exists and `overwrite` is false.
    fn put(&self, request: &PutParameter<'_>) -> StoreResult<()>;
}

impl<S: ParameterStore + ?Sized> ParameterStore for &S {
    fn list_all(&self) -> StoreResult<Vec<ParameterSummary>> {
        (**self).list_all()
    }

    fn get_by_name(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        (**self).get_by_name(name, decrypt)
    }

    fn describe_by_name(&self, name: &str) -> StoreResult<Vec<ParameterSummary>> {
        (**self).describe_by_name(name)
    }

    fn put(&self, request: &PutParameter<'_>) -> StoreResult<()> {
        (**self).put(request)
    }
}
