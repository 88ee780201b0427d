//! In-memory parameter store.
//!
//! Behaves like the remote store for the four migration operations, records
//! every call, and can be told to fail specific operations on specific names.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use super::{ParameterStore, StoreResult};
use crate::core::domain::{Parameter, ParameterSummary, PutParameter};
use crate::error::StoreError;

/// A store call, as recorded by [`Memory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListAll,
    Get { name: String, decrypt: bool },
    Describe { name: String },
    Put { name: String },
}

/// In-memory parameter store.
///
/// Single-threaded: state lives in `RefCell`s so the trait's `&self`
/// methods can mutate it.
#[derive(Debug, Default)]
pub struct Memory {
    parameters: RefCell<BTreeMap<String, Parameter>>,
    calls: RefCell<Vec<Call>>,
    undescribed: HashSet<String>,
    failing_gets: HashSet<String>,
    failing_describes: HashSet<String>,
    failing_puts: HashSet<String>,
}

impl Memory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `parameters`.
    pub fn with_parameters(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        let store = Self::new();
        for param in parameters {
            store.insert(param);
        }
        store
    }

    /// Add or replace a parameter without recording a call.
    pub fn insert(&self, param: Parameter) {
        self.parameters
            .borrow_mut()
            .insert(param.name().to_string(), param);
    }

    /// Hide `name` from describe results while keeping it readable.
    pub fn without_description_entry(mut self, name: &str) -> Self {
        self.undescribed.insert(name.to_string());
        self
    }

    /// Make reads of `name` fail with a transport error.
    pub fn fail_get(mut self, name: &str) -> Self {
        self.failing_gets.insert(name.to_string());
        self
    }

    /// Make describe calls for `name` fail with a transport error.
    pub fn fail_describe(mut self, name: &str) -> Self {
        self.failing_describes.insert(name.to_string());
        self
    }

    /// Make writes to `name` fail with a rejection.
    pub fn fail_put(mut self, name: &str) -> Self {
        self.failing_puts.insert(name.to_string());
        self
    }

    /// Current contents of `name`.
    pub fn parameter(&self, name: &str) -> Option<Parameter> {
        self.parameters.borrow().get(name).cloned()
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.parameters.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.borrow().is_empty()
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Whether any call touched `name`.
    pub fn touched(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|call| match call {
            Call::ListAll => false,
            Call::Get { name: n, .. } | Call::Describe { name: n } | Call::Put { name: n } => {
                n == name
            }
        })
    }

    /// Names written so far.
    pub fn puts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Put { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl ParameterStore for Memory {
    fn list_all(&self) -> StoreResult<Vec<ParameterSummary>> {
        self.record(Call::ListAll);
        Ok(self
            .parameters
            .borrow()
            .values()
            .map(Parameter::summary)
            .collect())
    }

    fn get_by_name(&self, name: &str, decrypt: bool) -> StoreResult<Parameter> {
        self.record(Call::Get {
            name: name.to_string(),
            decrypt,
        });

        if self.failing_gets.contains(name) {
            return Err(StoreError::Transport(format!("injected failure reading {}", name)));
        }

        let param = self
            .parameters
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        if param.kind().is_secure() && !decrypt {
            return Ok(Parameter::new(
                param.name(),
                "(encrypted)",
                param.kind(),
                param.description().map(str::to_string),
            ));
        }
        Ok(param)
    }

    fn describe_by_name(&self, name: &str) -> StoreResult<Vec<ParameterSummary>> {
        self.record(Call::Describe {
            name: name.to_string(),
        });

        if self.failing_describes.contains(name) {
            return Err(StoreError::Transport(format!(
                "injected failure describing {}",
                name
            )));
        }
        if self.undescribed.contains(name) {
            return Ok(Vec::new());
        }

        Ok(self
            .parameters
            .borrow()
            .get(name)
            .map(Parameter::summary)
            .into_iter()
            .collect())
    }

    fn put(&self, request: &PutParameter<'_>) -> StoreResult<()> {
        self.record(Call::Put {
            name: request.name.to_string(),
        });

        if self.failing_puts.contains(request.name) {
            return Err(StoreError::Rejected(format!(
                "injected failure writing {}",
                request.name
            )));
        }

        let mut parameters = self.parameters.borrow_mut();
        if let Some(existing) = parameters.get(request.name) {
            if !request.overwrite {
                return Err(StoreError::Rejected(format!(
                    "parameter already exists: {}",
                    request.name
                )));
            }
            if existing.kind() != request.kind {
                return Err(StoreError::Rejected(format!(
                    "cannot change type of {} from {} to {}",
                    request.name,
                    existing.kind(),
                    request.kind
                )));
            }
        }

        let description = if request.description.is_empty() {
            None
        } else {
            Some(request.description.to_string())
        };
        parameters.insert(
            request.name.to_string(),
            Parameter::new(request.name, request.value, request.kind, description),
        );
        Ok(())
    }
}
