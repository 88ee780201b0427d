//! Parameter copy.
//!
//! Each pair is copied with three store calls, in order: read the source
//! value and type, read its description, write the destination. The first
//! failure stops the run; later pairs are never touched.

use tracing::{debug, info, warn};

use crate::core::domain::{Parameter, PutParameter};
use crate::core::mapping::{NameMapping, NamePair};
use crate::core::store::ParameterStore;
use crate::error::{MigrateError, StoreError};

/// A parameter copied to its new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copied {
    pub pair: NamePair,
    pub source: Parameter,
    pub description: String,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub copied: Vec<NamePair>,
}

/// Progress of a run, reported per pair as it happens.
#[derive(Debug)]
pub enum MigrationEvent<'a> {
    /// About to read the source of this pair.
    Copying(&'a NamePair),
    /// The pair was written.
    Copied(&'a Copied),
    /// The pair failed; the run stops after this event.
    Failed(&'a NamePair, &'a MigrateError),
}

/// Copies parameters from old to new names.
pub struct Migrator<S> {
    store: S,
    overwrite: bool,
}

impl<S: ParameterStore> Migrator<S> {
    /// Create a migrator that refuses to replace existing destinations.
    pub fn new(store: S) -> Self {
        Self {
            store,
            overwrite: false,
        }
    }

    /// Replace existing destination parameters.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Copy every pair in order, stopping at the first failure.
    pub fn run(&self, mapping: &NameMapping) -> Result<MigrationReport, MigrateError> {
        self.run_with(mapping, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_event` before and after each pair.
    pub fn run_with<F>(
        &self,
        mapping: &NameMapping,
        mut on_event: F,
    ) -> Result<MigrationReport, MigrateError>
    where
        F: FnMut(MigrationEvent<'_>),
    {
        info!(pairs = mapping.len(), overwrite = self.overwrite, "starting migration");
        let mut report = MigrationReport::default();

        for pair in mapping {
            on_event(MigrationEvent::Copying(pair));
            match self.copy(pair) {
                Ok(copied) => {
                    on_event(MigrationEvent::Copied(&copied));
                    report.copied.push(copied.pair);
                }
                Err(e) => {
                    on_event(MigrationEvent::Failed(pair, &e));
                    return Err(e);
                }
            }
        }

        info!(copied = report.copied.len(), "migration complete");
        Ok(report)
    }

    /// Copy one parameter.
    ///
    /// Nothing is written unless both reads succeed. The destination gets
    /// the source's value, type and description.
    ///
    /// # Errors
    ///
    /// - `SourceNotFound` / `SourceFetch` if the source read fails
    /// - `DescriptionNotFound` / `DescriptionFetch` if the metadata read fails
    /// - `DestinationWrite` if the store refuses the write
    pub fn copy(&self, pair: &NamePair) -> Result<Copied, MigrateError> {
        debug!(old = %pair.old, new = %pair.new, "copying parameter");

        let source = self.fetch_source(&pair.old)?;
        let description = self.fetch_description(&pair.old)?;
        debug!(
            name = source.name(),
            value = source.display_value(),
            kind = %source.kind(),
            description = %description,
            "read source parameter"
        );

        let request = PutParameter {
            name: &pair.new,
            value: source.value(),
            kind: source.kind(),
            description: &description,
            overwrite: self.overwrite,
        };
        self.store.put(&request).map_err(|source| {
            warn!(name = %pair.new, error = %source, "write failed");
            MigrateError::DestinationWrite {
                name: pair.new.clone(),
                source,
            }
        })?;

        info!(old = %pair.old, new = %pair.new, "copied parameter");
        Ok(Copied {
            pair: pair.clone(),
            source,
            description,
        })
    }

    fn fetch_source(&self, name: &str) -> Result<Parameter, MigrateError> {
        self.store.get_by_name(name, true).map_err(|err| match err {
            StoreError::NotFound(_) => MigrateError::SourceNotFound {
                name: name.to_string(),
            },
            source => MigrateError::SourceFetch {
                name: name.to_string(),
                source,
            },
        })
    }

    fn fetch_description(&self, name: &str) -> Result<String, MigrateError> {
        let matches = self
            .store
            .describe_by_name(name)
            .map_err(|source| MigrateError::DescriptionFetch {
                name: name.to_string(),
                source,
            })?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| MigrateError::DescriptionNotFound {
                name: name.to_string(),
            })?;
        Ok(first.description.unwrap_or_default())
    }
}
