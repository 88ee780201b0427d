//! Old-to-new parameter name mapping.
//!
//! Old names live at `/{namespace}/{environment}/{variable}`; new names add a
//! subsystem segment: `/{namespace}/{subsystem}/{environment}/{variable}`.

use std::collections::HashSet;
use std::fmt;

use crate::core::domain::Environment;

/// Path segments shared by every mapped name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub namespace: String,
    pub subsystem: String,
}

impl PathLayout {
    /// Create a layout.
    pub fn new(namespace: impl Into<String>, subsystem: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            subsystem: subsystem.into(),
        }
    }

    /// Name under the old hierarchy.
    pub fn old_name(&self, environment: Environment, variable: &str) -> String {
        format!("/{}/{}/{}", self.namespace, environment, variable)
    }

    /// Name under the new hierarchy.
    pub fn new_name(&self, environment: Environment, variable: &str) -> String {
        format!(
            "/{}/{}/{}/{}",
            self.namespace, self.subsystem, environment, variable
        )
    }
}

/// One source/destination pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamePair {
    pub old: String,
    pub new: String,
}

impl fmt::Display for NamePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}

/// Ordered old-to-new pairs for one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    pairs: Vec<NamePair>,
}

impl NameMapping {
    /// Build the mapping for `environment`.
    ///
    /// Pairs follow the order of `variables`. A repeated variable is mapped
    /// once, at its first position.
    pub fn build<S: AsRef<str>>(
        layout: &PathLayout,
        environment: Environment,
        variables: &[S],
    ) -> Self {
        let mut seen = HashSet::new();
        let pairs = variables
            .iter()
            .map(AsRef::as_ref)
            .filter(|variable| seen.insert(*variable))
            .map(|variable| NamePair {
                old: layout.old_name(environment, variable),
                new: layout.new_name(environment, variable),
            })
            .collect();

        Self { pairs }
    }

    /// Pairs in migration order.
    pub fn pairs(&self) -> &[NamePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in migration order.
    pub fn iter(&self) -> std::slice::Iter<'_, NamePair> {
        self.pairs.iter()
    }
}

impl<'a> IntoIterator for &'a NameMapping {
    type Item = &'a NamePair;
    type IntoIter = std::slice::Iter<'a, NamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
