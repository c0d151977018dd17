//! Per-module coverage entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Offset;

/// Covered offsets for a single instrumented module.
///
/// Module identity is ASCII-case-insensitive (loaders report inconsistent
/// casing across runs), but the name is stored with its original casing.
/// Offsets have set semantics and iterate in ascending numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCoverage {
    name: String,
    offsets: BTreeSet<Offset>,
}

impl ModuleCoverage {
    /// Create an empty entry for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offsets: BTreeSet::new(),
        }
    }

    /// Create an entry for `name` holding `offsets`.
    #[must_use]
    pub fn with_offsets(name: impl Into<String>, offsets: impl IntoIterator<Item = Offset>) -> Self {
        Self {
            name: name.into(),
            offsets: offsets.into_iter().collect(),
        }
    }

    /// The module name, original casing preserved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name match.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// The offsets, in ascending numeric order.
    #[must_use]
    pub fn offsets(&self) -> &BTreeSet<Offset> {
        &self.offsets
    }

    /// Insert a single offset. Returns `true` if it was not already present.
    pub fn insert(&mut self, offset: Offset) -> bool {
        self.offsets.insert(offset)
    }

    /// Union more offsets into this entry.
    pub fn extend(&mut self, offsets: impl IntoIterator<Item = Offset>) {
        self.offsets.extend(offsets);
    }

    /// Whether `offset` is covered by this entry.
    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        self.offsets.contains(&offset)
    }

    /// Number of distinct offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether this entry covers no offsets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
