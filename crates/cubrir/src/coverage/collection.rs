//! Coverage collections.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ModuleCoverage, Offset};
use crate::result::CubrirResult;

/// The full set of per-module offset sets gathered in one context — a run,
/// a corpus, or a loaded file.
///
/// Entries keep append (first-seen) order; there is at most one entry per
/// case-insensitive module name. All population paths go through
/// [`Coverage::upsert`], which enforces that uniqueness.
///
/// Equality is set equality: two collections are equal when each contains
/// the other, regardless of entry order or name casing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coverage {
    modules: Vec<ModuleCoverage>,
}

impl Coverage {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for `name`, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ModuleCoverage> {
        self.modules.iter().find(|m| m.matches_name(name))
    }

    /// Find the entry for `name` mutably, case-insensitively.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut ModuleCoverage> {
        self.modules.iter_mut().find(|m| m.matches_name(name))
    }

    /// Union `offsets` into the entry for `name`, appending a new entry if
    /// the module was not seen before. The single mutation primitive.
    pub fn upsert(&mut self, name: &str, offsets: impl IntoIterator<Item = Offset>) {
        if let Some(module) = self.find_mut(name) {
            module.extend(offsets);
        } else {
            self.modules.push(ModuleCoverage::with_offsets(name, offsets));
        }
    }

    /// The entries, in append order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleCoverage] {
        &self.modules
    }

    /// Number of module entries.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Total number of offsets across all entries.
    #[must_use]
    pub fn offset_count(&self) -> usize {
        self.modules.iter().map(ModuleCoverage::len).sum()
    }

    /// Number of offsets carrying the special-record tag.
    #[must_use]
    pub fn special_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| m.offsets())
            .filter(|o| o.is_special())
            .count()
    }

    /// Whether the collection has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Render the collection as pretty-printed JSON.
    pub fn to_json(&self) -> CubrirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PartialEq for Coverage {
    fn eq(&self, other: &Self) -> bool {
        self.contains(other) && other.contains(self)
    }
}

impl Eq for Coverage {}

impl<'a> IntoIterator for &'a Coverage {
    type Item = &'a ModuleCoverage;
    type IntoIter = std::slice::Iter<'a, ModuleCoverage>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for module in &self.modules {
            writeln!(f, "{}", module.name())?;
            for offset in module.offsets() {
                write!(f, "0x{offset:x} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
