//! Set algebra over coverage collections.
//!
//! All binary operations take their inputs by shared reference and return a
//! freshly owned collection; inputs are never mutated. Module matching is
//! case-insensitive; offset comparison is numeric and includes the tag bit,
//! so tagged and untagged forms of one value are different offsets.

use std::collections::BTreeSet;

use super::{Coverage, Offset};

impl Coverage {
    /// Union of both collections.
    ///
    /// Every module from either input appears in the result; offsets of
    /// modules present in both are unioned. "Merge this run into the
    /// cumulative map."
    #[must_use]
    pub fn merge(&self, other: &Coverage) -> Coverage {
        let mut result = self.clone();
        for module in other.modules() {
            result.upsert(module.name(), module.offsets().iter().copied());
        }
        result
    }

    /// Offsets covered by both collections.
    ///
    /// A module appears only if present in both inputs and the shared offset
    /// set is non-empty. Enumerates `self`'s modules; a module absent from
    /// `self` trivially intersects to nothing.
    #[must_use]
    pub fn intersect(&self, other: &Coverage) -> Coverage {
        let mut result = Coverage::new();
        for module in self.modules() {
            let Some(theirs) = other.find(module.name()) else {
                continue;
            };
            let shared: BTreeSet<Offset> = module
                .offsets()
                .intersection(theirs.offsets())
                .copied()
                .collect();
            if !shared.is_empty() {
                result.upsert(module.name(), shared);
            }
        }
        result
    }

    /// Offsets covered by exactly one collection.
    ///
    /// Modules present on one side only are included unchanged. Both module
    /// lists are walked independently; a module unique to `other` must not
    /// be missed.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Coverage) -> Coverage {
        let mut result = Coverage::new();
        for module in self.modules() {
            match other.find(module.name()) {
                None => result.upsert(module.name(), module.offsets().iter().copied()),
                Some(theirs) => {
                    let delta: BTreeSet<Offset> = module
                        .offsets()
                        .symmetric_difference(theirs.offsets())
                        .copied()
                        .collect();
                    if !delta.is_empty() {
                        result.upsert(module.name(), delta);
                    }
                }
            }
        }
        // second pass picks up modules other knows and self does not
        for module in other.modules() {
            if self.find(module.name()).is_none() {
                result.upsert(module.name(), module.offsets().iter().copied());
            }
        }
        result
    }

    /// Offsets covered by `self` but not by `other`.
    ///
    /// Modules of `self` absent from `other` are included unchanged; empty
    /// per-module results are omitted. "What new edges did this run find" =
    /// `run.difference(&baseline)`.
    #[must_use]
    pub fn difference(&self, other: &Coverage) -> Coverage {
        let mut result = Coverage::new();
        for module in self.modules() {
            match other.find(module.name()) {
                None => result.upsert(module.name(), module.offsets().iter().copied()),
                Some(theirs) => {
                    let fresh: BTreeSet<Offset> = module
                        .offsets()
                        .difference(theirs.offsets())
                        .copied()
                        .collect();
                    if !fresh.is_empty() {
                        result.upsert(module.name(), fresh);
                    }
                }
            }
        }
        result
    }

    /// Whether every module/offset pair of `other` also appears in `self`.
    ///
    /// Short-circuits on the first missing module or offset. "Is this input
    /// redundant" = `cumulative.contains(&run)`.
    #[must_use]
    pub fn contains(&self, other: &Coverage) -> bool {
        for module in other.modules() {
            let Some(mine) = self.find(module.name()) else {
                return false;
            };
            if !module.offsets().is_subset(mine.offsets()) {
                return false;
            }
        }
        true
    }
}
