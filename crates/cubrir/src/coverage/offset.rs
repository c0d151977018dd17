//! Typed code offsets.
//!
//! An offset is a 64-bit code location relative to its module's load base.
//! The top bit is reserved: when set, the offset denotes a special coverage
//! record (comparison/value-profile hit) rather than a plain control-flow
//! edge. Set algebra treats tagged and untagged values as opaque and
//! distinct; only the text exporter filters on the tag.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tag marking a special (value-profile) coverage record.
const SPECIAL_BIT: u64 = 1 << 63;

/// A covered code location, relative to its module's load base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offset(u64);

impl Offset {
    /// Create an offset from its raw 64-bit value, tag bit included.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Create a special (value-profile) offset by tagging `raw`.
    #[inline]
    #[must_use]
    pub const fn special(raw: u64) -> Self {
        Self(raw | SPECIAL_BIT)
    }

    /// Get the raw 64-bit value, tag bit included.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether this offset carries the special-record tag.
    #[inline]
    #[must_use]
    pub const fn is_special(self) -> bool {
        self.0 & SPECIAL_BIT != 0
    }
}

impl From<u64> for Offset {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl Hash for Offset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Offset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::LowerHex for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
