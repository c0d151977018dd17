//! Cubrir: Deterministic Coverage-Set Algebra for Binary Instrumentation
//!
//! Cubrir (Spanish: "to cover") manages the code-coverage sets a binary
//! instrumentation engine produces during fuzzing or dynamic analysis:
//! per-module sets of 64-bit code offsets, with deterministic set algebra
//! across runs and a byte-stable persisted form usable across processes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     CUBRIR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Engine     │    │ Coverage   │    │ Codec      │            │
//! │   │ (trait)    │───►│ Collection │───►│ (binary /  │            │
//! │   │            │    │ + algebra  │    │  text)     │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The instrumentation engine itself (how offsets are obtained, module
//! loading, breakpoint insertion) stays outside this crate, consumed only
//! through the [`InstrumentationEngine`] trait.
//!
//! # Example
//!
//! ```
//! use cubrir::{Coverage, Offset};
//!
//! let mut baseline = Coverage::new();
//! baseline.upsert("app.exe", [Offset::new(0x10), Offset::new(0x20)]);
//!
//! let mut run = Coverage::new();
//! run.upsert("app.exe", [Offset::new(0x20), Offset::new(0x30)]);
//!
//! let new_edges = run.difference(&baseline);
//! assert_eq!(new_edges.offset_count(), 1);
//! assert!(baseline.merge(&run).contains(&run));
//! ```

#![warn(missing_docs)]

mod result;

pub mod coverage;

pub use coverage::{Coverage, CoverageCollector, InstrumentationEngine, ModuleCoverage, Offset};
pub use result::{CubrirError, CubrirResult};

/// Convenience re-exports for downstream crates.
pub mod prelude {
    pub use crate::coverage::{
        load_binary, read_binary, save_binary, save_text, write_binary, write_text, Coverage,
        CoverageCollector, InstrumentationEngine, ModuleCoverage, Offset,
    };
    pub use crate::result::{CubrirError, CubrirResult};
}
