//! Bridging an instrumentation engine into the coverage data model.
//!
//! The engine owns all per-module instrumentation state (pending-offset
//! buffers, ignore sets, instrumentation flags); this crate only issues
//! request/response calls through [`InstrumentationEngine`] and never holds
//! a lock across them.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use super::{Coverage, Offset};

/// Contract a concrete instrumentation backend implements so its collected
/// offsets can flow into a [`Coverage`] and its ignore sets can be fed back.
pub trait InstrumentationEngine {
    /// Engine-side module handle, opaque to this crate.
    type Handle: Clone;

    /// Snapshot newly observed offsets into the per-module pending buffers.
    fn collect_now(&mut self);

    /// Handles of all modules the engine currently instruments.
    fn modules(&self) -> Vec<Self::Handle>;

    /// Name of the module behind `module`.
    fn module_name(&self, module: &Self::Handle) -> &str;

    /// Whether `module` has pending offsets awaiting collection.
    fn has_pending(&self, module: &Self::Handle) -> bool;

    /// Copy of `module`'s pending offsets.
    fn pending_offsets(&self, module: &Self::Handle) -> BTreeSet<Offset>;

    /// Reset `module`'s pending-offset buffer.
    fn clear_pending(&mut self, module: &Self::Handle);

    /// Look up a module by name; `None` when the engine does not know it.
    fn find_module(&self, name: &str) -> Option<Self::Handle>;

    /// Whether `module` currently has instrumentation in place.
    fn is_instrumented(&self, module: &Self::Handle) -> bool;

    /// Remove already-placed instrumentation for one offset of `module`.
    fn retract_instrumentation(&mut self, module: &Self::Handle, offset: Offset);

    /// Mark `offsets` of `module` as never-to-be-instrumented again.
    fn register_ignored(&mut self, module: &Self::Handle, offsets: &BTreeSet<Offset>);
}

/// Thin adapter pulling newly observed offsets out of an engine and pushing
/// ignore sets back into it.
#[derive(Debug)]
pub struct CoverageCollector<E> {
    engine: E,
}

impl<E: InstrumentationEngine> CoverageCollector<E> {
    /// Wrap `engine`.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Shared access to the wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Unwrap the engine.
    #[must_use]
    pub fn into_inner(self) -> E {
        self.engine
    }

    /// Pull newly collected offsets into `into`.
    ///
    /// Modules with nothing pending are skipped entirely so no spurious
    /// empty entries appear. With `clear_after`, each module's pending
    /// buffer is reset after its offsets are copied, never before.
    pub fn collect(&mut self, into: &mut Coverage, clear_after: bool) {
        self.engine.collect_now();
        for handle in self.engine.modules() {
            if !self.engine.has_pending(&handle) {
                continue;
            }
            let offsets = self.engine.pending_offsets(&handle);
            if offsets.is_empty() {
                continue;
            }
            let name = self.engine.module_name(&handle).to_string();
            trace!(module = %name, offsets = offsets.len(), "collected pending offsets");
            into.upsert(&name, offsets);
            if clear_after {
                self.engine.clear_pending(&handle);
            }
        }
    }

    /// Register every offset of `coverage` as not-to-be-instrumented.
    ///
    /// Modules the engine does not know are skipped silently; coverage files
    /// commonly reference modules that are not currently loaded. For modules
    /// that are already instrumented, instrumentation is retracted per
    /// offset, since the ignore request may arrive after instrumentation
    /// took effect (e.g. when seeding from a previous run's file).
    pub fn ignore(&mut self, coverage: &Coverage) {
        for module in coverage.modules() {
            let handle = match self.engine.find_module(module.name()) {
                Some(handle) => handle,
                None => {
                    debug!(module = module.name(), "ignore: module not loaded, skipping");
                    continue;
                }
            };
            self.engine.register_ignored(&handle, module.offsets());
            if self.engine.is_instrumented(&handle) {
                for offset in module.offsets() {
                    self.engine.retract_instrumentation(&handle, *offset);
                }
            }
        }
    }
}
