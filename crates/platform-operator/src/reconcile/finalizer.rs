//! Finalizer lifecycle of a `Domain`.
//!
//! ```text
//! NoFinalizer --add marker--> Active --deletion requested--> Terminating
//!                                                               |
//!                      cleanup failed: stay, keep marker <------+
//!                      cleanup done: remove marker ---------> Removed
//! ```
//!
//! No external side effect happens before the marker has been persisted, and
//! the marker is only dropped after both the record and the namespace are
//! confirmed gone.

use platform_core::Domain;

/// Where a `Domain` sits in its finalizer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizerState {
    /// Marker absent, no deletion requested. The marker must be added first.
    NoFinalizer,
    /// Marker present, no deletion requested. Normal synchronization.
    Active,
    /// Marker present and deletion requested. Cleanup must run.
    Terminating,
    /// Marker absent and deletion requested. Nothing left for us to do.
    Removed,
}

impl FinalizerState {
    /// Classifies the observed object.
    pub fn of(domain: &Domain) -> Self {
        match (domain.has_finalizer(), domain.is_deleting()) {
            (false, false) => Self::NoFinalizer,
            (true, false) => Self::Active,
            (true, true) => Self::Terminating,
            (false, true) => Self::Removed,
        }
    }
}
