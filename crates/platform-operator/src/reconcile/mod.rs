//! Reconciliation of `Domain` resources.
//!
//! Each pass converges one domain:
//! - adds the finalizer before any external side effect
//! - on deletion, removes the database record and then the namespace
//! - otherwise validates, upserts the record, ensures the namespace exists
//!   and reports `status.valid`

mod finalizer;
mod reconciler;
mod status;

pub use finalizer::FinalizerState;
pub use reconciler::{DEFAULT_OPERATOR_NAME, InvalidReason, ReconcileOutcome, Reconciler};
pub use status::StatusReporter;
