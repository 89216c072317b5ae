//! Validation records and the bootstrap issue inspector.
//!
//! Every stage of the bootstrap collects [`ValidationResult`] records instead
//! of failing fast, so one bootstrap attempt surfaces the complete set of
//! misconfigurations. The [`IssueInspector`] accumulates the records and its
//! [`barrier`](IssueInspector::barrier) checkpoint converts them into a fatal
//! outcome; the decision to actually terminate the process belongs to the
//! outermost driver, never to this crate.

pub mod inspector;
pub mod result;

pub use inspector::{BarrierError, BarrierOptions, IssueInspector, IssueSummary};
pub use result::{CrateKind, Stage, ValidationResult};
