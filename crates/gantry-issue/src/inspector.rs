//! Accumulator and barrier checkpoint for validation records.

use crate::result::ValidationResult;

/// Options controlling a [`IssueInspector::barrier`] checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarrierOptions {
    /// When set, a barrier that finds at least one error record returns a
    /// [`BarrierError`] for the driver to act on.
    pub exit_on_error: bool,
}

/// Human-readable aggregate of the collected records.
///
/// Available at any time, including after a barrier has already reported a
/// fatal outcome, to support interactive debugging and test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    /// Number of records with `has_error` set.
    pub total_of_errors: usize,
    /// The error records themselves, in collection order.
    pub errors: Vec<ValidationResult>,
}

/// Fatal outcome of a barrier checkpoint.
///
/// One `BarrierError` is produced per barrier call-site that found errors,
/// independent of how many individual records are in error.
#[derive(Debug, thiserror::Error)]
#[error("bootstrap validation failed with {} error(s)", .summary.total_of_errors)]
pub struct BarrierError {
    pub summary: IssueSummary,
}

/// Collects validation records across all bootstrap stages.
///
/// Lower-level loaders collect rather than throw; only the barrier converts
/// the accumulated errors into a fatal outcome.
#[derive(Debug, Default)]
pub struct IssueInspector {
    records: Vec<ValidationResult>,
}

impl IssueInspector {
    /// Create an empty inspector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single record.
    pub fn collect(&mut self, record: ValidationResult) {
        if record.has_error {
            tracing::warn!(
                stage = %record.stage,
                name = %record.name,
                "Validation issue collected"
            );
        }
        self.records.push(record);
    }

    /// Append a batch of records, preserving order.
    pub fn collect_all(&mut self, records: impl IntoIterator<Item = ValidationResult>) {
        for record in records {
            self.collect(record);
        }
    }

    /// All records collected so far, passing and failing alike.
    pub fn records(&self) -> &[ValidationResult] {
        &self.records
    }

    /// Aggregate the error records into a summary.
    pub fn examine(&self) -> IssueSummary {
        let errors: Vec<ValidationResult> = self
            .records
            .iter()
            .filter(|r| r.has_error)
            .cloned()
            .collect();
        IssueSummary {
            total_of_errors: errors.len(),
            errors,
        }
    }

    /// Checkpoint: convert accumulated errors into a fatal outcome.
    ///
    /// Returns `Ok(())` when no error records exist or when
    /// `exit_on_error` is unset. The caller (the outermost bootstrap driver)
    /// decides whether a returned [`BarrierError`] terminates the process.
    pub fn barrier(&self, options: BarrierOptions) -> Result<(), BarrierError> {
        let summary = self.examine();
        if summary.total_of_errors > 0 {
            tracing::error!(
                total = summary.total_of_errors,
                "Barrier found validation errors"
            );
            if options.exit_on_error {
                return Err(BarrierError { summary });
            }
        }
        Ok(())
    }
}
