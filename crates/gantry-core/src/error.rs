//! Error types for gantry-core

/// Result type for gantry-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a bootstrap
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The issue barrier found validation errors and exit-on-error is set.
    /// The summary stays inspectable; the hosting binary decides whether to
    /// terminate the process.
    #[error(transparent)]
    Barrier(#[from] gantry_issue::BarrierError),
}
