//! Error types for gantry-config

/// Result type for gantry-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading and transforming configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] gantry_fs::Error),

    #[error("Naming error: {0}")]
    Naming(#[from] gantry_naming::Error),
}
