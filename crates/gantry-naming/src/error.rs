//! Error types for gantry-naming

/// Result type for gantry-naming operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during name resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two or more canonical names claim the same alias. Surfaced lazily:
    /// building the maps records the collision, dereferencing the alias
    /// produces this error.
    #[error("Alias '{alias}' is ambiguous, claimed by: {}", .claimants.join(", "))]
    AmbiguousAlias {
        alias: String,
        claimants: Vec<String>,
    },
}
