//! Filesystem layer for the Gantry bootstrap framework.
//!
//! Provides normalized path handling, read-side text I/O, and the
//! format-agnostic [`ConfigSource`] used by the configuration engine to load
//! configuration objects from disk.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod source;

pub use constants::{CONFIG_DIR_NAME, EnvName, SUPPORTED_EXTENSIONS};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use source::ConfigSource;
