//! Bootstrap driver for the Gantry plugin framework.
//!
//! Wires the discovery output through name resolution, configuration loading
//! and manifest validation, then applies the issue barrier. This is the one
//! place where accumulated validation errors become a fatal outcome; the
//! hosting binary maps that outcome to a process exit.

pub mod bootstrap;
pub mod discovery;
pub mod error;
pub mod logging;

pub use bootstrap::{BootOutcome, Bootstrap};
pub use discovery::{DiscoveryOutcome, PluginNode, flatten_plugin_order};
pub use error::{Error, Result};
