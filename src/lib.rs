//! Roche potential and Lagrange point visualization toolkit.
//!
//! The numeric core lives in the workspace crates; this facade re-exports
//! them for the binaries and for external consumers, so a single dependency
//! covers solving, sampling, catalogs, and export.

pub use roche_config as config;
pub use roche_core::{constants, grid, polar};
pub use roche_export as export;
pub use roche_field as field;
pub use roche_lagrangian as lagrangian;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
