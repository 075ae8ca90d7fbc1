//! sensbar: an i3bar status line generator.
//!
//! The engine lives in `sensbar-core` and the built-in modules in
//! `sensbar-sources`; this crate adds the configuration file and the binary.

pub mod config;

pub use sensbar_core as core;
pub use sensbar_sources as sources;
pub use sensbar_types as types;
