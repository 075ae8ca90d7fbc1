//! sensbar-core: Module contract and aggregation engine for sensbar.
//!
//! This crate contains the [`Module`] trait, the [`Registry`] of module
//! constructors, the per-module task runner, the [`Status`] drain loop, the
//! protocol [`Renderer`] and the shutdown [`Lifecycle`].

pub mod constants;
mod handle;
mod lifecycle;
mod module;
mod registry;
mod renderer;
mod signals;
mod status;

#[cfg(test)]
mod test_support;

pub use constants::{DEFAULT_MIN_REFRESH, DEFAULT_SHUTDOWN_GRACE, MIN_REFRESH_LOWER_BOUND};
pub use handle::ModuleHandle;
pub use lifecycle::{Lifecycle, LifecycleState};
pub use module::{BoxedModule, Module, ModuleMetadata};
pub use registry::{ModuleFactory, Registry};
pub use renderer::Renderer;
pub use signals::wait_for_shutdown_signal;
pub use status::{Frame, Status};

// Re-export types used in trait signatures for convenience
pub use sensbar_types::{Block, ModuleConfig, ModuleDeclaration, ProtocolHeader};
