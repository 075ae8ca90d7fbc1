//! sensbar-types: Shared data types for the sensbar status generator.
//!
//! This crate contains pure data types (blocks, the protocol header, module
//! configuration) shared by the engine and the built-in modules. It has no
//! runtime dependencies beyond serde, making it the foundation layer.

pub mod block;
pub mod color;
pub mod declaration;
pub mod module_config;
pub mod module_configs;
pub mod protocol;

// Re-export commonly used types at the crate root for convenience
pub use block::{Align, Block, Markup, Separator};
pub use color::gradient_color;
pub use declaration::ModuleDeclaration;
pub use module_config::ModuleConfig;
pub use module_configs::BaseModuleConfig;
pub use protocol::{ProtocolHeader, PROTOCOL_VERSION};
