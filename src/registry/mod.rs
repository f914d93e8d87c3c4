//! Repository access layer
//!
//! - [`source`]: `AssetSource` trait for listing asset paths
//! - [`nexus`]: Nexus 3 search API implementation
//! - [`error`]: Error types for registry operations

pub mod error;
pub mod nexus;
pub mod source;

pub use error::RegistryError;
pub use nexus::{Credentials, NexusRegistry};
pub use source::{AssetQuery, AssetSource};
