//! Nexus image tag listing
//!
//! - [`tag`]: Tag decomposition, classification, ordering and aggregation
//! - [`registry`]: Asset path sources (Nexus 3 search API)
//! - [`provider`]: Option list generation from a configuration
//! - [`config`]: Configuration and directory resolution
//! - [`logging`]: tracing setup for the binary

pub mod config;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod tag;
