//! Tag parsing and version/branch ordering
//!
//! Turns a flat list of repository paths into an ordered, deduplicated list
//! of tags. Pure computation: no I/O, no shared state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  decompose  │────▶│  classify   │────▶│  aggregate  │
//! │ (path→Tag)  │     │(release/br.)│     │(dedup, sort)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │   compare   │◀────────────────────────│    types    │
//! │ (key order) │                         │ (TagOption) │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`decompose`]: `Tag`, split into artifact id, label and build suffix
//! - [`classify`]: Release vs branch detection
//! - [`compare`]: Segment-wise ordering of comparison keys
//! - [`aggregate`]: Per-label deduplication and final ordering
//! - [`types`]: `TagOption` returned to callers

pub mod aggregate;
pub mod classify;
pub mod compare;
pub mod decompose;
pub mod types;

pub use aggregate::{TagAggregator, aggregate, aggregate_options};
pub use classify::{TagKind, classify};
pub use compare::VersionKey;
pub use decompose::Tag;
pub use types::TagOption;
