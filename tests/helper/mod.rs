pub mod nexus;

pub use nexus::{SEARCH_PATH, config_for, search_body};
