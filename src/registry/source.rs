//! Source of repository asset paths

#[cfg(test)]
use mockall::automock;

use crate::registry::error::RegistryError;

/// Filters for an asset search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    pub repository: String,
    /// Component name; `*` matches every component
    pub component_name: String,
    /// Component version (the docker tag); `None` matches every version
    pub component_version: Option<String>,
}

/// Trait for listing asset paths from a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetches every asset path matching the query
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Paths such as `v2/my-service/manifests/1.2.3-4`,
    ///   with all result pages merged
    /// * `Err(RegistryError)` - If any request fails
    async fn search_paths(&self, query: &AssetQuery) -> Result<Vec<String>, RegistryError>;
}
