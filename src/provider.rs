//! Option list generation for a configured Nexus repository
//!
//! Fetch failures never surface as errors here: they are logged and produce
//! an empty list, the same as a repository without matching assets.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::NexusConfig;
use crate::registry::nexus::NexusRegistry;
use crate::registry::source::{AssetQuery, AssetSource};
use crate::tag::{TagOption, aggregate_options};

/// Returned as the only option while no endpoint host is configured
pub const CONFIGURE_HOST_MESSAGE: &str =
    "Configure project.plugin.OptionValues.Nexus3OptionProvider.endpointHost";

/// Build the option list for a configuration, querying Nexus.
pub async fn option_values(config: &NexusConfig) -> Vec<TagOption> {
    let Some(endpoint) = config.endpoint() else {
        info!("No endpoint host configured");
        return vec![TagOption::message(CONFIGURE_HOST_MESSAGE)];
    };

    let registry = NexusRegistry::with_timeout(
        &endpoint,
        config.credentials(),
        Duration::from_millis(config.timeout_ms),
    );
    collect_options(&registry, &config.query()).await
}

/// Fetch paths from a source and aggregate them into options.
pub async fn collect_options(source: &dyn AssetSource, query: &AssetQuery) -> Vec<TagOption> {
    let paths = source
        .search_paths(query)
        .await
        .inspect_err(|e| {
            warn!(
                "Failed to search {} for {}: {}",
                query.repository, query.component_name, e
            )
        })
        .unwrap_or_default();

    aggregate_options(&paths)
}
