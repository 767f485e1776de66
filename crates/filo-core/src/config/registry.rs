//! File registry configuration.

use serde::{Deserialize, Serialize};

/// Listing defaults for the file registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Page size used when a list request does not specify `limit`.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_list_limit: default_list_limit(),
        }
    }
}

fn default_list_limit() -> u64 {
    20
}
