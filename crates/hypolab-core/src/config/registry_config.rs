use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REGISTRY_CAPACITY;

/// Guess registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial capacity of each registry map. Default: 16.
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_REGISTRY_CAPACITY,
        }
    }
}
