use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LATENT_WARNING_THRESHOLD;

/// Equivalence checker configuration.
///
/// # Examples
///
/// ```
/// use hypolab_core::config::EquivalenceConfig;
///
/// let config = EquivalenceConfig::default();
/// assert_eq!(config.latent_warning_threshold, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceConfig {
    /// Latent count above which a warning is logged before the permutation
    /// search starts. The search itself always runs to completion. Default: 8.
    pub latent_warning_threshold: usize,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            latent_warning_threshold: DEFAULT_LATENT_WARNING_THRESHOLD,
        }
    }
}
