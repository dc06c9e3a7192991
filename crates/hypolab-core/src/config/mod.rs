//! Configuration for hypolab.
//! TOML-based; every section falls back to compiled defaults.

pub mod equivalence_config;
pub mod lab_config;
pub mod observability_config;
pub mod registry_config;

pub use equivalence_config::EquivalenceConfig;
pub use lab_config::LabConfig;
pub use observability_config::ObservabilityConfig;
pub use registry_config::RegistryConfig;
