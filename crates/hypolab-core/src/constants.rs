/// Latent count above which an equivalence check logs a warning about the
/// `n!` permutation search.
pub const DEFAULT_LATENT_WARNING_THRESHOLD: usize = 8;

/// Default initial capacity for each guess registry.
pub const DEFAULT_REGISTRY_CAPACITY: usize = 16;

/// Default log level when no `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
