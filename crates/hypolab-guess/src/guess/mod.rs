//! Guess objects and their reconciliation against the current sources of truth.

pub mod independence;
pub mod manipulated;
pub mod reconcile;

pub use independence::IndependenceGuess;
pub use manipulated::{EdgeDiscrepancy, GuessedManipulatedGraph};
pub use reconcile::{reconcile_independence, reconcile_manipulated_graph, ReconcileReport};

/// Serialize struct-keyed maps as `[key, value]` entry lists so they survive JSON.
pub(crate) mod map_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let entries: Vec<(K, V)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
