//! Guess registry: lazily created guesses keyed by (experiment, hypothesis)
//! or (experiment, sample), held in a `DashMap`.
//!
//! Referents are deleted by code paths that know nothing about the registry,
//! so entries are not removed eagerly. Instead every collection read sweeps
//! first, and no caller ever observes a guess whose key no longer resolves.

pub mod key;

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use hypolab_observability::sweep_span;
use tracing::debug;

pub use key::{GuessKey, KeyResolver};

pub struct GuessRegistry<G> {
    name: &'static str,
    guesses: DashMap<GuessKey, G>,
}

impl<G: Clone + Default> GuessRegistry<G> {
    /// Create an empty registry. `name` labels its log events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            guesses: DashMap::new(),
        }
    }

    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            guesses: DashMap::with_capacity(capacity),
        }
    }

    /// Fetch the guess for `key`, creating an empty one on first access.
    ///
    /// The returned guard holds a shard lock; drop it before calling any other
    /// method on this registry.
    pub fn get_or_create(&self, key: &GuessKey) -> RefMut<'_, GuessKey, G> {
        self.guesses.entry(key.clone()).or_insert_with(|| {
            debug!(registry = self.name, key = %key, "guess created");
            G::default()
        })
    }

    /// Cloned snapshot of an existing guess.
    pub fn get(&self, key: &GuessKey) -> Option<G> {
        self.guesses.get(key).map(|r| r.clone())
    }

    pub fn contains(&self, key: &GuessKey) -> bool {
        self.guesses.contains_key(key)
    }

    pub fn remove(&self, key: &GuessKey) -> Option<G> {
        self.guesses.remove(key).map(|(_, v)| v)
    }

    /// Eagerly drop every guess keyed by `experiment`. Returns the number removed.
    pub fn remove_experiment(&self, experiment: &str) -> usize {
        let before = self.guesses.len();
        self.guesses.retain(|key, _| key.experiment() != experiment);
        before - self.guesses.len()
    }

    /// Remove every guess whose key no longer resolves. Returns the number removed.
    pub fn sweep(&self, resolver: &dyn KeyResolver) -> usize {
        let _span = sweep_span!(self.name, self.guesses.len()).entered();
        let before = self.guesses.len();
        self.guesses.retain(|key, _| resolver.is_live(key));
        let removed = before - self.guesses.len();
        if removed > 0 {
            debug!(registry = self.name, removed, "stale guesses swept");
        }
        removed
    }

    /// Sweep, then return every remaining guess ordered by key.
    pub fn entries(&self, resolver: &dyn KeyResolver) -> Vec<(GuessKey, G)> {
        self.sweep(resolver);
        let mut entries: Vec<(GuessKey, G)> = self
            .guesses
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Keys currently held, stale ones included.
    pub fn keys(&self) -> Vec<GuessKey> {
        self.guesses.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Default)]
    struct Live {
        experiments: HashSet<&'static str>,
        hypotheses: HashSet<&'static str>,
        samples: HashSet<(&'static str, &'static str)>,
    }

    impl KeyResolver for Live {
        fn has_experiment(&self, name: &str) -> bool {
            self.experiments.contains(name)
        }
        fn has_hypothesis(&self, name: &str) -> bool {
            self.hypotheses.contains(name)
        }
        fn has_sample(&self, experiment: &str, sample: &str) -> bool {
            self.samples
                .iter()
                .any(|&(e, s)| e == experiment && s == sample)
        }
    }

    #[test]
    fn get_or_create_is_lazy_and_stable() {
        let registry: GuessRegistry<Vec<u32>> = GuessRegistry::new("test");
        let key = GuessKey::hypothesis("e", "h");
        assert!(registry.get(&key).is_none());
        registry.get_or_create(&key).push(7);
        registry.get_or_create(&key).push(8);
        assert_eq!(registry.get(&key), Some(vec![7, 8]));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sweep_drops_entries_with_dangling_references() {
        let registry: GuessRegistry<u32> = GuessRegistry::new("test");
        registry.get_or_create(&GuessKey::hypothesis("e1", "h1"));
        registry.get_or_create(&GuessKey::hypothesis("e2", "h1"));
        registry.get_or_create(&GuessKey::sample("e1", "s1"));
        registry.get_or_create(&GuessKey::sample("e1", "gone"));

        let mut live = Live::default();
        live.experiments.insert("e1");
        live.hypotheses.insert("h1");
        live.samples.insert(("e1", "s1"));

        let entries = registry.entries(&live);
        let keys: Vec<_> = entries.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![GuessKey::hypothesis("e1", "h1"), GuessKey::sample("e1", "s1")]
        );
    }

    #[test]
    fn sample_key_is_dead_under_a_foreign_experiment() {
        let registry: GuessRegistry<u32> = GuessRegistry::new("test");
        registry.get_or_create(&GuessKey::sample("e1", "s1"));
        registry.get_or_create(&GuessKey::sample("e2", "s1"));

        let mut live = Live::default();
        live.experiments.insert("e1");
        live.experiments.insert("e2");
        live.samples.insert(("e1", "s1"));

        assert_eq!(registry.sweep(&live), 1);
        assert_eq!(registry.keys(), vec![GuessKey::sample("e1", "s1")]);
    }

    #[test]
    fn remove_experiment_cascades_across_key_shapes() {
        let registry: GuessRegistry<u32> = GuessRegistry::with_capacity("test", 4);
        registry.get_or_create(&GuessKey::hypothesis("e1", "h"));
        registry.get_or_create(&GuessKey::sample("e1", "s"));
        registry.get_or_create(&GuessKey::hypothesis("e2", "h"));
        assert_eq!(registry.remove_experiment("e1"), 2);
        assert_eq!(registry.keys(), vec![GuessKey::hypothesis("e2", "h")]);
    }
}
