//! A student's independence claims over pairs of studied variables.

use std::collections::BTreeMap;

use hypolab_core::errors::ReferenceError;
use hypolab_core::models::{IndependenceClaim, VariablePair};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndependenceGuess {
    #[serde(with = "super::map_entries")]
    pub(crate) claims: BTreeMap<VariablePair, IndependenceClaim>,
}

impl IndependenceGuess {
    pub fn claim(&self, a: &str, b: &str) -> Option<IndependenceClaim> {
        self.claims.get(&VariablePair::new(a, b)).copied()
    }

    /// Student edit: record a claim on an existing pair.
    pub fn set_claim(
        &mut self,
        a: &str,
        b: &str,
        claim: IndependenceClaim,
    ) -> Result<(), ReferenceError> {
        match self.claims.get_mut(&VariablePair::new(a, b)) {
            Some(slot) => {
                *slot = claim;
                Ok(())
            }
            None => Err(ReferenceError::PairNotFound {
                first: a.to_string(),
                second: b.to_string(),
            }),
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&VariablePair, IndependenceClaim)> + '_ {
        self.claims.iter().map(|(pair, &claim)| (pair, claim))
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
