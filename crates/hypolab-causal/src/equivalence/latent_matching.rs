//! Latent-layer comparison under a candidate pairing of latent names.

use std::collections::{BTreeSet, HashMap};

use hypolab_core::models::VariableKind;
use petgraph::Direction;

use crate::graph::{Graph, Incidence};

/// How an incident edge looks from the latent: direction, neighbor name, and
/// whether the neighbor is itself latent.
type IncidentSignature = BTreeSet<(Direction, String, bool)>;

/// Check every paired latent `answer_order[i] <-> permutation[i]`.
///
/// Non-latent neighbors must match by name; latent neighbors must match
/// through the same pairing.
pub(crate) fn pairing_matches(
    answer: &Graph,
    candidate: &Graph,
    answer_order: &[&str],
    permutation: &[&str],
) -> bool {
    let pairing: HashMap<&str, &str> = answer_order
        .iter()
        .copied()
        .zip(permutation.iter().copied())
        .collect();

    pairing
        .iter()
        .all(|(&la, &lb)| latent_pair_matches(answer, candidate, la, lb, &pairing))
}

fn latent_pair_matches(
    answer: &Graph,
    candidate: &Graph,
    la: &str,
    lb: &str,
    pairing: &HashMap<&str, &str>,
) -> bool {
    let answer_incident = causal_incidence(answer, la);
    let candidate_incident = causal_incidence(candidate, lb);
    if answer_incident.len() != candidate_incident.len() {
        return false;
    }

    let mut translated = IncidentSignature::new();
    for incidence in answer_incident {
        let neighbor = &incidence.neighbor.name;
        if incidence.neighbor.is_latent() {
            match pairing.get(neighbor.as_str()) {
                Some(&mapped) => {
                    translated.insert((incidence.direction, mapped.to_string(), true));
                }
                None => return false,
            }
        } else {
            translated.insert((incidence.direction, neighbor.clone(), false));
        }
    }

    let observed: IncidentSignature = candidate_incident
        .into_iter()
        .map(|i| (i.direction, i.neighbor.name.clone(), i.neighbor.is_latent()))
        .collect();

    // Equal sets: every answer edge is found in the candidate and vice versa.
    translated == observed
}

/// Edges of `latent` to measured or latent neighbors. Error terms are not
/// part of the comparison.
fn causal_incidence<'a>(graph: &'a Graph, latent: &str) -> Vec<Incidence<'a>> {
    graph
        .incident(latent)
        .into_iter()
        .filter(|i| i.neighbor.kind != VariableKind::Error)
        .collect()
}
