//! Property tests for the equivalence checker and deriver.

use std::collections::HashMap;

use proptest::prelude::*;

use hypolab_causal::{derive, is_equivalent, Experiment, Graph};
use hypolab_core::models::{Edge, Manipulation, VariableKind};

const MEASURED: usize = 5;
const LATENT: usize = 3;

fn node_name(i: usize) -> String {
    if i < MEASURED {
        format!("m{i}")
    } else {
        format!("L{}", i - MEASURED)
    }
}

/// Random graph over 5 measured and 3 latent variables; invalid edges are skipped.
fn build_graph(edges: &[(usize, usize)]) -> Graph {
    let mut builder = Graph::builder();
    for i in 0..MEASURED + LATENT {
        let kind = if i < MEASURED {
            VariableKind::Measured
        } else {
            VariableKind::Latent
        };
        builder
            .add_variable(hypolab_core::models::Variable::new(node_name(i), kind))
            .unwrap();
    }
    for &(from, to) in edges {
        let _ = builder.add_edge(&node_name(from), &node_name(to));
    }
    builder.build()
}

/// Rename latents through `order` (L{i} -> R{order[i]}) and insert them in
/// reverse so discovery order differs as well.
fn relabel(graph: &Graph, order: &[usize]) -> Graph {
    let renames: HashMap<String, String> = (0..LATENT)
        .map(|i| (format!("L{i}"), format!("R{}", order[i])))
        .collect();
    let rename = |name: &str| renames.get(name).cloned().unwrap_or_else(|| name.to_string());

    let mut builder = Graph::builder();
    let mut variables: Vec<_> = graph.variables().cloned().collect();
    variables.reverse();
    for mut variable in variables {
        variable.name = rename(&variable.name);
        builder.add_variable(variable).unwrap();
    }
    for edge in graph.edges() {
        builder
            .add_edge(&rename(&edge.from), &rename(&edge.to))
            .unwrap();
    }
    builder.build()
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    let n = MEASURED + LATENT;
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

proptest! {
    #[test]
    fn equivalence_is_reflexive(edges in edge_strategy()) {
        let graph = build_graph(&edges);
        prop_assert!(is_equivalent(&graph, &graph));
    }

    #[test]
    fn latent_relabeling_preserves_equivalence(
        edges in edge_strategy(),
        order in Just((0..LATENT).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let graph = build_graph(&edges);
        let relabeled = relabel(&graph, &order);
        prop_assert!(is_equivalent(&graph, &relabeled));
        prop_assert!(is_equivalent(&relabeled, &graph));
    }

    #[test]
    fn missing_measured_edge_is_never_equivalent(
        edges in edge_strategy(),
        from in 0..MEASURED,
        to in 0..MEASURED,
    ) {
        prop_assume!(from != to);
        let mut builder = build_graph(&edges).to_builder();
        let _ = builder.add_edge(&node_name(from), &node_name(to));
        let answer = builder.build();

        let mut candidate = answer.to_builder();
        candidate.remove_edge(&node_name(from), &node_name(to));
        prop_assert!(!is_equivalent(&answer, &candidate.build()));
    }

    #[test]
    fn derivation_partitions_reported_edges(
        edges in edge_strategy(),
        manipulated in prop::collection::vec(any::<bool>(), MEASURED),
    ) {
        let graph = build_graph(&edges);
        let mut experiment = Experiment::new("exp", &graph);
        for (i, &on) in manipulated.iter().enumerate() {
            if on {
                experiment
                    .set_manipulation(&graph, &node_name(i), Manipulation::Randomized)
                    .unwrap();
            }
        }
        let view = derive(&graph, &experiment);
        prop_assert_eq!(view.edge_count(), graph.edge_count());
        for edge in graph.edges() {
            let broken = view.broken.contains(&edge);
            prop_assert_eq!(broken, experiment.is_manipulated(&edge.to));
            prop_assert_eq!(view.active.contains(&edge), !broken);
        }
        prop_assert!(view.active.iter().all(|e: &Edge| graph.contains_edge(e)));
    }
}
