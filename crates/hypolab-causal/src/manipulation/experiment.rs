//! An experimental setup over the measured variables of a base graph.
//!
//! Every edit is validated against the graph the experiment is paired with.
//! Derivation and reconciliation then treat the pair as consistent.

use hypolab_core::errors::ExperimentError;
use hypolab_core::models::{Manipulation, VariableKind};
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

static NO_MANIPULATION: Manipulation = Manipulation::None;

/// One variable's row in an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentVariable {
    pub name: String,
    pub manipulation: Manipulation,
    pub studied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    name: String,
    /// Ordered as the measured variables of the base graph.
    variables: Vec<ExperimentVariable>,
}

impl Experiment {
    /// One unmanipulated, studied row per measured variable of `graph`.
    pub fn new(name: impl Into<String>, graph: &Graph) -> Self {
        let variables = graph
            .variables()
            .filter(|v| v.is_measured())
            .map(|v| ExperimentVariable {
                name: v.name.clone(),
                manipulation: Manipulation::None,
                studied: true,
            })
            .collect();
        Self {
            name: name.into(),
            variables,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[ExperimentVariable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&ExperimentVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Rows whose studied flag is set, in order.
    pub fn studied_variables(&self) -> impl Iterator<Item = &ExperimentVariable> + '_ {
        self.variables.iter().filter(|v| v.studied)
    }

    /// Manipulation of `name`; `None` for variables the experiment does not list.
    pub fn manipulation_of(&self, name: &str) -> &Manipulation {
        self.variable(name)
            .map(|v| &v.manipulation)
            .unwrap_or(&NO_MANIPULATION)
    }

    /// True only for listed variables whose studied flag is cleared.
    pub fn excludes(&self, name: &str) -> bool {
        self.variable(name).is_some_and(|v| !v.studied)
    }

    pub fn is_manipulated(&self, name: &str) -> bool {
        self.manipulation_of(name).severs_causes()
    }

    /// Set the manipulation of a measured variable of `graph`.
    pub fn set_manipulation(
        &mut self,
        graph: &Graph,
        variable: &str,
        manipulation: Manipulation,
    ) -> Result<(), ExperimentError> {
        self.check_manipulable(graph, variable)?;
        if let Manipulation::Locked(value) = &manipulation {
            if value.trim().is_empty() {
                return Err(ExperimentError::MissingLockedValue {
                    experiment: self.name.clone(),
                    variable: variable.to_string(),
                });
            }
        }
        self.row_mut(variable).manipulation = manipulation;
        Ok(())
    }

    pub fn set_studied(
        &mut self,
        graph: &Graph,
        variable: &str,
        studied: bool,
    ) -> Result<(), ExperimentError> {
        self.check_manipulable(graph, variable)?;
        self.row_mut(variable).studied = studied;
        Ok(())
    }

    /// Re-check the whole experiment against a (possibly newer) graph.
    pub fn validate_against(&self, graph: &Graph) -> Result<(), ExperimentError> {
        for row in &self.variables {
            self.check_manipulable(graph, &row.name)?;
            if matches!(&row.manipulation, Manipulation::Locked(v) if v.trim().is_empty()) {
                return Err(ExperimentError::MissingLockedValue {
                    experiment: self.name.clone(),
                    variable: row.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_manipulable(&self, graph: &Graph, variable: &str) -> Result<(), ExperimentError> {
        match graph.kind_of(variable) {
            None => Err(ExperimentError::UnknownVariable {
                experiment: self.name.clone(),
                variable: variable.to_string(),
            }),
            Some(VariableKind::Measured) => Ok(()),
            Some(_) => Err(ExperimentError::UnmanipulableVariable {
                experiment: self.name.clone(),
                variable: variable.to_string(),
            }),
        }
    }

    /// Row for a variable already checked against the graph; appended when the
    /// graph gained the variable after this experiment was created.
    fn row_mut(&mut self, variable: &str) -> &mut ExperimentVariable {
        let pos = match self.variables.iter().position(|v| v.name == variable) {
            Some(pos) => pos,
            None => {
                self.variables.push(ExperimentVariable {
                    name: variable.to_string(),
                    manipulation: Manipulation::None,
                    studied: true,
                });
                self.variables.len() - 1
            }
        };
        &mut self.variables[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        let mut builder = Graph::builder();
        builder.add_measured("x").unwrap();
        builder.add_measured("y").unwrap();
        builder.add_latent("l").unwrap();
        builder.add_edge("x", "y").unwrap();
        builder.add_edge("l", "y").unwrap();
        builder.build()
    }

    #[test]
    fn new_lists_measured_variables_only() {
        let experiment = Experiment::new("exp", &graph());
        let names: Vec<&str> = experiment.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert!(experiment.variables().iter().all(|v| v.studied));
        assert_eq!(experiment.manipulation_of("l"), &Manipulation::None);
        assert_eq!(experiment.manipulation_of("nope"), &Manipulation::None);
        assert!(!experiment.excludes("l"));
    }

    #[test]
    fn rejects_contract_violations() {
        let g = graph();
        let mut experiment = Experiment::new("exp", &g);
        assert!(matches!(
            experiment.set_manipulation(&g, "z", Manipulation::Randomized),
            Err(ExperimentError::UnknownVariable { .. })
        ));
        assert!(matches!(
            experiment.set_manipulation(&g, "l", Manipulation::Randomized),
            Err(ExperimentError::UnmanipulableVariable { .. })
        ));
        assert!(matches!(
            experiment.set_manipulation(&g, "y", Manipulation::locked("  ")),
            Err(ExperimentError::MissingLockedValue { .. })
        ));
        assert_eq!(experiment.manipulation_of("y"), &Manipulation::None);
    }

    #[test]
    fn validate_against_detects_removed_variables() {
        let g = graph();
        let mut experiment = Experiment::new("exp", &g);
        experiment
            .set_manipulation(&g, "y", Manipulation::locked("3"))
            .unwrap();
        assert!(experiment.validate_against(&g).is_ok());

        let mut edit = g.to_builder();
        edit.remove_variable("y");
        let shrunk = edit.build();
        assert!(matches!(
            experiment.validate_against(&shrunk),
            Err(ExperimentError::UnknownVariable { variable, .. }) if variable == "y"
        ));
    }

    #[test]
    fn set_studied_toggles_exclusion() {
        let g = graph();
        let mut experiment = Experiment::new("exp", &g);
        experiment.set_studied(&g, "x", false).unwrap();
        assert!(experiment.excludes("x"));
        assert_eq!(experiment.studied_variables().count(), 1);
    }
}
