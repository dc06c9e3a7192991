//! Experimental interventions on a single variable.

use serde::{Deserialize, Serialize};

/// How an experiment treats one variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Manipulation {
    /// Left to its natural causes.
    #[default]
    None,
    /// Forcibly randomized by the experimenter.
    Randomized,
    /// Held at a fixed value.
    Locked(String),
}

impl Manipulation {
    /// Randomized and locked variables no longer depend on their causes.
    pub fn severs_causes(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn locked(value: impl Into<String>) -> Self {
        Self::Locked(value.into())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Randomized => "randomized",
            Self::Locked(_) => "locked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_interventions_sever_causes() {
        assert!(!Manipulation::None.severs_causes());
        assert!(Manipulation::Randomized.severs_causes());
        assert!(Manipulation::locked("high").severs_causes());
    }

    #[test]
    fn serializes_with_tag_and_value() {
        let json = serde_json::to_string(&Manipulation::locked("12")).unwrap();
        assert_eq!(json, r#"{"type":"locked","value":"12"}"#);
        let none = serde_json::to_string(&Manipulation::None).unwrap();
        assert_eq!(none, r#"{"type":"none"}"#);
    }
}
