//! Prompt presets offered by the calculator, each with a typical number of
//! output tokens.

use crate::errors::{CatalogError, CatalogResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub output_tokens: u32,
}

impl Scenario {
    /// Label shown in the scenario selector, e.g. `"Write an email (170 output tokens)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({} output tokens)", self.name, self.output_tokens)
    }
}

pub const SCENARIOS: [Scenario; 6] = [
    Scenario {
        name: "Write a Tweet",
        output_tokens: 50,
    },
    Scenario {
        name: "Write an email",
        output_tokens: 170,
    },
    Scenario {
        name: "Write an article summary",
        output_tokens: 250,
    },
    Scenario {
        name: "Small conversation with a chatbot",
        output_tokens: 400,
    },
    Scenario {
        name: "Write a report of 5 pages",
        output_tokens: 5000,
    },
    Scenario {
        name: "Write the code for this app",
        output_tokens: 15000,
    },
];

/// Index of the scenario selected when the calculator opens.
pub const DEFAULT_SCENARIO_INDEX: usize = 2;

#[must_use]
pub fn default_scenario() -> &'static Scenario {
    &SCENARIOS[DEFAULT_SCENARIO_INDEX]
}

/// Finds a scenario by its selector label.
pub fn scenario_by_label(label: &str) -> CatalogResult<&'static Scenario> {
    SCENARIOS
        .iter()
        .find(|s| s.label() == label)
        .ok_or_else(|| CatalogError::UnknownScenario(label.to_string()))
}

/// Output tokens of the scenario with the given label.
pub fn output_tokens(label: &str) -> CatalogResult<u32> {
    scenario_by_label(label).map(|s| s.output_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(SCENARIOS[0].label(), "Write a Tweet (50 output tokens)");
        assert_eq!(
            SCENARIOS[5].label(),
            "Write the code for this app (15000 output tokens)"
        );
    }

    #[test]
    fn test_default_scenario() {
        assert_eq!(default_scenario().name, "Write an article summary");
        assert_eq!(default_scenario().output_tokens, 250);
    }

    #[test]
    fn test_lookup_by_label() {
        assert_eq!(
            output_tokens("Small conversation with a chatbot (400 output tokens)").unwrap(),
            400
        );
        for scenario in &SCENARIOS {
            assert_eq!(scenario_by_label(&scenario.label()).unwrap(), scenario);
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(
            output_tokens("Write an email"),
            Err(CatalogError::UnknownScenario("Write an email".to_string()))
        );
    }

    #[test]
    fn test_token_counts_increase() {
        assert!(SCENARIOS
            .windows(2)
            .all(|pair| pair[0].output_tokens < pair[1].output_tokens));
    }
}
