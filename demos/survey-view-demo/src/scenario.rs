//! Scenario files: collaborator state plus the view requests to resolve.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use survey_view_gate::MockBackend;
use survey_view_types::{BillingPlan, RequestContext, SurveyDescriptor, TokenStatus};

const BUILTIN: &str = include_str!("../scenarios/basic.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFixture {
    pub environment_id: String,
    pub organization_id: String,
    pub plan: BillingPlan,
    #[serde(default = "default_true")]
    pub has_project: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenFixture {
    pub survey_id: String,
    pub token: String,
    pub status: TokenStatus,
    #[serde(default)]
    pub email: Option<String>,
}

/// One view request to resolve.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub name: String,
    pub survey: SurveyDescriptor,
    #[serde(default)]
    pub request: RequestContext,
    /// PIN to submit if the case resolves to a PIN challenge
    #[serde(default)]
    pub submit_pin: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub environments: Vec<EnvironmentFixture>,
    #[serde(default)]
    pub response_counts: HashMap<String, u64>,
    #[serde(default)]
    pub tokens: Vec<TokenFixture>,
    pub cases: Vec<Case>,
}

fn default_true() -> bool {
    true
}

impl Scenario {
    pub fn builtin() -> anyhow::Result<Self> {
        serde_json::from_str(BUILTIN).context("parsing built-in scenario")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// In-memory collaborators holding the scenario's fixtures.
    pub fn backend(&self) -> MockBackend {
        let mut backend = MockBackend::new();
        for env in &self.environments {
            backend = backend.with_environment(&env.environment_id, &env.organization_id, env.plan);
            if !env.has_project {
                backend = backend.without_project(&env.environment_id);
            }
        }
        for (survey_id, count) in &self.response_counts {
            backend = backend.with_response_count(survey_id, *count);
        }
        for token in &self.tokens {
            backend = backend.with_token(
                &token.survey_id,
                &token.token,
                token.status,
                token.email.as_deref(),
            );
        }
        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scenario_parses() {
        let scenario = Scenario::builtin().unwrap();
        assert!(!scenario.cases.is_empty());
        assert!(!scenario.environments.is_empty());
    }
}
