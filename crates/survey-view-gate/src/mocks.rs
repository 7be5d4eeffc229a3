use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{
    BillingPlan, EnvironmentId, OrganizationId, Project, ProjectId, SurveyId, TokenStatus,
    TokenVerification,
};

use crate::error::LookupError;
use crate::pipeline::Collaborators;
use crate::traits::{
    EmailVerificationStore, EntitlementResolver, OrganizationDirectory, ProjectDirectory,
    ResponseCounter,
};

/// In-memory backend for testing and demos.
///
/// Implements every data lookup the pipeline consumes and counts how many
/// lookups were issued.
#[derive(Default)]
pub struct MockBackend {
    organizations: HashMap<EnvironmentId, OrganizationId>,
    plans: HashMap<OrganizationId, BillingPlan>,
    projects: HashMap<EnvironmentId, Project>,
    response_counts: HashMap<SurveyId, u64>,
    tokens: HashMap<(SurveyId, String), TokenVerification>,
    failing_verification: Option<LookupError>,
    lookups: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an environment with its organization, plan and project in one go.
    pub fn with_environment(
        mut self,
        environment_id: impl Into<String>,
        organization_id: impl Into<String>,
        plan: BillingPlan,
    ) -> Self {
        let env = EnvironmentId::new(environment_id);
        let org = OrganizationId::new(organization_id);
        let project = Project {
            id: ProjectId::new(format!("prj-{}", env.as_str())),
            name: "Mock Project".into(),
            environment_id: env.clone(),
            organization_id: Some(org.clone()),
            link_survey_branding: true,
            logo_url: None,
        };
        self.organizations.insert(env.clone(), org.clone());
        self.plans.insert(org, plan);
        self.projects.insert(env, project);
        self
    }

    pub fn without_project(mut self, environment_id: &str) -> Self {
        self.projects.remove(&EnvironmentId::new(environment_id));
        self
    }

    pub fn without_billing(mut self, organization_id: &str) -> Self {
        self.plans.remove(&OrganizationId::new(organization_id));
        self
    }

    pub fn with_response_count(mut self, survey_id: &str, count: u64) -> Self {
        self.response_counts.insert(SurveyId::new(survey_id), count);
        self
    }

    pub fn with_token(
        mut self,
        survey_id: &str,
        token: &str,
        status: TokenStatus,
        email: Option<&str>,
    ) -> Self {
        self.tokens.insert(
            (SurveyId::new(survey_id), token.to_string()),
            TokenVerification {
                status,
                email: email.map(str::to_string),
            },
        );
        self
    }

    /// Make every token verification fail with the given error.
    pub fn with_failing_verification(mut self, error: LookupError) -> Self {
        self.failing_verification = Some(error);
        self
    }

    /// Number of lookups served so far, across all traits.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Bundle this backend with an entitlement resolver.
    pub fn collaborators(self: Arc<Self>, entitlements: Arc<dyn EntitlementResolver>) -> Collaborators {
        Collaborators {
            organizations: self.clone(),
            projects: self.clone(),
            responses: self.clone(),
            verification: self,
            entitlements,
        }
    }

    fn count(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrganizationDirectory for MockBackend {
    async fn organization_id_for_environment(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<Option<OrganizationId>, LookupError> {
        self.count();
        Ok(self.organizations.get(environment_id).cloned())
    }

    async fn billing_plan(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Option<BillingPlan>, LookupError> {
        self.count();
        Ok(self.plans.get(organization_id).copied())
    }
}

#[async_trait]
impl ProjectDirectory for MockBackend {
    async fn project_for_environment(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<Option<Project>, LookupError> {
        self.count();
        Ok(self.projects.get(environment_id).cloned())
    }
}

#[async_trait]
impl ResponseCounter for MockBackend {
    async fn response_count(&self, survey_id: &SurveyId) -> Result<u64, LookupError> {
        self.count();
        Ok(self.response_counts.get(survey_id).copied().unwrap_or(0))
    }
}

#[async_trait]
impl EmailVerificationStore for MockBackend {
    async fn verify_email_token(
        &self,
        survey_id: &SurveyId,
        token: &str,
    ) -> Result<TokenVerification, LookupError> {
        self.count();
        if let Some(err) = &self.failing_verification {
            return Err(err.clone());
        }
        Ok(self
            .tokens
            .get(&(survey_id.clone(), token.to_string()))
            .cloned()
            .unwrap_or(TokenVerification {
                status: TokenStatus::Invalid,
                email: None,
            }))
    }
}

/// Mock entitlement resolver with a fixed answer.
pub struct MockEntitlementResolver {
    multi_language: bool,
}

impl MockEntitlementResolver {
    pub fn allow_all() -> Self {
        Self {
            multi_language: true,
        }
    }

    pub fn deny_all() -> Self {
        Self {
            multi_language: false,
        }
    }
}

#[async_trait]
impl EntitlementResolver for MockEntitlementResolver {
    async fn is_multi_language_allowed(&self, _plan: &BillingPlan) -> Result<bool, LookupError> {
        Ok(self.multi_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn backend_serves_registered_environment() {
        let backend = MockBackend::new().with_environment("e1", "o1", BillingPlan::Scale);
        let env = EnvironmentId::new("e1");

        let org = backend.organization_id_for_environment(&env).await.unwrap();
        assert_eq!(org, Some(OrganizationId::new("o1")));
        let plan = backend.billing_plan(&OrganizationId::new("o1")).await.unwrap();
        assert_eq!(plan, Some(BillingPlan::Scale));
        assert!(backend.project_for_environment(&env).await.unwrap().is_some());
        assert_eq!(backend.lookups(), 3);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let backend = MockBackend::new();
        let answer = backend
            .verify_email_token(&SurveyId::new("s1"), "nope")
            .await
            .unwrap();
        assert_eq!(answer.status, TokenStatus::Invalid);
    }

    #[tokio::test]
    async fn mock_entitlements_fixed_answer() {
        let allow = MockEntitlementResolver::allow_all();
        let deny = MockEntitlementResolver::deny_all();
        assert!(allow.is_multi_language_allowed(&BillingPlan::Free).await.unwrap());
        assert!(!deny.is_multi_language_allowed(&BillingPlan::Enterprise).await.unwrap());
    }
}
