use async_trait::async_trait;
use survey_view_types::{
    BillingPlan, EnvironmentId, OrganizationId, Project, SurveyId, TokenVerification,
};

use crate::context::{GateResult, ResolutionContext};
use crate::error::{LookupError, ResolutionError};

/// One named step of the resolution pipeline.
///
/// A gate either lets the request continue or resolves it with a terminal
/// outcome. Gates may enrich the context for the gates after them.
#[async_trait]
pub trait ViewGate: Send + Sync {
    fn gate_name(&self) -> &str;

    /// Position in the canonical chain, starting at 1.
    fn gate_number(&self) -> u8;

    async fn evaluate(&self, context: &mut ResolutionContext)
        -> Result<GateResult, ResolutionError>;
}

/// Organization and billing lookups.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    async fn organization_id_for_environment(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<Option<OrganizationId>, LookupError>;

    async fn billing_plan(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Option<BillingPlan>, LookupError>;
}

#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn project_for_environment(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<Option<Project>, LookupError>;
}

#[async_trait]
pub trait ResponseCounter: Send + Sync {
    async fn response_count(&self, survey_id: &SurveyId) -> Result<u64, LookupError>;
}

/// Store of email verification tokens issued for surveys.
#[async_trait]
pub trait EmailVerificationStore: Send + Sync {
    async fn verify_email_token(
        &self,
        survey_id: &SurveyId,
        token: &str,
    ) -> Result<TokenVerification, LookupError>;
}

/// Plan-derived feature permissions.
#[async_trait]
pub trait EntitlementResolver: Send + Sync {
    async fn is_multi_language_allowed(&self, plan: &BillingPlan) -> Result<bool, LookupError>;
}
