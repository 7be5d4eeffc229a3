use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{BillingPlan, EnvironmentId, OrganizationId, Project};
use tracing::debug;

use crate::context::{GateResult, ResolutionContext};
use crate::error::{Dependency, ResolutionError};
use crate::traits::{OrganizationDirectory, ProjectDirectory, ViewGate};

/// Gate 2: Dependency Lookup
///
/// Loads the organization's billing plan and the project owning the survey's
/// environment. The organization chain and the project lookup run
/// concurrently. A missing record is a data-integrity failure, never an
/// outcome.
pub struct DependencyLookupGate {
    organizations: Arc<dyn OrganizationDirectory>,
    projects: Arc<dyn ProjectDirectory>,
}

impl DependencyLookupGate {
    pub fn new(
        organizations: Arc<dyn OrganizationDirectory>,
        projects: Arc<dyn ProjectDirectory>,
    ) -> Self {
        Self {
            organizations,
            projects,
        }
    }

    async fn organization_plan(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<(OrganizationId, BillingPlan), ResolutionError> {
        let organization_id = self
            .organizations
            .organization_id_for_environment(environment_id)
            .await?
            .ok_or_else(|| ResolutionError::DependencyNotFound {
                dependency: Dependency::Organization,
                id: environment_id.to_string(),
            })?;

        let plan = self
            .organizations
            .billing_plan(&organization_id)
            .await?
            .ok_or_else(|| ResolutionError::DependencyNotFound {
                dependency: Dependency::BillingPlan,
                id: organization_id.to_string(),
            })?;

        Ok((organization_id, plan))
    }

    async fn project(&self, environment_id: &EnvironmentId) -> Result<Project, ResolutionError> {
        self.projects
            .project_for_environment(environment_id)
            .await?
            .ok_or_else(|| ResolutionError::DependencyNotFound {
                dependency: Dependency::Project,
                id: environment_id.to_string(),
            })
    }
}

#[async_trait]
impl ViewGate for DependencyLookupGate {
    fn gate_name(&self) -> &str {
        "Dependency Lookup"
    }

    fn gate_number(&self) -> u8 {
        2
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let environment_id = context.survey.environment_id.clone();

        let ((organization_id, plan), project) = tokio::try_join!(
            self.organization_plan(&environment_id),
            self.project(&environment_id),
        )?;

        debug!(
            organization = %organization_id,
            plan = ?plan,
            project = %project.id,
            "Dependencies resolved"
        );

        context.organization_id = Some(organization_id);
        context.billing_plan = Some(plan);
        context.project = Some(project);

        Ok(GateResult::Continue)
    }
}
