use async_trait::async_trait;
use survey_view_types::{ResolvedOutcome, SurveyStatus, SurveyType};

use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::traits::ViewGate;

/// Gate 1: Lifecycle
///
/// Drafts and non-link surveys have no public view. Runs before any lookup so
/// nothing about such a survey is fetched or revealed.
pub struct LifecycleGate;

impl LifecycleGate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LifecycleGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewGate for LifecycleGate {
    fn gate_name(&self) -> &str {
        "Lifecycle"
    }

    fn gate_number(&self) -> u8 {
        1
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let survey = &context.survey;
        if survey.status == SurveyStatus::Draft || survey.survey_type != SurveyType::Link {
            return Ok(GateResult::Resolve(ResolvedOutcome::NotFound));
        }
        Ok(GateResult::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use survey_view_types::{RequestContext, SurveyDescriptor};

    async fn evaluate(survey: SurveyDescriptor) -> GateResult {
        let mut ctx = ResolutionContext::new(Arc::new(survey), RequestContext::default());
        LifecycleGate::new().evaluate(&mut ctx).await.unwrap()
    }

    #[tokio::test]
    async fn draft_is_not_found() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.status = SurveyStatus::Draft;
        assert_eq!(evaluate(survey).await, GateResult::Resolve(ResolvedOutcome::NotFound));
    }

    #[tokio::test]
    async fn app_survey_is_not_found() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.survey_type = SurveyType::App;
        assert_eq!(evaluate(survey).await, GateResult::Resolve(ResolvedOutcome::NotFound));
    }

    #[tokio::test]
    async fn paused_link_survey_continues() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.status = SurveyStatus::Paused;
        assert!(evaluate(survey).await.is_continue());
    }
}
