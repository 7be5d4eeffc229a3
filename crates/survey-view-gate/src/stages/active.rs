use async_trait::async_trait;
use survey_view_types::{ResolvedOutcome, SurveyStatus};

use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::traits::ViewGate;

/// Gate 3: Active
///
/// Surveys not in progress show their closed message. Previews always pass.
pub struct ActiveGate;

impl ActiveGate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActiveGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewGate for ActiveGate {
    fn gate_name(&self) -> &str {
        "Active"
    }

    fn gate_number(&self) -> u8 {
        3
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let survey = &context.survey;
        if survey.status != SurveyStatus::InProgress && !context.request.is_preview {
            return Ok(GateResult::Resolve(ResolvedOutcome::Inactive {
                status: survey.status,
                message: survey.closed_message.clone(),
            }));
        }
        Ok(GateResult::Continue)
    }
}
