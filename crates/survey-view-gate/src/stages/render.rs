use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{ResolvedOutcome, SurveyDescriptor, SurveyView};

use crate::config::ViewConfig;
use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::traits::{ResponseCounter, ViewGate};

/// Response count to show on the welcome card, if the card asks for it.
pub async fn response_count_for(
    survey: &SurveyDescriptor,
    responses: &dyn ResponseCounter,
) -> Result<Option<u64>, ResolutionError> {
    if !survey.welcome_card.show_response_count {
        return Ok(None);
    }
    Ok(Some(responses.response_count(&survey.id).await?))
}

/// Gate 9: Render
///
/// Terminal gate. Every request reaching it renders the full survey.
pub struct RenderGate {
    responses: Arc<dyn ResponseCounter>,
    config: Arc<ViewConfig>,
}

impl RenderGate {
    pub fn new(responses: Arc<dyn ResponseCounter>, config: Arc<ViewConfig>) -> Self {
        Self { responses, config }
    }
}

#[async_trait]
impl ViewGate for RenderGate {
    fn gate_name(&self) -> &str {
        "Render"
    }

    fn gate_number(&self) -> u8 {
        9
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let gate = self.gate_name();
        let language_code =
            ResolutionContext::require(gate, context.language_code.as_ref(), "language code")?
                .clone();
        let verification =
            ResolutionContext::require(gate, context.verification.as_ref(), "verification")?
                .clone();
        let render = context.render_context(gate, &self.config)?;
        let response_count = response_count_for(&context.survey, self.responses.as_ref()).await?;

        Ok(GateResult::Resolve(ResolvedOutcome::Survey(SurveyView {
            survey_id: context.survey.id.clone(),
            language_code,
            verification,
            pin_passed: true,
            response_count,
            render,
        })))
    }
}
