use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{PinChallenge, ResolvedOutcome, SurveyDescriptor, SurveyView};

use crate::config::ViewConfig;
use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::stages::render::response_count_for;
use crate::traits::{ResponseCounter, ViewGate};

/// Whether the survey is PIN protected. An empty PIN counts as none.
pub fn requires_pin(survey: &SurveyDescriptor) -> bool {
    survey.pin.as_deref().is_some_and(|pin| !pin.is_empty())
}

/// Check a submitted PIN against a challenge and, on a match, produce the
/// survey view the challenge was guarding.
///
/// The challenge must come from a resolution of `survey` made for this
/// submission. Plain comparison only: attempts are neither counted nor
/// locked out.
pub(crate) async fn unlock_with_pin(
    challenge: PinChallenge,
    survey: &SurveyDescriptor,
    submitted: &str,
    responses: &dyn ResponseCounter,
) -> Result<Option<SurveyView>, ResolutionError> {
    if challenge.survey_id != survey.id || survey.pin.as_deref() != Some(submitted) {
        return Ok(None);
    }
    let response_count = response_count_for(survey, responses).await?;
    Ok(Some(SurveyView {
        survey_id: challenge.survey_id,
        language_code: challenge.language_code,
        verification: challenge.verification,
        pin_passed: true,
        response_count,
        render: challenge.render,
    }))
}

/// Gate 8: PIN
///
/// Interposes the PIN screen in front of protected surveys. Runs after
/// language resolution so the PIN screen is already localized.
pub struct PinGate {
    config: Arc<ViewConfig>,
}

impl PinGate {
    pub fn new(config: Arc<ViewConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ViewGate for PinGate {
    fn gate_name(&self) -> &str {
        "PIN"
    }

    fn gate_number(&self) -> u8 {
        8
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        if !requires_pin(&context.survey) {
            return Ok(GateResult::Continue);
        }

        let gate = self.gate_name();
        let language_code =
            ResolutionContext::require(gate, context.language_code.as_ref(), "language code")?
                .clone();
        let verification =
            ResolutionContext::require(gate, context.verification.as_ref(), "verification")?
                .clone();
        let render = context.render_context(gate, &self.config)?;

        Ok(GateResult::Resolve(ResolvedOutcome::PinChallenge(
            PinChallenge {
                survey_id: context.survey.id.clone(),
                language_code,
                verification,
                render,
            },
        )))
    }
}
