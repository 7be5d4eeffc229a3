use std::sync::Arc;

use async_trait::async_trait;
use survey_view_types::{SurveyDescriptor, TokenStatus, VerificationOutcome};
use tracing::warn;

use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::traits::{EmailVerificationStore, ViewGate};

/// Gate 5: Verification
///
/// Computes the email verification state of the request. Never terminates the
/// chain; the outcome is carried to the PIN and survey screens.
pub struct VerificationGate {
    store: Arc<dyn EmailVerificationStore>,
}

impl VerificationGate {
    pub fn new(store: Arc<dyn EmailVerificationStore>) -> Self {
        Self { store }
    }

    /// Resolve the verification outcome for a survey and an optional token.
    ///
    /// A store failure is reported once as `Invalid`; there are no retries.
    pub async fn verify(&self, survey: &SurveyDescriptor, token: Option<&str>) -> VerificationOutcome {
        if !survey.is_verify_email_enabled {
            return VerificationOutcome::not_required();
        }
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return VerificationOutcome::not_attempted(),
        };

        match self.store.verify_email_token(&survey.id, token).await {
            Ok(answer) => match (answer.status, answer.email) {
                (TokenStatus::Verified, Some(email)) => VerificationOutcome::verified(email),
                (TokenStatus::Verified, None) => {
                    warn!(survey_id = %survey.id, "Verified token without email");
                    VerificationOutcome::invalid()
                }
                (TokenStatus::Expired, _) => VerificationOutcome::expired(),
                (TokenStatus::Invalid, _) => VerificationOutcome::invalid(),
            },
            Err(e) => {
                warn!(survey_id = %survey.id, error = %e, "Email verification lookup failed");
                VerificationOutcome::invalid()
            }
        }
    }
}

#[async_trait]
impl ViewGate for VerificationGate {
    fn gate_name(&self) -> &str {
        "Verification"
    }

    fn gate_number(&self) -> u8 {
        5
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let outcome = self
            .verify(&context.survey, context.request.verify_token.as_deref())
            .await;
        context.verification = Some(outcome);
        Ok(GateResult::Continue)
    }
}
