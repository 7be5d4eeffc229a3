use std::sync::Arc;

use survey_view_types::{RequestContext, ResolvedOutcome, SurveyDescriptor, SurveyView};
use tracing::{debug, info};

use crate::config::ViewConfig;
use crate::context::{GateResult, GateTrace, ResolutionContext};
use crate::error::ResolutionError;
use crate::stages::{
    unlock_with_pin, ActiveGate, DependencyLookupGate, EntitlementGate, LanguageResolutionGate,
    LanguageSelectionGate, LifecycleGate, PinGate, RenderGate, VerificationGate,
};
use crate::traits::{
    EmailVerificationStore, EntitlementResolver, OrganizationDirectory, ProjectDirectory,
    ResponseCounter, ViewGate,
};

/// Number of gates in the canonical chain.
pub const CANONICAL_GATE_COUNT: u8 = 9;

/// External collaborators consumed by the standard gate chain.
#[derive(Clone)]
pub struct Collaborators {
    pub organizations: Arc<dyn OrganizationDirectory>,
    pub projects: Arc<dyn ProjectDirectory>,
    pub responses: Arc<dyn ResponseCounter>,
    pub verification: Arc<dyn EmailVerificationStore>,
    pub entitlements: Arc<dyn EntitlementResolver>,
}

/// Outcome plus the gates that led to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub outcome: ResolvedOutcome,
    pub trace: Vec<(String, GateTrace)>,
}

/// The Survey View Resolution Pipeline.
///
/// Runs its gates in canonical order and stops at the first one that
/// resolves. Lifecycle and activity always come before language and PIN, so
/// an unavailable survey never reveals its languages or protection.
///
/// The pipeline holds no per-request state: `resolve` takes `&self` and is
/// idempotent for unchanged collaborator state.
pub struct SurveyViewPipeline {
    gates: Vec<Box<dyn ViewGate>>,
    config: Arc<ViewConfig>,
    responses: Option<Arc<dyn ResponseCounter>>,
}

impl SurveyViewPipeline {
    /// Create an empty pipeline. Gates must be added in order 1 through 9.
    pub fn new(config: ViewConfig) -> Self {
        Self {
            gates: Vec::new(),
            config: Arc::new(config),
            responses: None,
        }
    }

    /// Create a pipeline wired with the full canonical gate chain.
    pub fn standard(config: ViewConfig, collaborators: Collaborators) -> Self {
        let mut pipeline = Self::new(config);
        let config = pipeline.config.clone();

        pipeline.add_gate(Box::new(LifecycleGate::new()));
        pipeline.add_gate(Box::new(DependencyLookupGate::new(
            collaborators.organizations,
            collaborators.projects,
        )));
        pipeline.add_gate(Box::new(ActiveGate::new()));
        pipeline.add_gate(Box::new(EntitlementGate::new(collaborators.entitlements)));
        pipeline.add_gate(Box::new(VerificationGate::new(collaborators.verification)));
        pipeline.add_gate(Box::new(LanguageSelectionGate::new()));
        pipeline.add_gate(Box::new(LanguageResolutionGate::new()));
        pipeline.add_gate(Box::new(PinGate::new(config.clone())));
        pipeline.add_gate(Box::new(RenderGate::new(
            collaborators.responses.clone(),
            config,
        )));
        pipeline.responses = Some(collaborators.responses);

        pipeline
    }

    pub fn add_gate(&mut self, gate: Box<dyn ViewGate>) {
        self.gates.push(gate);
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Names of the configured gates, in evaluation order.
    pub fn gate_names(&self) -> Vec<&str> {
        self.gates.iter().map(|g| g.gate_name()).collect()
    }

    /// Refuse to run unless all gates are present in canonical order.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        if self.gates.len() != CANONICAL_GATE_COUNT as usize {
            return Err(ResolutionError::PipelineMisconfigured(format!(
                "expected {} gates, found {}",
                CANONICAL_GATE_COUNT,
                self.gates.len()
            )));
        }
        for (index, gate) in self.gates.iter().enumerate() {
            let expected = index as u8 + 1;
            if gate.gate_number() != expected {
                return Err(ResolutionError::PipelineMisconfigured(format!(
                    "gate '{}' is number {} but sits at position {}",
                    gate.gate_name(),
                    gate.gate_number(),
                    expected
                )));
            }
        }
        Ok(())
    }

    /// Resolve the single outcome for one view request.
    pub async fn resolve(
        &self,
        survey: Arc<SurveyDescriptor>,
        request: RequestContext,
    ) -> Result<ResolvedOutcome, ResolutionError> {
        Ok(self.resolve_traced(survey, request).await?.outcome)
    }

    /// Like [`resolve`](Self::resolve), also returning which gates ran.
    pub async fn resolve_traced(
        &self,
        survey: Arc<SurveyDescriptor>,
        request: RequestContext,
    ) -> Result<Resolution, ResolutionError> {
        self.validate()?;

        let survey_id = survey.id.clone();
        info!(
            survey_id = %survey_id,
            status = %survey.status,
            preview = request.is_preview,
            "Survey view requested"
        );

        let mut context = ResolutionContext::new(survey, request);

        for gate in &self.gates {
            debug!(
                gate = gate.gate_name(),
                number = gate.gate_number(),
                "Evaluating gate"
            );

            let result = gate.evaluate(&mut context).await?;
            context.record_gate(gate.gate_name(), &result);

            if let GateResult::Resolve(outcome) = result {
                info!(
                    survey_id = %survey_id,
                    gate = gate.gate_name(),
                    outcome = outcome.kind(),
                    "Survey view resolved"
                );
                return Ok(Resolution {
                    outcome,
                    trace: context.trace,
                });
            }
        }

        Err(ResolutionError::PipelineMisconfigured(
            "no gate produced an outcome".into(),
        ))
    }

    /// Submit a PIN for a protected survey.
    ///
    /// The request is resolved again against the current survey state, and
    /// only a fresh PIN challenge for this survey can be unlocked. The view is
    /// built from that challenge, so a survey closed since the PIN screen was
    /// shown stays closed. Returns `None` when no challenge is pending or the
    /// PIN does not match.
    pub async fn unlock(
        &self,
        survey: Arc<SurveyDescriptor>,
        request: RequestContext,
        submitted_pin: &str,
    ) -> Result<Option<SurveyView>, ResolutionError> {
        let responses = self.responses.clone().ok_or_else(|| {
            ResolutionError::PipelineMisconfigured("no response counter configured".into())
        })?;

        let resolution = self.resolve_traced(survey.clone(), request).await?;
        let challenge = match resolution.outcome {
            ResolvedOutcome::PinChallenge(challenge) if challenge.survey_id == survey.id => {
                challenge
            }
            other => {
                debug!(
                    survey_id = %survey.id,
                    outcome = other.kind(),
                    "PIN submitted but no challenge is pending"
                );
                return Ok(None);
            }
        };

        let view = unlock_with_pin(challenge, &survey, submitted_pin, responses.as_ref()).await?;
        debug!(survey_id = %survey.id, unlocked = view.is_some(), "PIN submitted");
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockBackend, MockEntitlementResolver};
    use survey_view_types::{BillingPlan, LanguageBinding, SurveyStatus};

    fn setup_pipeline(allow_multi_language: bool) -> (SurveyViewPipeline, Arc<MockBackend>) {
        let backend = Arc::new(
            MockBackend::new()
                .with_environment("e1", "o1", BillingPlan::Scale)
                .with_response_count("s1", 7),
        );
        let entitlements: Arc<dyn EntitlementResolver> = if allow_multi_language {
            Arc::new(MockEntitlementResolver::allow_all())
        } else {
            Arc::new(MockEntitlementResolver::deny_all())
        };
        let pipeline = SurveyViewPipeline::standard(
            ViewConfig::default(),
            backend.clone().collaborators(entitlements),
        );
        (pipeline, backend)
    }

    fn survey() -> SurveyDescriptor {
        SurveyDescriptor::link("s1", "e1")
    }

    #[tokio::test]
    async fn standard_pipeline_is_canonical() {
        let (pipeline, _) = setup_pipeline(true);
        assert!(pipeline.validate().is_ok());
        assert_eq!(
            pipeline.gate_names(),
            vec![
                "Lifecycle",
                "Dependency Lookup",
                "Active",
                "Entitlement",
                "Verification",
                "Language Selection",
                "Language Resolution",
                "PIN",
                "Render",
            ]
        );
    }

    #[tokio::test]
    async fn full_pipeline_renders_survey() {
        let (pipeline, _) = setup_pipeline(true);
        let resolution = pipeline
            .resolve_traced(Arc::new(survey()), RequestContext::default())
            .await
            .unwrap();

        match resolution.outcome {
            ResolvedOutcome::Survey(view) => {
                assert_eq!(view.language_code, "default");
                assert!(view.pin_passed);
            }
            other => panic!("expected survey, got {:?}", other),
        }
        assert_eq!(resolution.trace.len(), 9);
    }

    #[tokio::test]
    async fn draft_stops_before_any_lookup() {
        let (pipeline, backend) = setup_pipeline(true);
        let mut s = survey();
        s.status = SurveyStatus::Draft;

        let resolution = pipeline
            .resolve_traced(Arc::new(s), RequestContext::default())
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolvedOutcome::NotFound);
        assert_eq!(resolution.trace.len(), 1);
        assert_eq!(backend.lookups(), 0);
    }

    #[tokio::test]
    async fn inactive_survey_hides_languages() {
        let (pipeline, _) = setup_pipeline(true);
        let mut s = survey();
        s.status = SurveyStatus::Completed;
        s.languages = vec![
            LanguageBinding::new("en").default_language(),
            LanguageBinding::new("fr"),
        ];
        s.pin = Some("1234".into());

        let outcome = pipeline
            .resolve(Arc::new(s), RequestContext::default())
            .await
            .unwrap();
        assert!(outcome.is_inactive());
    }

    #[tokio::test]
    async fn misordered_pipeline_is_refused() {
        let mut pipeline = SurveyViewPipeline::new(ViewConfig::default());
        pipeline.add_gate(Box::new(ActiveGate::new()));
        pipeline.add_gate(Box::new(LifecycleGate::new()));

        let result = pipeline
            .resolve(Arc::new(survey()), RequestContext::default())
            .await;
        assert!(matches!(
            result,
            Err(ResolutionError::PipelineMisconfigured(_))
        ));
    }

    fn protected_survey() -> SurveyDescriptor {
        let mut s = survey();
        s.pin = Some("1234".into());
        s
    }

    #[tokio::test]
    async fn unlock_with_correct_pin() {
        let (pipeline, _) = setup_pipeline(true);
        let mut s = protected_survey();
        s.welcome_card.show_response_count = true;
        let request = RequestContext::default().with_lang("fr");

        let view = pipeline
            .unlock(Arc::new(s), request, "1234")
            .await
            .unwrap()
            .unwrap();
        assert!(view.pin_passed);
        assert_eq!(view.response_count, Some(7));
    }

    #[tokio::test]
    async fn unlock_with_wrong_pin_stays_locked() {
        let (pipeline, _) = setup_pipeline(true);
        let view = pipeline
            .unlock(Arc::new(protected_survey()), RequestContext::default(), "0000")
            .await
            .unwrap();
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn unlock_on_paused_survey_yields_nothing() {
        let (pipeline, _) = setup_pipeline(true);
        let s = protected_survey();
        let issued = pipeline
            .resolve(Arc::new(s.clone()), RequestContext::default())
            .await
            .unwrap();
        assert!(matches!(issued, ResolvedOutcome::PinChallenge(_)));

        let mut paused = s;
        paused.status = SurveyStatus::Paused;
        let view = pipeline
            .unlock(Arc::new(paused), RequestContext::default(), "1234")
            .await
            .unwrap();
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn unlock_uses_verification_of_current_request() {
        let (pipeline, _) = setup_pipeline(true);
        let mut s = protected_survey();
        s.is_verify_email_enabled = true;

        let view = pipeline
            .unlock(
                Arc::new(s),
                RequestContext::default().with_verify_token("unknown-token"),
                "1234",
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!view.verification.is_verified());
        assert_eq!(view.verification.verified_email, None);
    }

    #[tokio::test]
    async fn unlock_without_pin_protection_yields_nothing() {
        let (pipeline, _) = setup_pipeline(true);
        let view = pipeline
            .unlock(Arc::new(survey()), RequestContext::default(), "1234")
            .await
            .unwrap();
        assert!(view.is_none());
    }
}
