use std::sync::Arc;

use survey_view_types::{
    BillingPlan, EntitlementResult, OrganizationId, Project, RenderContext, RequestContext,
    ResolvedOutcome, SurveyDescriptor, VerificationOutcome,
};

use crate::config::ViewConfig;
use crate::error::ResolutionError;

/// Result of a single gate evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum GateResult {
    /// Gate passed, continue to the next gate
    Continue,
    /// Gate produced the terminal outcome
    Resolve(ResolvedOutcome),
}

impl GateResult {
    pub fn is_continue(&self) -> bool {
        matches!(self, GateResult::Continue)
    }

    pub fn is_resolve(&self) -> bool {
        matches!(self, GateResult::Resolve(_))
    }
}

/// What a gate did, as recorded in the context trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateTrace {
    Continued,
    /// Resolved with the named outcome kind
    Resolved(&'static str),
}

/// State threaded through the gates of one resolution.
///
/// The survey and request are immutable inputs; every other field starts
/// empty and is filled by the gate that owns it.
pub struct ResolutionContext {
    pub survey: Arc<SurveyDescriptor>,
    pub request: RequestContext,
    /// Set by Dependency Lookup
    pub organization_id: Option<OrganizationId>,
    /// Set by Dependency Lookup
    pub billing_plan: Option<BillingPlan>,
    /// Set by Dependency Lookup
    pub project: Option<Project>,
    /// Set by Entitlement
    pub entitlements: Option<EntitlementResult>,
    /// Set by Verification
    pub verification: Option<VerificationOutcome>,
    /// Set by Language Resolution
    pub language_code: Option<String>,
    /// (gate name, what it did), in evaluation order
    pub trace: Vec<(String, GateTrace)>,
}

impl ResolutionContext {
    pub fn new(survey: Arc<SurveyDescriptor>, request: RequestContext) -> Self {
        Self {
            survey,
            request,
            organization_id: None,
            billing_plan: None,
            project: None,
            entitlements: None,
            verification: None,
            language_code: None,
            trace: Vec::new(),
        }
    }

    pub fn record_gate(&mut self, gate_name: impl Into<String>, result: &GateResult) {
        let trace = match result {
            GateResult::Continue => GateTrace::Continued,
            GateResult::Resolve(outcome) => GateTrace::Resolved(outcome.kind()),
        };
        self.trace.push((gate_name.into(), trace));
    }

    /// Names of the gates evaluated so far.
    pub fn evaluated_gates(&self) -> Vec<&str> {
        self.trace.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn multi_language_allowed(&self) -> bool {
        self.entitlements
            .map(|e| e.multi_language_allowed)
            .unwrap_or(false)
    }

    /// Fetch a value a previous gate should have set.
    pub fn require<'a, T>(
        gate: &str,
        value: Option<&'a T>,
        what: &str,
    ) -> Result<&'a T, ResolutionError> {
        value.ok_or_else(|| ResolutionError::GateFailed {
            gate: gate.to_string(),
            reason: format!("{} not resolved by an earlier gate", what),
        })
    }

    /// Assemble the presentation payload shared by the PIN and survey screens.
    pub fn render_context(
        &self,
        gate: &str,
        config: &ViewConfig,
    ) -> Result<RenderContext, ResolutionError> {
        let project = Self::require(gate, self.project.as_ref(), "project")?;
        Ok(RenderContext {
            project: project.clone(),
            survey_domain: config.survey_domain().to_string(),
            webapp_url: config.webapp_url.clone(),
            imprint_url: config.imprint_url.clone(),
            privacy_url: config.privacy_url.clone(),
            is_cloud: config.is_cloud,
            embed: self.request.embed,
            is_preview: self.request.is_preview,
            locale: self.request.locale.clone(),
            single_use_id: self.request.single_use_id.clone(),
            single_use_response: self.request.single_use_response.clone(),
            contact_id: self.request.contact_id.clone(),
            recaptcha_site_key: config.recaptcha.site_key.clone(),
            spam_protection_enabled: config.is_spam_protection_configured()
                && self.survey.survey_recaptcha_enabled(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_view_types::{EnvironmentId, ProjectId, RecaptchaSettings};

    fn test_context() -> ResolutionContext {
        ResolutionContext::new(
            Arc::new(SurveyDescriptor::link("s1", "e1")),
            RequestContext::default(),
        )
    }

    fn test_project() -> Project {
        Project {
            id: ProjectId::new("p1"),
            name: "Acme".into(),
            environment_id: EnvironmentId::new("e1"),
            organization_id: None,
            link_survey_branding: true,
            logo_url: None,
        }
    }

    #[test]
    fn new_context_is_empty() {
        let ctx = test_context();
        assert!(ctx.trace.is_empty());
        assert!(!ctx.multi_language_allowed());
        assert!(ctx.language_code.is_none());
    }

    #[test]
    fn context_records_gate_results() {
        let mut ctx = test_context();
        ctx.record_gate("Lifecycle", &GateResult::Continue);
        ctx.record_gate("Active", &GateResult::Resolve(ResolvedOutcome::NotFound));

        assert_eq!(ctx.evaluated_gates(), vec!["Lifecycle", "Active"]);
        assert_eq!(ctx.trace[1].1, GateTrace::Resolved("notFound"));
    }

    #[test]
    fn render_context_requires_project() {
        let ctx = test_context();
        let err = ctx.render_context("Render", &ViewConfig::default()).unwrap_err();
        assert!(matches!(err, ResolutionError::GateFailed { .. }));
    }

    #[test]
    fn spam_protection_is_config_and_survey() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.recaptcha = Some(RecaptchaSettings {
            enabled: true,
            threshold: 0.5,
        });
        let mut ctx = ResolutionContext::new(Arc::new(survey), RequestContext::default());
        ctx.project = Some(test_project());

        let mut config = ViewConfig::default();
        let render = ctx.render_context("Render", &config).unwrap();
        assert!(!render.spam_protection_enabled);

        config.recaptcha.site_key = Some("site".into());
        config.recaptcha.secret_key = Some("secret".into());
        let render = ctx.render_context("Render", &config).unwrap();
        assert!(render.spam_protection_enabled);
        assert_eq!(render.recaptcha_site_key.as_deref(), Some("site"));
    }
}
