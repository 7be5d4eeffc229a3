use async_trait::async_trait;
use survey_view_types::{LanguageBinding, LanguageSelection, ResolvedOutcome, DEFAULT_LANGUAGE};
use tracing::warn;

use crate::context::{GateResult, ResolutionContext};
use crate::error::ResolutionError;
use crate::traits::ViewGate;

/// Resolve the concrete language to render.
///
/// Returns `"default"` unless multi-language is allowed and `lang_param`
/// names (by code or alias, ignoring case) an enabled, non-default binding.
/// An explicitly requested default language collapses to `"default"` too.
pub fn resolve_language_code(
    languages: &[LanguageBinding],
    lang_param: Option<&str>,
    multi_language_allowed: bool,
) -> String {
    let lang = match lang_param {
        Some(l) if !l.is_empty() && multi_language_allowed => l,
        _ => return DEFAULT_LANGUAGE.to_string(),
    };

    match languages.iter().find(|binding| binding.matches(lang)) {
        Some(binding) if binding.enabled && !binding.is_default => binding.code.clone(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Whether the request has not picked a language yet.
fn no_selection(lang_param: Option<&str>) -> bool {
    match lang_param {
        None => true,
        Some(l) => l.is_empty() || l == DEFAULT_LANGUAGE,
    }
}

/// Gate 6: Language Selection
///
/// When the plan allows several languages and the survey has more than one,
/// force an explicit choice before any protected content is reachable.
pub struct LanguageSelectionGate;

impl LanguageSelectionGate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LanguageSelectionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewGate for LanguageSelectionGate {
    fn gate_name(&self) -> &str {
        "Language Selection"
    }

    fn gate_number(&self) -> u8 {
        6
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let survey = &context.survey;
        if let Err(e) = survey.validate_languages() {
            // First matching binding still wins during resolution.
            warn!(survey_id = %survey.id, error = %e, "Survey language bindings are inconsistent");
        }

        if context.multi_language_allowed()
            && survey.languages.len() > 1
            && no_selection(context.request.lang_param.as_deref())
        {
            return Ok(GateResult::Resolve(ResolvedOutcome::LanguageSelector(
                LanguageSelection {
                    enabled_languages: survey.enabled_languages(),
                },
            )));
        }
        Ok(GateResult::Continue)
    }
}

/// Gate 7: Language Resolution
pub struct LanguageResolutionGate;

impl LanguageResolutionGate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LanguageResolutionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewGate for LanguageResolutionGate {
    fn gate_name(&self) -> &str {
        "Language Resolution"
    }

    fn gate_number(&self) -> u8 {
        7
    }

    async fn evaluate(
        &self,
        context: &mut ResolutionContext,
    ) -> Result<GateResult, ResolutionError> {
        let code = resolve_language_code(
            &context.survey.languages,
            context.request.lang_param.as_deref(),
            context.multi_language_allowed(),
        );
        context.language_code = Some(code);
        Ok(GateResult::Continue)
    }
}
