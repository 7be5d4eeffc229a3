use serde::{Deserialize, Serialize};

use crate::billing::Project;
use crate::ids::{ContactId, SurveyId};
use crate::locale::LocaleDisplayProvider;
use crate::request::SingleUseResponse;
use crate::survey::{LanguageBinding, SurveyClosedMessage, SurveyStatus};
use crate::verification::VerificationOutcome;

/// Number of offered languages above which the selector hints at scrolling.
pub const SCROLL_HINT_THRESHOLD: usize = 5;

/// Everything the PIN screen and the survey screen need besides the survey itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub project: Project,
    pub survey_domain: String,
    pub webapp_url: String,
    #[serde(default)]
    pub imprint_url: Option<String>,
    #[serde(default)]
    pub privacy_url: Option<String>,
    pub is_cloud: bool,
    pub embed: bool,
    pub is_preview: bool,
    pub locale: String,
    #[serde(default)]
    pub single_use_id: Option<String>,
    #[serde(default)]
    pub single_use_response: Option<SingleUseResponse>,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub recaptcha_site_key: Option<String>,
    pub spam_protection_enabled: bool,
}

/// Languages offered on the "choose language" screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSelection {
    pub enabled_languages: Vec<LanguageBinding>,
}

/// One selectable entry on the language screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
    pub glyph: String,
    pub href: String,
}

impl LanguageSelection {
    pub fn options(&self, display: &dyn LocaleDisplayProvider) -> Vec<LanguageOption> {
        self.enabled_languages
            .iter()
            .map(|binding| {
                let label = display.display(&binding.code);
                LanguageOption {
                    code: binding.code.clone(),
                    name: label.name,
                    glyph: label.glyph,
                    href: format!("?lang={}", binding.code),
                }
            })
            .collect()
    }

    pub fn needs_scroll_hint(&self) -> bool {
        self.enabled_languages.len() > SCROLL_HINT_THRESHOLD
    }
}

/// Payload of the PIN entry screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinChallenge {
    pub survey_id: SurveyId,
    pub language_code: String,
    pub verification: VerificationOutcome,
    pub render: RenderContext,
}

/// Payload of the full survey screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyView {
    pub survey_id: SurveyId,
    pub language_code: String,
    pub verification: VerificationOutcome,
    pub pin_passed: bool,
    /// Present only when the welcome card shows the response count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_count: Option<u64>,
    pub render: RenderContext,
}

/// The single terminal result of a resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolvedOutcome {
    NotFound,
    Inactive {
        status: SurveyStatus,
        message: Option<SurveyClosedMessage>,
    },
    LanguageSelector(LanguageSelection),
    PinChallenge(PinChallenge),
    Survey(SurveyView),
}

impl ResolvedOutcome {
    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedOutcome::NotFound => "notFound",
            ResolvedOutcome::Inactive { .. } => "inactive",
            ResolvedOutcome::LanguageSelector(_) => "languageSelector",
            ResolvedOutcome::PinChallenge(_) => "pinChallenge",
            ResolvedOutcome::Survey(_) => "survey",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolvedOutcome::NotFound)
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self, ResolvedOutcome::Inactive { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::BuiltinLocaleDisplay;

    fn selection(codes: &[&str]) -> LanguageSelection {
        LanguageSelection {
            enabled_languages: codes.iter().map(|c| LanguageBinding::new(*c)).collect(),
        }
    }

    #[test]
    fn options_carry_display_and_link() {
        let options = selection(&["en", "xx"]).options(&BuiltinLocaleDisplay);
        assert_eq!(options[0].name, "English");
        assert_eq!(options[0].href, "?lang=en");
        assert_eq!(options[1].name, "XX");
    }

    #[test]
    fn scroll_hint_above_five_languages() {
        assert!(!selection(&["en", "fr", "de", "es", "ja"]).needs_scroll_hint());
        assert!(selection(&["en", "fr", "de", "es", "ja", "ko"]).needs_scroll_hint());
    }

    #[test]
    fn outcome_is_tagged_by_kind() {
        let json = serde_json::to_value(ResolvedOutcome::Inactive {
            status: SurveyStatus::Paused,
            message: None,
        })
        .unwrap();
        assert_eq!(json["kind"], "inactive");
        assert_eq!(json["status"], "paused");

        let json = serde_json::to_value(ResolvedOutcome::NotFound).unwrap();
        assert_eq!(json["kind"], "notFound");
    }
}
