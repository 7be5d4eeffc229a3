use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{EnvironmentId, SurveyId};

/// Survey lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurveyStatus {
    /// Being authored, never publicly visible
    Draft,
    /// Published with a future start
    Scheduled,
    /// Accepting responses
    InProgress,
    /// Temporarily closed by the owner
    Paused,
    /// Closed for good
    Completed,
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Scheduled => "scheduled",
            SurveyStatus::InProgress => "inProgress",
            SurveyStatus::Paused => "paused",
            SurveyStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Delivery channel of a survey. Only link surveys have a public view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurveyType {
    Link,
    App,
}

/// One configured language of a survey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageBinding {
    pub code: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
}

impl LanguageBinding {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            alias: None,
            enabled: true,
            is_default: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn default_language(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Case-insensitive match against the binding's code or alias.
    ///
    /// Folds full Unicode case, so aliases written in any script match.
    pub fn matches(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.code.to_lowercase() == token
            || self
                .alias
                .as_deref()
                .is_some_and(|alias| alias.to_lowercase() == token)
    }
}

/// Message shown when a survey is no longer accepting responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyClosedMessage {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub subheading: Option<String>,
}

impl SurveyClosedMessage {
    pub fn heading(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            subheading: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeCard {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub show_response_count: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaSettings {
    pub enabled: bool,
    /// Minimum acceptable score, 0.1 to 0.9
    pub threshold: f32,
}

/// Violations of the language binding invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageConfigError {
    #[error("more than one default language: {0:?}")]
    MultipleDefaults(Vec<String>),

    #[error("duplicate language code: {0}")]
    DuplicateCode(String),
}

/// Read-only snapshot of a survey, as loaded by the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDescriptor {
    pub id: SurveyId,
    pub environment_id: EnvironmentId,
    #[serde(default)]
    pub name: String,
    pub status: SurveyStatus,
    #[serde(rename = "type")]
    pub survey_type: SurveyType,
    #[serde(default)]
    pub is_verify_email_enabled: bool,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub languages: Vec<LanguageBinding>,
    #[serde(default)]
    pub closed_message: Option<SurveyClosedMessage>,
    #[serde(default)]
    pub welcome_card: WelcomeCard,
    #[serde(default)]
    pub recaptcha: Option<RecaptchaSettings>,
}

impl SurveyDescriptor {
    /// A published, single-language link survey with nothing else configured.
    pub fn link(id: impl Into<String>, environment_id: impl Into<String>) -> Self {
        Self {
            id: SurveyId::new(id),
            environment_id: EnvironmentId::new(environment_id),
            name: String::new(),
            status: SurveyStatus::InProgress,
            survey_type: SurveyType::Link,
            is_verify_email_enabled: false,
            pin: None,
            languages: Vec::new(),
            closed_message: None,
            welcome_card: WelcomeCard::default(),
            recaptcha: None,
        }
    }

    pub fn survey_recaptcha_enabled(&self) -> bool {
        self.recaptcha.as_ref().is_some_and(|r| r.enabled)
    }

    pub fn enabled_languages(&self) -> Vec<LanguageBinding> {
        self.languages.iter().filter(|l| l.enabled).cloned().collect()
    }

    /// Check that at most one binding is the default and codes are unique.
    pub fn validate_languages(&self) -> Result<(), LanguageConfigError> {
        let defaults: Vec<String> = self
            .languages
            .iter()
            .filter(|l| l.is_default)
            .map(|l| l.code.clone())
            .collect();
        if defaults.len() > 1 {
            return Err(LanguageConfigError::MultipleDefaults(defaults));
        }

        let mut seen = std::collections::HashSet::new();
        for binding in &self.languages {
            if !seen.insert(binding.code.to_lowercase()) {
                return Err(LanguageConfigError::DuplicateCode(binding.code.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_code_and_alias_ignoring_case() {
        let fr = LanguageBinding::new("fr").with_alias("FR-ca");
        assert!(fr.matches("FR"));
        assert!(fr.matches("fr-CA"));
        assert!(!fr.matches("de"));
    }

    #[test]
    fn alias_matching_folds_non_ascii_case() {
        let es = LanguageBinding::new("es").with_alias("Español");
        assert!(es.matches("ESPAÑOL"));
        assert!(es.matches("español"));
        assert!(!es.matches("espanol"));
    }

    #[test]
    fn validate_rejects_two_defaults() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.languages = vec![
            LanguageBinding::new("en").default_language(),
            LanguageBinding::new("fr").default_language(),
        ];
        assert!(matches!(
            survey.validate_languages(),
            Err(LanguageConfigError::MultipleDefaults(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_codes() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        survey.languages = vec![LanguageBinding::new("en"), LanguageBinding::new("EN")];
        assert_eq!(
            survey.validate_languages(),
            Err(LanguageConfigError::DuplicateCode("EN".into()))
        );
    }

    #[test]
    fn recaptcha_flag_requires_settings() {
        let mut survey = SurveyDescriptor::link("s1", "e1");
        assert!(!survey.survey_recaptcha_enabled());
        survey.recaptcha = Some(RecaptchaSettings {
            enabled: true,
            threshold: 0.5,
        });
        assert!(survey.survey_recaptcha_enabled());
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "id": "s1",
            "environmentId": "e1",
            "status": "inProgress",
            "type": "link",
            "pin": "1234",
            "languages": [{"code": "en", "enabled": true, "isDefault": true}]
        }"#;
        let survey: SurveyDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(survey.status, SurveyStatus::InProgress);
        assert_eq!(survey.survey_type, SurveyType::Link);
        assert_eq!(survey.pin.as_deref(), Some("1234"));
        assert!(survey.languages[0].is_default);
        assert!(!survey.welcome_card.show_response_count);
    }
}
