use serde::{Deserialize, Serialize};

/// reCAPTCHA keys of the deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecaptchaConfig {
    #[serde(default)]
    pub site_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Deployment-wide values threaded into every resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Base URL of the web app
    #[serde(default = "default_webapp_url")]
    pub webapp_url: String,

    /// Public domain survey links are served from (falls back to `webapp_url`)
    #[serde(default)]
    pub survey_domain: Option<String>,

    #[serde(default)]
    pub imprint_url: Option<String>,

    #[serde(default)]
    pub privacy_url: Option<String>,

    /// Hosted (cloud) deployment rather than self-hosted
    #[serde(default)]
    pub is_cloud: bool,

    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            webapp_url: default_webapp_url(),
            survey_domain: None,
            imprint_url: None,
            privacy_url: None,
            is_cloud: false,
            recaptcha: RecaptchaConfig::default(),
        }
    }
}

fn default_webapp_url() -> String {
    "http://localhost:3000".to_string()
}

impl ViewConfig {
    /// Spam protection is usable only when both reCAPTCHA keys are set.
    pub fn is_spam_protection_configured(&self) -> bool {
        let set = |k: &Option<String>| k.as_deref().is_some_and(|v| !v.is_empty());
        set(&self.recaptcha.site_key) && set(&self.recaptcha.secret_key)
    }

    pub fn survey_domain(&self) -> &str {
        self.survey_domain.as_deref().unwrap_or(&self.webapp_url)
    }
}
