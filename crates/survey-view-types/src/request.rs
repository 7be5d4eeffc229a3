use serde::{Deserialize, Serialize};

use crate::ids::ContactId;

/// Response already bound to a single-use link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUseResponse {
    pub id: String,
    pub finished: bool,
}

/// Per-request input to a resolution. Created fresh per request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Requested language code or alias (`?lang=`)
    #[serde(default)]
    pub lang_param: Option<String>,
    /// Email verification token (`?verify=`)
    #[serde(default)]
    pub verify_token: Option<String>,
    #[serde(default)]
    pub embed: bool,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default)]
    pub single_use_id: Option<String>,
    #[serde(default)]
    pub single_use_response: Option<SingleUseResponse>,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    /// UI locale already negotiated by the transport
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            lang_param: None,
            verify_token: None,
            embed: false,
            is_preview: false,
            single_use_id: None,
            single_use_response: None,
            contact_id: None,
            locale: default_locale(),
        }
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from raw query parameters.
    ///
    /// Recognises `lang`, `verify`, `embed` and `preview`; flags are set only
    /// by the literal value `"true"`. Unknown keys are ignored.
    pub fn from_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut ctx = Self::default();
        for (key, value) in params {
            let value: String = value.into();
            match key.as_ref() {
                "lang" => ctx.lang_param = Some(value),
                "verify" => ctx.verify_token = Some(value),
                "embed" => ctx.embed = value == "true",
                "preview" => ctx.is_preview = value == "true",
                _ => {}
            }
        }
        ctx
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang_param = Some(lang.into());
        self
    }

    pub fn with_verify_token(mut self, token: impl Into<String>) -> Self {
        self.verify_token = Some(token.into());
        self
    }

    pub fn preview(mut self) -> Self {
        self.is_preview = true;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embed = true;
        self
    }
}
