use serde::{Deserialize, Serialize};

/// Human-facing label for a language code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDisplay {
    pub name: String,
    pub glyph: String,
}

/// Presentation capability mapping language codes to display metadata.
pub trait LocaleDisplayProvider: Send + Sync {
    fn display(&self, code: &str) -> LocaleDisplay;
}

/// Fallback glyph for codes without a known flag.
pub const UNKNOWN_LOCALE_GLYPH: &str = "🌐";

const BUILTIN: &[(&str, &str, &str)] = &[
    ("en", "English", "🇬🇧"),
    ("vi", "Tiếng Việt", "🇻🇳"),
    ("fr", "Français", "🇫🇷"),
    ("de", "Deutsch", "🇩🇪"),
    ("es", "Español", "🇪🇸"),
    ("ja", "日本語", "🇯🇵"),
    ("zh", "中文", "🇨🇳"),
    ("ko", "한국어", "🇰🇷"),
    ("ru", "Русский", "🇷🇺"),
];

/// Static table of common languages. Unknown codes render as the uppercased
/// code with a globe glyph.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLocaleDisplay;

impl LocaleDisplayProvider for BuiltinLocaleDisplay {
    fn display(&self, code: &str) -> LocaleDisplay {
        let lower = code.to_lowercase();
        match BUILTIN.iter().find(|(c, _, _)| *c == lower) {
            Some((_, name, glyph)) => LocaleDisplay {
                name: (*name).to_string(),
                glyph: (*glyph).to_string(),
            },
            None => LocaleDisplay {
                name: code.to_uppercase(),
                glyph: UNKNOWN_LOCALE_GLYPH.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_ignores_case() {
        let display = BuiltinLocaleDisplay.display("FR");
        assert_eq!(display.name, "Français");
        assert_eq!(display.glyph, "🇫🇷");
    }

    #[test]
    fn unknown_code_falls_back() {
        let display = BuiltinLocaleDisplay.display("pt-br");
        assert_eq!(display.name, "PT-BR");
        assert_eq!(display.glyph, UNKNOWN_LOCALE_GLYPH);
    }
}
