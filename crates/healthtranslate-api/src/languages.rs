/// Languages the translation and provider endpoints can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
    Arabic,
    Urdu,
    Chinese,
    Hindi,
    Portuguese,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "en" => Self::English,
            "es" => Self::Spanish,
            "fr" => Self::French,
            "ar" => Self::Arabic,
            "ur" => Self::Urdu,
            "zh" => Self::Chinese,
            "hi" => Self::Hindi,
            "pt" => Self::Portuguese,
            _ => return None,
        })
    }

    /// Unknown codes read as English.
    pub fn from_code_or_english(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::English)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Arabic => "Arabic",
            Self::Urdu => "Urdu",
            Self::Chinese => "Chinese",
            Self::Hindi => "Hindi",
            Self::Portuguese => "Portuguese",
        }
    }
}

/// Web Speech API locale for a text-to-speech language code.
///
/// Only a subset of the translation languages has browser voices.
pub fn speech_locale(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("en-US"),
        "es" => Some("es-ES"),
        "fr" => Some("fr-FR"),
        "ar" => Some("ar-SA"),
        "ur" => Some("ur-PK"),
        "zh" => Some("zh-CN"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(Language::from_code("hi").map(Language::name), Some("Hindi"));
        assert_eq!(Language::from_code("pt").map(Language::name), Some("Portuguese"));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code("EN"), None);
    }

    #[test]
    fn fallback_is_english() {
        assert_eq!(Language::from_code_or_english("xx"), Language::English);
        assert_eq!(Language::from_code_or_english("ar"), Language::Arabic);
    }

    #[test]
    fn speech_locales() {
        assert_eq!(speech_locale("ur"), Some("ur-PK"));
        assert_eq!(speech_locale("zh"), Some("zh-CN"));
        // Translatable but no browser voice.
        assert_eq!(speech_locale("hi"), None);
    }
}
