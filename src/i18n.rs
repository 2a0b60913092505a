//! Optional translation for the on-screen preview.
//!
//! The rendered PDF and the recovery narrative stay in English; only preview
//! headings and labels go through a `Translator`. Any translator failure
//! falls back to the original text.

use thiserror::Error;

use crate::models::enums::str_enum;

str_enum!(Locale {
    English => "en",
    Hindi => "hi",
    Bengali => "bn",
    Telugu => "te",
    Marathi => "mr",
    Tamil => "ta",
    Gujarati => "gu",
    Urdu => "ur",
    Kannada => "kn",
    Odia => "or",
    Malayalam => "ml",
    Punjabi => "pa",
    Assamese => "as",
    Maithili => "mai",
    Sanskrit => "sa",
    Tulu => "tcy",
});

impl Locale {
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Bengali => "Bengali",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Tamil => "Tamil",
            Self::Gujarati => "Gujarati",
            Self::Urdu => "Urdu",
            Self::Kannada => "Kannada",
            Self::Odia => "Odia",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Assamese => "Assamese",
            Self::Maithili => "Maithili",
            Self::Sanskrit => "Sanskrit",
            Self::Tulu => "Tulu",
        }
    }

    /// Accepts a language code (`hi`) or a display name (`Hindi`), any case.
    pub fn lookup(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.iter().copied().find(|locale| {
            locale.as_str().eq_ignore_ascii_case(needle) || locale.name().eq_ignore_ascii_case(needle)
        })
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::English
    }
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation unavailable for {locale}: {reason}")]
    Unavailable { locale: &'static str, reason: String },
}

/// Translation capability injected into the display layer.
pub trait Translator {
    fn translate(&self, text: &str, locale: Locale) -> Result<String, TranslateError>;
}

/// Returns text unchanged. Default when no translation service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _locale: Locale) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// English passes through; errors fall back to the original text.
pub fn translate_or_original(translator: &dyn Translator, text: &str, locale: Locale) -> String {
    if locale == Locale::English {
        return text.to_string();
    }
    match translator.translate(text, locale) {
        Ok(translated) => translated,
        Err(e) => {
            tracing::debug!(error = %e, "Translation failed, keeping original text");
            text.to_string()
        }
    }
}
