//! Closed enumeration of supported locale codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ProtocolError;

/// Supported languages for transcription and translation.
///
/// This is a closed set: a locale code outside it is a hard
/// [`ProtocolError::UnknownLanguage`] failure, since routing a transcript
/// under the wrong language would corrupt everything downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Spanish
    Es,
    /// French
    Fr,
    /// German
    De,
    /// Italian
    It,
    /// Portuguese
    Pt,
    /// Dutch
    Nl,
    /// Polish
    Pl,
    /// Russian
    Ru,
    /// Ukrainian
    Uk,
    /// Turkish
    Tr,
    /// Arabic
    Ar,
    /// Hindi
    Hi,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// Chinese
    Zh,
}

impl Language {
    /// The wire-format locale code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Nl => "nl",
            Language::Pl => "pl",
            Language::Ru => "ru",
            Language::Uk => "uk",
            Language::Tr => "tr",
            Language::Ar => "ar",
            Language::Hi => "hi",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            "it" => Ok(Language::It),
            "pt" => Ok(Language::Pt),
            "nl" => Ok(Language::Nl),
            "pl" => Ok(Language::Pl),
            "ru" => Ok(Language::Ru),
            "uk" => Ok(Language::Uk),
            "tr" => Ok(Language::Tr),
            "ar" => Ok(Language::Ar),
            "hi" => Ok(Language::Hi),
            "ja" => Ok(Language::Ja),
            "ko" => Ok(Language::Ko),
            "zh" => Ok(Language::Zh),
            _ => Err(ProtocolError::UnknownLanguage(s.to_string())),
        }
    }
}
