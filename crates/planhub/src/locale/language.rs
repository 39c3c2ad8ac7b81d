//! Supported interface languages.

use std::fmt;
use std::str::FromStr;

use planhub_style::direction::TextDirection;
use serde::{Deserialize, Serialize};

use crate::error::LocaleError;

/// An interface language the hub ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Arabic.
    Ar,
    /// English.
    En,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 2] = [Language::Ar, Language::En];

    /// The language used when no valid preference is stored.
    pub const DEFAULT: Language = Language::Ar;

    /// Two-letter language code.
    pub const fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// Name of the language in the language itself, for switchers.
    pub const fn native_name(self) -> &'static str {
        match self {
            Language::Ar => "العربية",
            Language::En => "English",
        }
    }

    /// Writing direction of the language's script.
    pub fn direction(self) -> TextDirection {
        TextDirection::for_language(self.code())
    }

    /// Returns true if the language is written right-to-left.
    pub fn is_rtl(self) -> bool {
        self.direction().is_rtl()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LocaleError;

    /// Parses a code or locale tag; only the primary subtag is significant,
    /// so `en-US` and `AR_eg` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default();

        match primary.to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            _ => Err(LocaleError::UnsupportedLanguage(s.to_string())),
        }
    }
}
