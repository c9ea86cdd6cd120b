//! Supported interface and advisory languages.

use serde::{Deserialize, Serialize};

/// Closed set of supported language codes. The first variant is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "sw")]
    Kiswahili,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ach")]
    Acholi,
    #[serde(rename = "lug")]
    Luganda,
    #[serde(rename = "madi")]
    Madi,
    #[serde(rename = "run")]
    Runyakitara,
    #[serde(rename = "lum")]
    Lumasaba,
    #[serde(rename = "kup")]
    Kupsabiny,
    #[serde(rename = "ate")]
    Ateso,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Kiswahili,
        Language::French,
        Language::Acholi,
        Language::Luganda,
        Language::Madi,
        Language::Runyakitara,
        Language::Lumasaba,
        Language::Kupsabiny,
        Language::Ateso,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Kiswahili => "sw",
            Language::French => "fr",
            Language::Acholi => "ach",
            Language::Luganda => "lug",
            Language::Madi => "madi",
            Language::Runyakitara => "run",
            Language::Lumasaba => "lum",
            Language::Kupsabiny => "kup",
            Language::Ateso => "ate",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Kiswahili => "Kiswahili",
            Language::French => "French",
            Language::Acholi => "Acholi",
            Language::Luganda => "Luganda",
            Language::Madi => "Madi",
            Language::Runyakitara => "Runyakitara",
            Language::Lumasaba => "Lumasaba",
            Language::Kupsabiny => "Kupsabiny",
            Language::Ateso => "Ateso",
        }
    }

    /// Regional languages the advisor answers in when asked in them.
    #[must_use]
    pub fn is_local(self) -> bool {
        !matches!(self, Language::English | Language::French)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
