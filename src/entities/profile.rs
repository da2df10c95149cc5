use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganFunction {
    Normal,
    Impaired,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub number: String,
}

/// Health profile supplied by the caller. The engine only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Numeric string as typed into the profile form.
    pub age: String,
    pub gender: Gender,
    pub kidney_function: OrganFunction,
    pub liver_function: OrganFunction,
    /// Comma-separated free text.
    pub current_meds: String,
    pub contacts: [EmergencyContact; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_fda_key: Option<String>,
}

impl UserProfile {
    /// Leading digits of `age`, or 0 when there are none.
    pub fn age_years(&self) -> u32 {
        let digits: String = self
            .age
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }

    pub fn is_childbearing_age(&self) -> bool {
        self.gender == Gender::Female && (18..=50).contains(&self.age_years())
    }

    /// Lowercased, trimmed, non-empty entries of `current_meds`.
    pub fn medication_list(&self) -> Vec<String> {
        self.current_meds
            .split(',')
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    }

    pub fn openfda_key(&self) -> Option<&str> {
        self.open_fda_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Interface languages the presentation layer offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Hi,
    Te,
    Ta,
    Kn,
    Ml,
    Mr,
    Gu,
    Pa,
    Bn,
    Ur,
    Or,
    As,
    Mai,
    Sat,
    Ks,
    Ne,
    Kok,
    Sd,
    Doi,
    Mni,
    Bo,
    Sa,
}

impl Language {
    pub const ALL: [Language; 24] = [
        Language::En,
        Language::Es,
        Language::Hi,
        Language::Te,
        Language::Ta,
        Language::Kn,
        Language::Ml,
        Language::Mr,
        Language::Gu,
        Language::Pa,
        Language::Bn,
        Language::Ur,
        Language::Or,
        Language::As,
        Language::Mai,
        Language::Sat,
        Language::Ks,
        Language::Ne,
        Language::Kok,
        Language::Sd,
        Language::Doi,
        Language::Mni,
        Language::Bo,
        Language::Sa,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Kn => "kn",
            Language::Ml => "ml",
            Language::Mr => "mr",
            Language::Gu => "gu",
            Language::Pa => "pa",
            Language::Bn => "bn",
            Language::Ur => "ur",
            Language::Or => "or",
            Language::As => "as",
            Language::Mai => "mai",
            Language::Sat => "sat",
            Language::Ks => "ks",
            Language::Ne => "ne",
            Language::Kok => "kok",
            Language::Sd => "sd",
            Language::Doi => "doi",
            Language::Mni => "mni",
            Language::Bo => "bo",
            Language::Sa => "sa",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Unknown codes fall back to English.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}
