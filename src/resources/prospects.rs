//! Sales prospects and their eight-stage pipeline.

#[cfg(test)]
#[path = "prospects_test.rs"]
mod prospects_test;

use serde::{Deserialize, Serialize};

use super::{lenient_text, text_or_empty};
use crate::record::RecordId;

/// Pipeline stage. Stored values carry their ordinal prefix; the
/// negotiations stage is stored as "7. negotitions".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProspectStatus {
    #[serde(rename = "1. new")]
    New,
    #[serde(rename = "2. contacted")]
    Contacted,
    #[serde(rename = "3. engaged")]
    Engaged,
    #[serde(rename = "4. interested")]
    Interested,
    #[serde(rename = "5. salescall")]
    SalesCall,
    #[serde(rename = "6. qualified")]
    Qualified,
    #[serde(rename = "7. negotitions")]
    Negotiations,
    #[serde(rename = "8. signed", alias = "8. Signed")]
    Signed,
}

impl ProspectStatus {
    pub const ALL: [Self; 8] = [
        Self::New,
        Self::Contacted,
        Self::Engaged,
        Self::Interested,
        Self::SalesCall,
        Self::Qualified,
        Self::Negotiations,
        Self::Signed,
    ];

    /// Stored form, e.g. `"3. engaged"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "1. new",
            Self::Contacted => "2. contacted",
            Self::Engaged => "3. engaged",
            Self::Interested => "4. interested",
            Self::SalesCall => "5. salescall",
            Self::Qualified => "6. qualified",
            Self::Negotiations => "7. negotitions",
            Self::Signed => "8. signed",
        }
    }

    /// Accepts the stored form in any case, or the bare stage number.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|status| {
            let stored = status.as_str();
            stored.eq_ignore_ascii_case(raw) || stored.split('.').next() == Some(raw)
        })
    }
}

impl std::fmt::Display for ProspectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: RecordId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub signed_date: Option<String>,
    #[serde(default)]
    pub is_migrated: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub converted_at: Option<String>,
}

impl Prospect {
    #[must_use]
    pub fn stage(&self) -> Option<ProspectStatus> {
        ProspectStatus::parse(&self.status)
    }
}

resource! {
    Prospect => "prospects",
}
