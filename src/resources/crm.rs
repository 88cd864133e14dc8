//! Clients, their contacts and deals, and the activity feed.

#[cfg(test)]
#[path = "crm_test.rs"]
mod crm_test;

use serde::{Deserialize, Serialize};

use super::{lenient_id, lenient_text, text_or_empty};
use crate::record::RecordId;

/// Pipeline stage of a client account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Prospect,
    Outreached,
    Negotiations,
    Open,
    Closed,
}

impl ClientStatus {
    pub const ALL: [Self; 5] = [Self::Prospect, Self::Outreached, Self::Negotiations, Self::Open, Self::Closed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prospect => "prospect",
            Self::Outreached => "outreached",
            Self::Negotiations => "negotiations",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|status| status.as_str().eq_ignore_ascii_case(raw))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    /// Company name.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub client: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub signed_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub primary_contact: Option<String>,
}

impl Client {
    #[must_use]
    pub fn stage(&self) -> Option<ClientStatus> {
        ClientStatus::parse(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<RecordId>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
}

impl Contact {
    /// "email - phone" line shown under the name.
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("{} - {}", self.email.as_deref().unwrap_or_default(), self.phone.as_deref().unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: RecordId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub contact_id: Option<RecordId>,
    /// Accountable person.
    #[serde(default, deserialize_with = "lenient_id")]
    pub profile_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deal_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: RecordId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

resource! {
    Client => "clients",
    Contact => "contacts",
    Deal => "deals",
    Activity => "activities",
}
