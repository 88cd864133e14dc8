//! Entry forms and their client-side checks.
//!
//! DESIGN
//! ======
//! Each form is checked before anything is sent: every required field that
//! is blank yields one `ValidationError`, all of them reported together.
//! Forms serialize to exactly the columns they set; unset optional fields
//! are omitted so the backend keeps its defaults.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use serde::Serialize;

use super::crm::ClientStatus;
use super::prospects::{Prospect, ProspectStatus};
use crate::provider::{ProviderError, to_record};
use crate::record::{Record, RecordId};

/// One required field left blank.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every problem found in one form.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("form has {} invalid field(s): {}", .0.len(), join_messages(.0))]
pub struct FormErrors(pub Vec<ValidationError>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    fn require(&mut self, field: &'static str, present: bool, message: &'static str) {
        if !present {
            self.0.push(ValidationError { field, message });
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join(", ")
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn filled_opt(value: Option<&str>) -> bool {
    value.is_some_and(filled)
}

/// A form that can be checked and turned into column values.
pub trait Validate: Serialize + Sized {
    /// # Errors
    ///
    /// Returns every required field that is blank.
    fn validate(&self) -> Result<(), FormErrors>;

    /// Column values to send.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Parse` if the form does not serialize to an object.
    fn to_values(&self) -> Result<Record, ProviderError> {
        to_record(self)
    }
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClientForm {
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact: Option<String>,
}

impl ClientForm {
    /// Client pre-filled from a prospect being migrated. The prospect's
    /// pipeline stage only carries over when it names a client status, so
    /// the status usually has to be picked before the form validates.
    #[must_use]
    pub fn from_prospect(prospect: &Prospect) -> Self {
        Self {
            client: prospect.company_name.clone(),
            status: ClientStatus::parse(&prospect.status),
            signed_date: prospect.signed_date.clone(),
            email: prospect.email.clone(),
            phone: prospect.phone.clone(),
            website: prospect.website.clone(),
            primary_contact: prospect.contact_name.clone(),
        }
    }
}

impl Validate for ClientForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("client", filled(&self.client), "Client name is required");
        errors.require("status", self.status.is_some(), "Status is required");
        errors.into_result()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub client_id: Option<RecordId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("client_id", self.client_id.is_some(), "Client ID is required");
        errors.require("name", filled(&self.name), "Name is required");
        errors.into_result()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DealForm {
    pub title: String,
    pub client_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<RecordId>,
    pub amount: Option<String>,
    pub status: String,
    pub deal_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for DealForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("title", filled(&self.title), "Title is required");
        errors.require("client_id", self.client_id.is_some(), "Client is required");
        errors.require("amount", filled_opt(self.amount.as_deref()), "Amount is required");
        errors.require("status", filled(&self.status), "Status is required");
        errors.require("deal_date", filled_opt(self.deal_date.as_deref()), "Deal Date is required");
        errors.into_result()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProspectForm {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub status: Option<ProspectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ProspectForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("company_name", filled(&self.company_name), "Company name is required");
        errors.require("status", self.status.is_some(), "Status is required");
        errors.into_result()
    }
}
