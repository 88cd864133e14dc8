//! Typed rows for the admin resources, plus their entry forms.
//!
//! DESIGN
//! ======
//! The backend owns every schema; these types name only the fields the
//! pages read. Loose columns (amounts stored as text in one table and as
//! numbers in another, nullable text) deserialize through the lenient
//! helpers below so one odd row cannot fail a whole list.

/// Bind typed rows to their resource name and expose their `id` column.
macro_rules! resource {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl $crate::resources::Resource for $ty {
                const NAME: &'static str = $name;
            }

            impl $crate::record::HasId for $ty {
                fn record_id(&self) -> $crate::record::RecordId {
                    self.id.clone()
                }
            }
        )*
    };
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod booking;
pub mod crm;
pub mod ledger;
pub mod profile;
pub mod prospects;
pub mod validate;

pub use booking::{Booking, format_hours};
pub use crm::{Activity, Client, ClientStatus, Contact, Deal};
pub use ledger::{LedgerEntry, TransactionSource};
pub use profile::{ArchiveView, Note, Profile, Task};
pub use prospects::{Prospect, ProspectStatus};
pub use validate::{ClientForm, ContactForm, DealForm, FormErrors, ProspectForm, Validate, ValidationError};

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::record::RecordId;

/// A typed row bound to one backend resource.
pub trait Resource: DeserializeOwned {
    const NAME: &'static str;
}

/// Accept text, numbers, booleans, or null as optional display text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(_) => Err(D::Error::custom("expected text or scalar")),
    }
}

/// Like `lenient_text` but null reads as the empty string.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Foreign key that may be null, empty, or missing.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(RecordId::from_value))
}

/// Non-empty, trimmed display text or `fallback`.
#[must_use]
pub fn display_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}
