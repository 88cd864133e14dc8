//! Calendar bookings (`cal` resource).
//!
//! The `id` column holds the owner's user id; `cal_id` identifies the
//! booking itself. A `cal_id` of 0 marks a draft that has not been saved.
//!
//! Times are written as RFC 3339. On read, a timestamp without an offset
//! (a `timestamp without time zone` column) is taken as UTC.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Resource, text_or_empty};
use crate::record::RecordId;
use crate::state::LocalId;

pub const DRAFT_ID: i64 = 0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub cal_id: i64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub details: String,
    #[serde(with = "wire_time")]
    pub starttime: OffsetDateTime,
    #[serde(with = "wire_time")]
    pub endtime: OffsetDateTime,
    /// Owner's user id.
    pub id: RecordId,
}

impl Booking {
    /// Unsaved booking for a selected time range.
    #[must_use]
    pub fn draft(owner: RecordId, starttime: OffsetDateTime, endtime: OffsetDateTime) -> Self {
        Self { cal_id: DRAFT_ID, title: String::new(), details: String::new(), starttime, endtime, id: owner }
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.cal_id == DRAFT_ID
    }

    /// Only the owner may edit or delete a booking.
    #[must_use]
    pub fn is_owned_by(&self, user: &RecordId) -> bool {
        &self.id == user
    }

    /// Length in decimal hours; negative ranges count as zero.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        let seconds = (self.endtime - self.starttime).as_seconds_f64();
        seconds.max(0.0) / 3600.0
    }
}

impl LocalId for Booking {
    fn local_id(&self) -> i64 {
        self.cal_id
    }

    fn set_local_id(&mut self, id: i64) {
        self.cal_id = id;
    }
}

impl Resource for Booking {
    const NAME: &'static str = "cal";
}

/// Render decimal hours as `"Xh Ym"`, rounding to the nearest minute.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_hours(decimal_hours: f64) -> String {
    let total_minutes = (decimal_hours.max(0.0) * 60.0).round() as i64;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

mod wire_time {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{OffsetDateTime, PrimitiveDateTime};

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    /// RFC 3339, or `YYYY-MM-DD[T ]hh:mm:ss[.fff]` read as UTC.
    pub(super) fn parse(raw: &str) -> Option<OffsetDateTime> {
        let raw = raw.trim().replacen(' ', "T", 1);
        if let Ok(at) = OffsetDateTime::parse(&raw, &Rfc3339) {
            return Some(at);
        }
        PrimitiveDateTime::parse(&raw, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"))
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    }
}
