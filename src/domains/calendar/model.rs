//! Appointment requests and the normalized booking record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Parse an ISO-8601 date-time into a UTC instant.
///
/// RFC 3339 strings keep their offset. Naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// strings are read as UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!("'{value}' is not an ISO 8601 date-time (expected YYYY-MM-DDTHH:mm:ss.sssZ)")
        })
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a date (expected YYYY-MM-DD)"))
}

/// Render an instant the way Cal.com expects it: UTC with milliseconds.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A new booking for one attendee.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAppointment {
    pub event_type_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAppointment {
    pub booking_id: i64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAppointment {
    pub booking_id: i64,
    pub reason: Option<String>,
}

/// An inclusive date range to enumerate.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAppointments {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// An attendee on a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A booking as returned by Cal.com, trimmed to what gets rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub event_type_id: Option<i64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default, rename = "description")]
    pub notes: Option<String>,
}
