use std::{borrow::Cow, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::{
    format_description::well_known::Iso8601, Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Lowercased and trimmed, the form guest emails are stored and compared in.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
}

impl RsvpStatus {
    pub const ALL: [RsvpStatus; 3] = [RsvpStatus::Yes, RsvpStatus::No, RsvpStatus::Maybe];

    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "Yes",
            RsvpStatus::No => "No",
            RsvpStatus::Maybe => "Maybe",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("RSVP status must be one of: Yes, No, Maybe")]
pub struct InvalidRsvpStatus;

impl FromStr for RsvpStatus {
    type Err = InvalidRsvpStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case-sensitive on purpose: "yes" is rejected.
        RsvpStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(InvalidRsvpStatus)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Priority must be one of: High, Medium, Low")]
pub struct InvalidTaskPriority;

impl FromStr for TaskPriority {
    type Err = InvalidTaskPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(TaskPriority::High),
            "Medium" => Ok(TaskPriority::Medium),
            "Low" => Ok(TaskPriority::Low),
            _ => Err(InvalidTaskPriority),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid date format '{input}'. Use ISO format (YYYY-MM-DDTHH:MM:SS)")]
pub struct DateParseError {
    pub input: String,
}

/// Parses an ISO-8601 timestamp and normalizes it to UTC.
///
/// Accepts `T` or a single space between date and time, optional fractional
/// seconds and an optional offset (`Z`, `+02:00`). Input without an offset is
/// taken as UTC; a bare calendar date means midnight UTC. The UTC year must
/// fall in 0..=9999 so the value can be written back out as RFC 3339.
pub fn parse_iso_datetime(input: &str) -> Result<OffsetDateTime, DateParseError> {
    let trimmed = input.trim();
    let s: Cow<'_, str> = match trimmed.as_bytes().get(10) {
        Some(b' ') => Cow::Owned(format!("{}T{}", &trimmed[..10], &trimmed[11..])),
        _ => Cow::Borrowed(trimmed),
    };

    let parsed = OffsetDateTime::parse(&s, &Iso8601::DEFAULT)
        .map(|dt| dt.to_offset(UtcOffset::UTC))
        .or_else(|_| PrimitiveDateTime::parse(&s, &Iso8601::DEFAULT).map(|dt| dt.assume_utc()))
        .or_else(|_| Date::parse(&s, &Iso8601::DEFAULT).map(|d| d.midnight().assume_utc()));

    match parsed {
        Ok(dt) if RFC3339_YEARS.contains(&dt.year()) => Ok(dt),
        _ => Err(DateParseError {
            input: input.to_string(),
        }),
    }
}

const RFC3339_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

pub fn is_in_future(date: OffsetDateTime, now: OffsetDateTime) -> bool {
    date > now
}
