use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::validation::RsvpStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated input for a new event row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: OffsetDateTime,
}

/// Columns to overwrite; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<OffsetDateTime>,
}

/// One `GROUP BY event_id, rsvp_status` bucket.
#[derive(Debug, FromRow)]
pub struct StatusCountRow {
    pub event_id: Uuid,
    pub rsvp_status: String,
    pub count: i64,
}

/// RSVP counts for one event, derived from its guest rows on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RsvpSummary {
    pub total: i64,
    pub yes: i64,
    pub no: i64,
    pub maybe: i64,
}

impl RsvpSummary {
    pub fn add(&mut self, status: RsvpStatus, count: i64) {
        match status {
            RsvpStatus::Yes => self.yes += count,
            RsvpStatus::No => self.no += count,
            RsvpStatus::Maybe => self.maybe += count,
        }
        self.total += count;
    }

    /// Folds raw `(status, count)` buckets. Statuses outside the enum are
    /// skipped so that `yes + no + maybe == total` always holds.
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut summary = Self::default();
        for (raw, count) in counts {
            match raw.parse::<RsvpStatus>() {
                Ok(status) => summary.add(status, count),
                Err(_) => warn!(status = %raw, count, "skipping unknown rsvp status"),
            }
        }
        summary
    }
}
