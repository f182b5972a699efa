use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::validation::RsvpStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventGuest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub rsvp_status: String,
    pub note_to_host: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGuest {
    pub event_id: Uuid,
    pub guest_name: String,
    pub guest_email: String, // normalized
    pub rsvp_status: RsvpStatus,
    pub note_to_host: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestChanges {
    pub rsvp_status: Option<RsvpStatus>,
    pub note_to_host: Option<String>,
}
