use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::EventGuest;
use crate::events::repo_types::RsvpSummary;

#[derive(Debug, Default, Deserialize)]
pub struct CreateRsvpRequest {
    pub event_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub rsvp_status: Option<String>,
    pub note_to_host: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRsvpRequest {
    pub rsvp_status: Option<String>,
    pub note_to_host: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventRsvpsResponse {
    pub event_id: Uuid,
    pub event_title: String,
    pub rsvp_summary: RsvpSummary,
    pub rsvps: Vec<EventGuest>,
}
