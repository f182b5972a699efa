use serde::{Deserialize, Serialize};

use super::repo_types::{Event, RsvpSummary};

#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>, // ISO-8601
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub rsvp_summary: RsvpSummary,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
