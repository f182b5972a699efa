use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{CreateRsvpRequest, EventRsvpsResponse, UpdateRsvpRequest};
use super::repo_types::EventGuest;
use super::services::{validate_new_rsvp, validate_rsvp_changes};
use crate::{
    error::{AppError, DUPLICATE_RSVP},
    events::{dto::MessageResponse, repo_types::Event},
    extract::{IdPath, JsonBody},
    state::AppState,
};

pub fn rsvp_routes() -> Router<AppState> {
    Router::new()
        .route("/rsvps", post(create_rsvp))
        .route(
            "/rsvps/:id",
            get(get_rsvp).patch(update_rsvp).delete(delete_rsvp),
        )
        .route("/events/:id/rsvps", get(list_event_rsvps))
}

#[instrument(skip(state, payload))]
pub async fn create_rsvp(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateRsvpRequest>,
) -> Result<(StatusCode, Json<EventGuest>), AppError> {
    let new_guest = validate_new_rsvp(payload)?;

    let mut tx = state.db.begin().await?;

    if Event::find(&mut *tx, new_guest.event_id).await?.is_none() {
        return Err(AppError::not_found("Event not found"));
    }

    if EventGuest::find_by_email_and_event(&mut *tx, new_guest.event_id, &new_guest.guest_email)
        .await?
        .is_some()
    {
        warn!(event_id = %new_guest.event_id, email = %new_guest.guest_email, "duplicate rsvp");
        return Err(AppError::Conflict(DUPLICATE_RSVP.into()));
    }

    // A concurrent insert that slips past the lookup still hits the unique
    // constraint and comes back as a conflict.
    let guest = EventGuest::create(&mut *tx, &new_guest).await?;
    tx.commit().await?;

    info!(
        rsvp_id = %guest.id,
        event_id = %guest.event_id,
        status = %guest.rsvp_status,
        "rsvp created"
    );
    Ok((StatusCode::CREATED, Json(guest)))
}

#[instrument(skip(state))]
pub async fn get_rsvp(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<EventGuest>, AppError> {
    let guest = EventGuest::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("RSVP not found"))?;
    Ok(Json(guest))
}

#[instrument(skip(state, payload))]
pub async fn update_rsvp(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UpdateRsvpRequest>,
) -> Result<Json<EventGuest>, AppError> {
    let changes = validate_rsvp_changes(payload)?;

    let mut tx = state.db.begin().await?;
    let guest = EventGuest::update(&mut *tx, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("RSVP not found"))?;
    tx.commit().await?;

    info!(rsvp_id = %id, status = %guest.rsvp_status, "rsvp updated");
    Ok(Json(guest))
}

#[instrument(skip(state))]
pub async fn delete_rsvp(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    if !EventGuest::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("RSVP not found"));
    }
    tx.commit().await?;

    info!(rsvp_id = %id, "rsvp deleted");
    Ok(Json(MessageResponse {
        message: "RSVP deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_event_rsvps(
    State(state): State<AppState>,
    IdPath(event_id): IdPath,
) -> Result<Json<EventRsvpsResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    let event = Event::find(&mut *tx, event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    let rsvps = EventGuest::list_for_event(&mut *tx, event_id).await?;
    let rsvp_summary = Event::rsvp_summary(&mut *tx, event_id).await?;
    tx.commit().await?;

    Ok(Json(EventRsvpsResponse {
        event_id: event.id,
        event_title: event.title,
        rsvp_summary,
        rsvps,
    }))
}
