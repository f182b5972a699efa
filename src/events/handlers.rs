use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::dto::{CreateEventRequest, EventResponse, MessageResponse, UpdateEventRequest};
use super::repo::rsvp_summaries;
use super::repo_types::{Event, RsvpSummary};
use super::services::{validate_event_changes, validate_new_event};
use crate::{
    error::AppError,
    extract::{IdPath, JsonBody},
    state::AppState,
};

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let mut tx = state.db.begin().await?;
    let events = Event::list(&mut *tx).await?;
    let mut summaries = rsvp_summaries(&mut *tx).await?;
    tx.commit().await?;

    let items = events
        .into_iter()
        .map(|event| EventResponse {
            rsvp_summary: summaries.remove(&event.id).unwrap_or_default(),
            event,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let new_event = validate_new_event(payload, OffsetDateTime::now_utc())?;

    let mut tx = state.db.begin().await?;
    let event = Event::create(&mut *tx, &new_event).await?;
    tx.commit().await?;

    info!(event_id = %event.id, title = %event.title, "event created");
    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            event,
            rsvp_summary: RsvpSummary::default(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<EventResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    let event = Event::find(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    let rsvp_summary = Event::rsvp_summary(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(Json(EventResponse {
        event,
        rsvp_summary,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let changes = validate_event_changes(payload, OffsetDateTime::now_utc())?;

    let mut tx = state.db.begin().await?;
    let event = Event::update(&mut *tx, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    let rsvp_summary = Event::rsvp_summary(&mut *tx, id).await?;
    tx.commit().await?;

    info!(event_id = %id, "event updated");
    Ok(Json(EventResponse {
        event,
        rsvp_summary,
    }))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    if !Event::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("Event not found"));
    }
    tx.commit().await?;

    info!(event_id = %id, "event deleted");
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".into(),
    }))
}
