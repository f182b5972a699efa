use time::OffsetDateTime;

use super::dto::{CreateEventRequest, UpdateEventRequest};
use super::repo_types::{EventChanges, NewEvent};
use crate::error::AppError;
use crate::validation::{is_in_future, parse_iso_datetime};

const MAX_TITLE_LEN: usize = 200;
const MAX_LOCATION_LEN: usize = 300;

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Parses `raw` and requires it to be strictly after `now`.
pub fn parse_future_date(raw: &str, now: OffsetDateTime) -> Result<OffsetDateTime, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::validation("Date is required"));
    }
    let date = parse_iso_datetime(raw).map_err(|e| AppError::validation(e.to_string()))?;
    if !is_in_future(date, now) {
        return Err(AppError::validation("Date must be in the future"));
    }
    Ok(date)
}

pub fn validate_new_event(
    req: CreateEventRequest,
    now: OffsetDateTime,
) -> Result<NewEvent, AppError> {
    let title = req.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    check_len("Title", title, MAX_TITLE_LEN)?;

    let raw_date = req.date.as_deref().unwrap_or_default();
    let date = parse_future_date(raw_date, now)?;

    let location = req.location.unwrap_or_default();
    check_len("Location", &location, MAX_LOCATION_LEN)?;

    Ok(NewEvent {
        title: title.to_string(),
        description: req.description.unwrap_or_default(),
        location,
        date,
    })
}

pub fn validate_event_changes(
    req: UpdateEventRequest,
    now: OffsetDateTime,
) -> Result<EventChanges, AppError> {
    let title = match req.title.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation("Title cannot be empty")),
        Some(t) => {
            check_len("Title", t, MAX_TITLE_LEN)?;
            Some(t.to_string())
        }
        None => None,
    };

    if let Some(location) = req.location.as_deref() {
        check_len("Location", location, MAX_LOCATION_LEN)?;
    }

    let date = req
        .date
        .as_deref()
        .map(|raw| parse_future_date(raw, now))
        .transpose()?;

    Ok(EventChanges {
        title,
        description: req.description,
        location: req.location,
        date,
    })
}
