use super::dto::{CreateRsvpRequest, UpdateRsvpRequest};
use super::repo_types::{GuestChanges, NewGuest};
use crate::error::AppError;
use crate::validation::{is_valid_email, normalize_email, RsvpStatus};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 200;

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("{field} is required"))),
    }
}

fn parse_status(raw: &str) -> Result<RsvpStatus, AppError> {
    raw.parse::<RsvpStatus>()
        .map_err(|e| AppError::validation(e.to_string()))
}

pub fn validate_new_rsvp(req: CreateRsvpRequest) -> Result<NewGuest, AppError> {
    let event_id = req
        .event_id
        .ok_or_else(|| AppError::validation("event_id is required"))?;
    let guest_name = required("guest_name", req.guest_name.as_deref())?;
    let raw_email = required("guest_email", req.guest_email.as_deref())?;

    if guest_name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "guest_name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let guest_email = normalize_email(raw_email);
    if !is_valid_email(&guest_email) || guest_email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation("Invalid email format"));
    }

    // Compared verbatim: " Yes" is not a valid status.
    let rsvp_status = match req.rsvp_status.as_deref() {
        None | Some("") => return Err(AppError::validation("rsvp_status is required")),
        Some(raw) => parse_status(raw)?,
    };

    Ok(NewGuest {
        event_id,
        guest_name: guest_name.to_string(),
        guest_email,
        rsvp_status,
        note_to_host: req.note_to_host.unwrap_or_default(),
    })
}

pub fn validate_rsvp_changes(req: UpdateRsvpRequest) -> Result<GuestChanges, AppError> {
    let rsvp_status = req.rsvp_status.as_deref().map(parse_status).transpose()?;
    Ok(GuestChanges {
        rsvp_status,
        note_to_host: req.note_to_host,
    })
}
