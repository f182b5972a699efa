use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{CreateTaskRequest, UpdateTaskRequest};
use super::repo_types::{NewTask, TaskChanges};
use crate::error::AppError;
use crate::validation::{parse_iso_datetime, TaskPriority};

const MAX_ASSIGNEE_LEN: usize = 100;

fn parse_priority(raw: &str) -> Result<TaskPriority, AppError> {
    raw.parse::<TaskPriority>()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// `""` means "no value"; anything else must be a valid ISO-8601 timestamp.
fn parse_optional_date(raw: &str) -> Result<Option<OffsetDateTime>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_iso_datetime(raw)
        .map(Some)
        .map_err(|e| AppError::validation(e.to_string()))
}

fn clean_assignee(raw: &str) -> Result<Option<String>, AppError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MAX_ASSIGNEE_LEN {
        return Err(AppError::validation(format!(
            "assigned_to must be at most {MAX_ASSIGNEE_LEN} characters"
        )));
    }
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

pub fn validate_new_task(event_id: Uuid, req: CreateTaskRequest) -> Result<NewTask, AppError> {
    let description = req.description.as_deref().map(str::trim).unwrap_or_default();
    if description.is_empty() {
        return Err(AppError::validation("Description is required"));
    }

    let assigned_to = req
        .assigned_to
        .as_deref()
        .map(clean_assignee)
        .transpose()?
        .flatten();
    let due_date = req
        .due_date
        .as_deref()
        .map(parse_optional_date)
        .transpose()?
        .flatten();
    let priority = req
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()?
        .unwrap_or_default();

    Ok(NewTask {
        event_id,
        description: description.to_string(),
        assigned_to,
        due_date,
        priority,
    })
}

pub fn validate_task_changes(req: UpdateTaskRequest) -> Result<TaskChanges, AppError> {
    let description = match req.description.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation("Description cannot be empty")),
        Some(d) => Some(d.to_string()),
        None => None,
    };

    Ok(TaskChanges {
        description,
        completed: req.completed,
        assigned_to: req.assigned_to.as_deref().map(clean_assignee).transpose()?,
        due_date: req.due_date.as_deref().map(parse_optional_date).transpose()?,
        priority: req.priority.as_deref().map(parse_priority).transpose()?,
    })
}

#[cfg(test)]
mod task_validation_tests {
    use super::*;
    use time::macros::datetime;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_defaults() {
        let event_id = Uuid::new_v4();
        let task = validate_new_task(
            event_id,
            CreateTaskRequest {
                description: Some(" Book venue ".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            task,
            NewTask {
                event_id,
                description: "Book venue".into(),
                assigned_to: None,
                due_date: None,
                priority: TaskPriority::Medium,
            }
        );
    }

    #[test]
    fn create_requires_description() {
        for description in [None, Some(""), Some("  ")] {
            let req = CreateTaskRequest {
                description: description.map(String::from),
                ..Default::default()
            };
            assert_eq!(
                message(validate_new_task(Uuid::new_v4(), req).unwrap_err()),
                "Description is required"
            );
        }
    }

    #[test]
    fn create_parses_optional_fields() {
        let task = validate_new_task(
            Uuid::new_v4(),
            CreateTaskRequest {
                description: Some("Order cake".into()),
                assigned_to: Some(" Grace ".into()),
                due_date: Some("2020-05-01T09:00:00Z".into()),
                priority: Some("High".into()),
            },
        )
        .unwrap();
        assert_eq!(task.assigned_to.as_deref(), Some("Grace"));
        // Past due dates are allowed for tasks.
        assert_eq!(task.due_date, Some(datetime!(2020-05-01 09:00:00 UTC)));
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn create_rejects_bad_priority_and_date() {
        let req = CreateTaskRequest {
            description: Some("x".into()),
            priority: Some("high".into()),
            ..Default::default()
        };
        assert_eq!(
            message(validate_new_task(Uuid::new_v4(), req).unwrap_err()),
            "Priority must be one of: High, Medium, Low"
        );

        let req = CreateTaskRequest {
            description: Some("x".into()),
            due_date: Some("someday".into()),
            ..Default::default()
        };
        assert!(message(validate_new_task(Uuid::new_v4(), req).unwrap_err())
            .starts_with("Invalid date format"));
    }

    #[test]
    fn update_distinguishes_absent_from_cleared() {
        let changes = validate_task_changes(UpdateTaskRequest::default()).unwrap();
        assert_eq!(changes, TaskChanges::default());

        let changes = validate_task_changes(UpdateTaskRequest {
            assigned_to: Some("".into()),
            due_date: Some("".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.assigned_to, Some(None));
        assert_eq!(changes.due_date, Some(None));
    }

    #[test]
    fn update_rejects_blank_description() {
        let err = validate_task_changes(UpdateTaskRequest {
            description: Some(" ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(message(err), "Description cannot be empty");
    }
}
