use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::validation::TaskPriority;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub event_id: Uuid,
    pub description: String,
    pub completed: bool,
    pub assigned_to: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    pub priority: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub event_id: Uuid,
    pub description: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<OffsetDateTime>,
    pub priority: TaskPriority,
}

/// Outer `None` keeps the column; `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub assigned_to: Option<Option<String>>,
    pub due_date: Option<Option<OffsetDateTime>>,
    pub priority: Option<TaskPriority>,
}
