use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
}

/// Empty `assigned_to` / `due_date` strings clear those fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub completed: Option<bool>,
}
