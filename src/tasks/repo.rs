use anyhow::Context;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use super::repo_types::{NewTask, Task, TaskChanges};

const TASK_COLUMNS: &str = "id, event_id, description, completed, assigned_to, due_date, \
                            priority, created_at, updated_at";

impl Task {
    pub async fn find<'e, E>(db: E, id: Uuid) -> anyhow::Result<Option<Task>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let row = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("find task")?;
        Ok(row)
    }

    /// Tasks of one event, newest first, optionally only completed or pending.
    pub async fn list_for_event<'e, E>(
        db: E,
        event_id: Uuid,
        completed: Option<bool>,
    ) -> anyhow::Result<Vec<Task>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            SELECT {TASK_COLUMNS}
              FROM tasks
             WHERE event_id = $1
               AND ($2::boolean IS NULL OR completed = $2)
             ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, Task>(&sql)
            .bind(event_id)
            .bind(completed)
            .fetch_all(db)
            .await
            .context("list tasks for event")?;
        Ok(rows)
    }

    pub async fn create<'e, E>(db: E, new: &NewTask) -> anyhow::Result<Task>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO tasks (event_id, description, assigned_to, due_date, priority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Task>(&sql)
            .bind(new.event_id)
            .bind(&new.description)
            .bind(new.assigned_to.as_deref())
            .bind(new.due_date)
            .bind(new.priority.as_str())
            .fetch_one(db)
            .await
            .context("insert task")?;
        Ok(row)
    }

    pub async fn update<'e, E>(
        db: E,
        id: Uuid,
        changes: &TaskChanges,
    ) -> anyhow::Result<Option<Task>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            UPDATE tasks
               SET description = COALESCE($2, description),
                   completed   = COALESCE($3, completed),
                   assigned_to = CASE WHEN $4 THEN $5 ELSE assigned_to END,
                   due_date    = CASE WHEN $6 THEN $7 ELSE due_date END,
                   priority    = COALESCE($8, priority),
                   updated_at  = now()
             WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(changes.description.as_deref())
            .bind(changes.completed)
            .bind(changes.assigned_to.is_some())
            .bind(changes.assigned_to.clone().flatten())
            .bind(changes.due_date.is_some())
            .bind(changes.due_date.flatten())
            .bind(changes.priority.map(|p| p.as_str()))
            .fetch_optional(db)
            .await
            .context("update task")?;
        Ok(row)
    }

    /// Flips `completed` and bumps `updated_at`.
    pub async fn toggle<'e, E>(db: E, id: Uuid) -> anyhow::Result<Option<Task>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            UPDATE tasks
               SET completed = NOT completed,
                   updated_at = now()
             WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("toggle task")?;
        Ok(row)
    }

    pub async fn delete<'e, E>(db: E, id: Uuid) -> anyhow::Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete task")?;
        Ok(result.rows_affected() > 0)
    }
}
