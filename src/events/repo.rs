use std::collections::HashMap;

use anyhow::Context;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use super::repo_types::{Event, EventChanges, NewEvent, RsvpSummary, StatusCountRow};

impl Event {
    /// All events, soonest first.
    pub async fn list<'e, E>(db: E) -> anyhow::Result<Vec<Event>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, date, created_at, updated_at
            FROM events
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
        .context("list events")?;
        Ok(rows)
    }

    pub async fn find<'e, E>(db: E, id: Uuid) -> anyhow::Result<Option<Event>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, location, date, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find event")?;
        Ok(row)
    }

    pub async fn create<'e, E>(db: E, new: &NewEvent) -> anyhow::Result<Event>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, location, date, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.location)
        .bind(new.date)
        .fetch_one(db)
        .await
        .context("insert event")?;
        Ok(row)
    }

    /// Applies `changes` and bumps `updated_at`. `None` when the id is unknown.
    pub async fn update<'e, E>(
        db: E,
        id: Uuid,
        changes: &EventChanges,
    ) -> anyhow::Result<Option<Event>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
               SET title       = COALESCE($2, title),
                   description = COALESCE($3, description),
                   location    = COALESCE($4, location),
                   date        = COALESCE($5, date),
                   updated_at  = now()
             WHERE id = $1
            RETURNING id, title, description, location, date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.date)
        .fetch_optional(db)
        .await
        .context("update event")?;
        Ok(row)
    }

    /// Deletes the event; guests and tasks go with it via `ON DELETE CASCADE`.
    pub async fn delete<'e, E>(db: E, id: Uuid) -> anyhow::Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete event")?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn rsvp_summary<'e, E>(db: E, event_id: Uuid) -> anyhow::Result<RsvpSummary>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, StatusCountRow>(
            r#"
            SELECT event_id, rsvp_status, COUNT(*) AS count
              FROM event_guests
             WHERE event_id = $1
             GROUP BY event_id, rsvp_status
            "#,
        )
        .bind(event_id)
        .fetch_all(db)
        .await
        .context("count rsvps for event")?;

        Ok(RsvpSummary::from_counts(
            rows.iter().map(|r| (r.rsvp_status.as_str(), r.count)),
        ))
    }
}

/// RSVP summaries for every event that has at least one guest.
pub async fn rsvp_summaries<'e, E>(db: E) -> anyhow::Result<HashMap<Uuid, RsvpSummary>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, StatusCountRow>(
        r#"
        SELECT event_id, rsvp_status, COUNT(*) AS count
          FROM event_guests
         GROUP BY event_id, rsvp_status
        "#,
    )
    .fetch_all(db)
    .await
    .context("count rsvps")?;

    let mut grouped: HashMap<Uuid, Vec<(&str, i64)>> = HashMap::new();
    for row in &rows {
        grouped
            .entry(row.event_id)
            .or_default()
            .push((row.rsvp_status.as_str(), row.count));
    }

    Ok(grouped
        .into_iter()
        .map(|(event_id, counts)| (event_id, RsvpSummary::from_counts(counts)))
        .collect())
}
