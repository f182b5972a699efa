use anyhow::Context;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use super::repo_types::{EventGuest, GuestChanges, NewGuest};

impl EventGuest {
    pub async fn find<'e, E>(db: E, id: Uuid) -> anyhow::Result<Option<EventGuest>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, EventGuest>(
            r#"
            SELECT id, event_id, guest_name, guest_email, rsvp_status, note_to_host,
                   created_at, updated_at
              FROM event_guests
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find rsvp")?;
        Ok(row)
    }

    /// Existing RSVP for `guest_email` (already normalized) at `event_id`.
    pub async fn find_by_email_and_event<'e, E>(
        db: E,
        event_id: Uuid,
        guest_email: &str,
    ) -> anyhow::Result<Option<EventGuest>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, EventGuest>(
            r#"
            SELECT id, event_id, guest_name, guest_email, rsvp_status, note_to_host,
                   created_at, updated_at
              FROM event_guests
             WHERE event_id = $1 AND guest_email = $2
            "#,
        )
        .bind(event_id)
        .bind(guest_email)
        .fetch_optional(db)
        .await
        .context("find rsvp by email")?;
        Ok(row)
    }

    pub async fn list_for_event<'e, E>(db: E, event_id: Uuid) -> anyhow::Result<Vec<EventGuest>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, EventGuest>(
            r#"
            SELECT id, event_id, guest_name, guest_email, rsvp_status, note_to_host,
                   created_at, updated_at
              FROM event_guests
             WHERE event_id = $1
             ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(db)
        .await
        .context("list rsvps for event")?;
        Ok(rows)
    }

    /// Inserts the RSVP. A second RSVP for the same (event, email) fails on
    /// the `unique_event_guest_email` constraint.
    pub async fn create<'e, E>(db: E, new: &NewGuest) -> anyhow::Result<EventGuest>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, EventGuest>(
            r#"
            INSERT INTO event_guests (event_id, guest_name, guest_email, rsvp_status, note_to_host)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, guest_name, guest_email, rsvp_status, note_to_host,
                      created_at, updated_at
            "#,
        )
        .bind(new.event_id)
        .bind(&new.guest_name)
        .bind(&new.guest_email)
        .bind(new.rsvp_status.as_str())
        .bind(&new.note_to_host)
        .fetch_one(db)
        .await
        .context("insert rsvp")?;
        Ok(row)
    }

    pub async fn update<'e, E>(
        db: E,
        id: Uuid,
        changes: &GuestChanges,
    ) -> anyhow::Result<Option<EventGuest>>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, EventGuest>(
            r#"
            UPDATE event_guests
               SET rsvp_status  = COALESCE($2, rsvp_status),
                   note_to_host = COALESCE($3, note_to_host),
                   updated_at   = now()
             WHERE id = $1
            RETURNING id, event_id, guest_name, guest_email, rsvp_status, note_to_host,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.rsvp_status.map(|s| s.as_str()))
        .bind(changes.note_to_host.as_deref())
        .fetch_optional(db)
        .await
        .context("update rsvp")?;
        Ok(row)
    }

    pub async fn delete<'e, E>(db: E, id: Uuid) -> anyhow::Result<bool>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM event_guests WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete rsvp")?;
        Ok(result.rows_affected() > 0)
    }
}
