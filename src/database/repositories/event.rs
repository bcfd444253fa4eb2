//! Event repository implementation

use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use uuid::Uuid;
use crate::models::event::{Event, CreateEventRequest};
use crate::utils::errors::SignMeUpError;

const EVENT_COLUMNS: &str =
    "id, name, date_time, location, group_size_limit, max_participants, created_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, SignMeUpError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, name, date_time, location, group_size_limit, max_participants, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.date_time)
        .bind(request.location.trim())
        .bind(request.group_size_limit)
        .bind(request.max_participants)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, SignMeUpError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List events, most recent date first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, SignMeUpError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date_time DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Delete an event; its groups and members cascade
    pub async fn delete(&self, id: Uuid) -> Result<bool, SignMeUpError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Load an event and hold its row lock until the surrounding transaction ends.
    /// Concurrent roster changes for the same event queue behind this lock.
    pub async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Event>, SignMeUpError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(event)
    }

    /// Count members across all groups of an event, optionally ignoring one group
    pub async fn count_participants(
        &self,
        conn: &mut PgConnection,
        event_id: Uuid,
        excluding_group: Option<i64>,
    ) -> Result<i64, SignMeUpError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(m.id)
            FROM group_members m
            JOIN groups g ON g.id = m.group_id
            WHERE g.event_id = $1
              AND ($2::BIGINT IS NULL OR g.id <> $2)
            "#
        )
        .bind(event_id)
        .bind(excluding_group)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count)
    }
}
