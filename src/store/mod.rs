use sqlx::{Pool, Sqlite};

use crate::calendar;
use crate::error::AppError;
use crate::models::{Event, NewEvent};

/// Durable CRUD over event records. Every mutating call is a single SQL
/// statement, so each one commits or fails as a unit.
#[derive(Clone)]
pub struct EventStore {
    pool: Pool<Sqlite>,
}

impl EventStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let created_at = chrono::Utc::now().naive_utc();

        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (title, description, event_date, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, title, description, event_date, created_at",
        )
        .bind(&new_event.title)
        .bind(&new_event.description)
        .bind(new_event.event_date)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn get(&self, id: i64) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, created_at
             FROM events WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("event {id} does not exist")))?;

        Ok(event)
    }

    /// Overwrites the three mutable fields; `id` and `created_at` never change.
    pub async fn update(&self, id: i64, new_event: NewEvent) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events
             SET title = ?, description = ?, event_date = ?
             WHERE id = ?
             RETURNING id, title, description, event_date, created_at",
        )
        .bind(&new_event.title)
        .bind(&new_event.description)
        .bind(new_event.event_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("event {id} does not exist")))?;

        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("event {id} does not exist")));
        }

        Ok(())
    }

    /// All events, soonest first. Ties on `event_date` break by insertion
    /// order, which ids preserve.
    pub async fn list(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, created_at
             FROM events ORDER BY event_date ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events whose `event_date` falls inside the given calendar month,
    /// queried as the half-open range [1st of month, 1st of next month).
    pub async fn query_by_month(&self, year: i32, month: u32) -> Result<Vec<Event>, AppError> {
        let (start, end) = calendar::month_bounds(year, month)?;

        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, created_at
             FROM events WHERE event_date >= ? AND event_date < ?",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
