use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a todo.
/// Corresponds to the `todo_status` SQL enum.
///
/// Clients never set this directly: creation forces `Pending` and the update
/// path only touches title and description.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Not done yet. The status every todo starts in.
    Pending,
    /// Done.
    Completed,
}

/// Input structure for creating or updating a todo.
///
/// The same payload serves both paths; status is deliberately absent so a
/// client-supplied status field is ignored at deserialization.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Required, non-empty.
    #[validate(length(min = 1))]
    pub description: String,
}

/// A todo row as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    /// Identifier of the owning user.
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; `None` for live rows. Rows with a marker are
    /// excluded from every list and lookup.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Query parameters accepted by the todo list endpoint.
///
/// All fields are optional; the repository normalizes them into effective
/// values (defaults, allow-listed sort fields) before touching the database.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub status: Option<TodoStatus>,
}
