//! DTOs for the todos_sea adapter.

use time::OffsetDateTime;

/// DTO for inserting a new todo row. `priority` and `status` are the raw
/// stored ordinals; the repos layer converts from the typed enums.
#[derive(Debug, Clone)]
pub struct TodoCreate {
    pub title: String,
    pub description: Option<String>,
    pub priority: i32,
    pub status: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// DTO for rewriting every mutable column of an existing row by primary key.
/// `created_at` is immutable and deliberately absent.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: i32,
    pub status: i32,
    pub updated_at: OffsetDateTime,
}
