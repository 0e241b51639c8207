//! Todo use-case layer: business defaults, partial merge and not-found
//! translation. Knows nothing about HTTP or SQL.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::errors::domain::DomainError;
use crate::repos::todos::{self, NewTodo, Priority, Status, Todo, TodoFilter, TodoPage};

/// Input for [`create_todo`]. No status field: creation always starts a todo
/// in `Pending` regardless of what a caller might want.
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

/// Partial update. `None` leaves the stored field untouched; so does an
/// explicitly empty title or description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

/// List parameters. `page` is 1-based; page 0 is treated as the first page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTodos {
    pub page: u64,
    pub page_size: u64,
    pub filter: TodoFilter,
}

/// Create a todo: force `Pending`, stamp both timestamps with one reading of
/// the clock, persist, and return the record with its store-assigned id.
pub async fn create_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: CreateTodo,
) -> Result<Todo, DomainError> {
    info!(title = %input.title, "create_todo");
    let now = OffsetDateTime::now_utc();

    todos::save(
        conn,
        NewTodo {
            title: input.title,
            description: input.description,
            priority: input.priority.unwrap_or(Priority::Medium),
            status: Status::Pending,
            created_at: now,
            updated_at: now,
        },
    )
    .await
}

pub async fn get_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Todo, DomainError> {
    info!(id, "get_todo");
    find_existing(conn, id).await
}

/// Merge the patch over the stored record and persist the result.
///
/// The find and the conditional write run on the caller's connection; under
/// `with_txn` the pair is atomic, and a row vanishing mid-flight surfaces as
/// not-found from the write itself instead of silently updating nothing.
pub async fn update_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    patch: UpdateTodo,
) -> Result<Todo, DomainError> {
    info!(id, "update_todo");
    let mut existing = find_existing(conn, id).await?;

    apply_patch(&mut existing, patch);
    existing.updated_at = OffsetDateTime::now_utc();

    todos::update(conn, existing).await
}

/// Delete a todo. Existence check and delete are one statement: zero
/// affected rows means the id never resolved (or a concurrent delete won).
pub async fn delete_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    info!(id, "delete_todo");
    let rows = todos::delete(conn, id).await?;
    if rows == 0 {
        return Err(DomainError::todo_not_found(id));
    }
    Ok(())
}

/// Straight pass-through to the repository list.
pub async fn list_todos<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: ListTodos,
) -> Result<TodoPage, DomainError> {
    info!(
        page = query.page,
        page_size = query.page_size,
        "list_todos"
    );
    todos::list(conn, query.page, query.page_size, query.filter).await
}

/// Lookup shared by the get and update paths. Any failure of the find round
/// trip is reported as not-found; callers here cannot distinguish absence
/// from store trouble, matching the service's external contract.
async fn find_existing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Todo, DomainError> {
    match todos::find_by_id(conn, id).await {
        Ok(Some(todo)) => Ok(todo),
        Ok(None) => Err(DomainError::todo_not_found(id)),
        Err(err) => {
            warn!(id, error = %err, "find_by_id failed, reporting not found");
            Err(DomainError::todo_not_found(id))
        }
    }
}

/// Merge rule: `None`, empty title and empty description leave the stored
/// value untouched; everything else overwrites.
fn apply_patch(existing: &mut Todo, patch: UpdateTodo) {
    if let Some(title) = patch.title {
        if !title.is_empty() {
            existing.title = title;
        }
    }
    if let Some(description) = patch.description {
        if !description.is_empty() {
            existing.description = Some(description);
        }
    }
    if let Some(priority) = patch.priority {
        existing.priority = priority;
    }
    if let Some(status) = patch.status {
        existing.status = status;
    }
}
