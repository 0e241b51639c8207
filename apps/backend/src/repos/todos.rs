//! Todo repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::todos_sea as todos_adapter;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Todo priority. Persisted as small-integer ordinals (LOW=1, MEDIUM=2,
/// HIGH=3); "no filter"/"no change" is expressed as `Option<Priority>` at
/// the boundaries, never as a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const fn as_db(&self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn from_db(value: i32, todo_id: i64) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("invalid priority ordinal {other} stored for todo id={todo_id}"),
            )),
        }
    }
}

/// Todo lifecycle state. Same storage convention as [`Priority`]
/// (PENDING=1, IN_PROGRESS=2, DONE=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Done,
}

impl Status {
    pub const fn as_db(&self) -> i32 {
        match self {
            Self::Pending => 1,
            Self::InProgress => 2,
            Self::Done => 3,
        }
    }

    pub fn from_db(value: i32, todo_id: i64) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Pending),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Done),
            other => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("invalid status ordinal {other} stored for todo id={todo_id}"),
            )),
        }
    }
}

/// Todo domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Field set persisted by [`save`]. The use-case layer owns status defaulting
/// and timestamps; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Optional equality predicates for [`list`]; `None` means no filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TodoFilter {
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

/// One page of todos plus the total row count under the same predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: u64,
}

// Free functions (generic) forming the repository contract

/// Insert a new row and read back the store-assigned identity.
pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    todo: NewTodo,
) -> Result<Todo, DomainError> {
    let model = todos_adapter::insert_todo(
        conn,
        todos_adapter::TodoCreate {
            title: todo.title,
            description: todo.description,
            priority: todo.priority.as_db(),
            status: todo.status.as_db(),
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        },
    )
    .await?;
    Todo::try_from(model)
}

/// Update all mutable columns plus `updated_at` by primary key.
///
/// Surfaces not-found when zero rows are affected; the write and the
/// existence check are one conditional statement.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    todo: Todo,
) -> Result<Todo, DomainError> {
    let model = todos_adapter::update_todo(
        conn,
        todos_adapter::TodoUpdate {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority.as_db(),
            status: todo.status.as_db(),
            updated_at: todo.updated_at,
        },
    )
    .await?;
    Todo::try_from(model)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Todo>, DomainError> {
    let model = todos_adapter::find_by_id(conn, id).await?;
    model.map(Todo::try_from).transpose()
}

/// Delete by primary key; returns the number of rows affected so callers can
/// distinguish a vanished row without a separate existence check.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, DomainError> {
    Ok(todos_adapter::delete_by_id(conn, id).await?)
}

/// Page query plus a structurally parallel COUNT under the same predicates.
///
/// `page` is 1-based; page 0 saturates to the first page. The two executions
/// are separate statements, both running on the caller's connection, so
/// inside a transaction they observe one snapshot.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: u64,
    page_size: u64,
    filter: TodoFilter,
) -> Result<TodoPage, DomainError> {
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let priority = filter.priority.map(|p| p.as_db());
    let status = filter.status.map(|s| s.as_db());

    let rows = todos_adapter::list(conn, offset, page_size, priority, status).await?;
    let total = todos_adapter::count(conn, priority, status).await?;

    let todos = rows
        .into_iter()
        .map(Todo::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TodoPage { todos, total })
}

// Conversion between the SeaORM model and the domain model

impl TryFrom<crate::entities::todos::Model> for Todo {
    type Error = DomainError;

    fn try_from(model: crate::entities::todos::Model) -> Result<Self, Self::Error> {
        let priority = Priority::from_db(model.priority, model.id)?;
        let status = Status::from_db(model.status, model.id)?;
        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
