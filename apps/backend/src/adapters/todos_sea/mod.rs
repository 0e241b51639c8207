//! SeaORM adapter for the todo repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::todos;

pub mod dto;

pub use dto::{TodoCreate, TodoUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError via From<DbErr>.

pub async fn insert_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let todo_active = todos::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        description: Set(dto.description),
        priority: Set(dto.priority),
        status: Set(dto.status),
        created_at: Set(dto.created_at),
        updated_at: Set(dto.updated_at),
    };

    todo_active.insert(conn).await
}

/// Conditional full-row update by primary key. Zero affected rows surfaces as
/// `DbErr::RecordNotFound` rather than silent success.
pub async fn update_todo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoUpdate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let todo_active = todos::ActiveModel {
        id: Set(dto.id),
        title: Set(dto.title),
        description: Set(dto.description),
        priority: Set(dto.priority),
        status: Set(dto.status),
        created_at: NotSet,
        updated_at: Set(dto.updated_at),
    };

    todo_active.update(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    todos::Entity::find_by_id(id).one(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = todos::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

fn apply_filters(
    query: Select<todos::Entity>,
    priority: Option<i32>,
    status: Option<i32>,
) -> Select<todos::Entity> {
    let query = match priority {
        Some(p) => query.filter(todos::Column::Priority.eq(p)),
        None => query,
    };
    match status {
        Some(s) => query.filter(todos::Column::Status.eq(s)),
        None => query,
    }
}

/// Page query: newest first, `LIMIT limit OFFSET offset`.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
    priority: Option<i32>,
    status: Option<i32>,
) -> Result<Vec<todos::Model>, sea_orm::DbErr> {
    apply_filters(todos::Entity::find(), priority, status)
        .order_by_desc(todos::Column::CreatedAt)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
}

/// Companion COUNT sharing the page query's predicates, never its pagination
/// clause.
pub async fn count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    priority: Option<i32>,
    status: Option<i32>,
) -> Result<u64, sea_orm::DbErr> {
    apply_filters(todos::Entity::find(), priority, status)
        .count(conn)
        .await
}
