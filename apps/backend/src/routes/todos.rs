//! Todo HTTP routes: request/response DTOs and handlers.
//!
//! Handlers translate the wire shapes onto the five use-case operations and
//! run each one inside a transaction on the shared pool.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::todos::{Priority, Status, Todo, TodoFilter};
use crate::services::todos as todos_service;
use crate::services::todos::{CreateTodo, ListTodos, UpdateTodo};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            status: todo.status,
            created_at: format_timestamp(todo.created_at),
            updated_at: format_timestamp(todo.updated_at),
        }
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<Status>,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    20
}

#[derive(Debug, Serialize)]
pub struct ListTodosResponse {
    pub todos: Vec<TodoResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

async fn create_todo(
    app_state: web::Data<AppState>,
    body: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    // Title is a caller convention, enforced at the transport boundary.
    if payload.title.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "title must not be empty",
        ));
    }

    let todo = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            todos_service::create_todo(
                txn,
                CreateTodo {
                    title: payload.title,
                    description: payload.description,
                    priority: payload.priority,
                },
            )
            .await
            .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

async fn get_todo(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let todo = with_txn(&app_state, move |txn| {
        Box::pin(async move { todos_service::get_todo(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn update_todo(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = body.into_inner();

    let todo = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            todos_service::update_todo(
                txn,
                id,
                UpdateTodo {
                    title: payload.title,
                    description: payload.description,
                    priority: payload.priority,
                    status: payload.status,
                },
            )
            .await
            .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn delete_todo(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            todos_service::delete_todo(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_todos(
    app_state: web::Data<AppState>,
    query: web::Query<ListTodosQuery>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let (page, page_size) = (params.page, params.page_size);

    let result = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            todos_service::list_todos(
                txn,
                ListTodos {
                    page,
                    page_size,
                    filter: TodoFilter {
                        priority: params.priority,
                        status: params.status,
                    },
                },
            )
            .await
            .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ListTodosResponse {
        todos: result.todos.into_iter().map(TodoResponse::from).collect(),
        total: result.total,
        page,
        page_size,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_todo))
            .route(web::get().to(list_todos)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_todo))
            .route(web::put().to(update_todo))
            .route(web::delete().to(delete_todo)),
    );
}
