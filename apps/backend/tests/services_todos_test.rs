mod common;

use std::time::Duration;

use time::macros::datetime;
use todo_backend::db::txn::with_txn;
use todo_backend::error::AppError;
use todo_backend::repos::todos::{self, NewTodo, Priority, Status, TodoFilter};
use todo_backend::services::todos::{self as todos_service, CreateTodo, ListTodos, UpdateTodo};

/// Test: creation forces Pending and stamps both timestamps from one clock
/// reading, whatever the caller supplies
#[tokio::test]
async fn test_create_forces_defaults() -> Result<(), AppError> {
    let state = common::test_state().await;

    let todo = todos_service::create_todo(
        state.db(),
        CreateTodo {
            title: "Buy milk".to_string(),
            description: None,
            priority: Some(Priority::High),
        },
    )
    .await?;

    assert!(todo.id > 0);
    assert_eq!(todo.status, Status::Pending);
    assert_eq!(todo.priority, Priority::High);
    assert_eq!(todo.created_at, todo.updated_at);

    Ok(())
}

/// Test: omitted priority defaults to Medium
#[tokio::test]
async fn test_create_defaults_priority_to_medium() -> Result<(), AppError> {
    let state = common::test_state().await;

    let todo = todos_service::create_todo(
        state.db(),
        CreateTodo {
            title: "No priority given".to_string(),
            description: None,
            priority: None,
        },
    )
    .await?;

    assert_eq!(todo.priority, Priority::Medium);

    Ok(())
}

/// Test: get returns the created record unchanged
#[tokio::test]
async fn test_get_roundtrip() -> Result<(), AppError> {
    let state = common::test_state().await;

    let created = todos_service::create_todo(
        state.db(),
        CreateTodo {
            title: "Read book".to_string(),
            description: Some("chapter 4".to_string()),
            priority: None,
        },
    )
    .await?;

    let fetched = todos_service::get_todo(state.db(), created.id).await?;
    assert_eq!(fetched, created);

    Ok(())
}

/// Test: get/update/delete on a nonexistent id all yield the domain
/// not-found kind, never a raw store error
#[tokio::test]
async fn test_not_found_propagation() {
    let state = common::test_state().await;
    let conn = state.db();

    let err = todos_service::get_todo(conn, 12345).await.unwrap_err();
    assert!(err.is_not_found(), "get: {err:?}");

    let err = todos_service::update_todo(conn, 12345, UpdateTodo::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "update: {err:?}");

    let err = todos_service::delete_todo(conn, 12345).await.unwrap_err();
    assert!(err.is_not_found(), "delete: {err:?}");
}

/// Test: update is a true partial merge; empty strings and omitted fields
/// keep stored values, and updated_at is refreshed
#[tokio::test]
async fn test_update_partial_merge() -> Result<(), AppError> {
    let state = common::test_state().await;
    let conn = state.db();

    let created = todos_service::create_todo(
        conn,
        CreateTodo {
            title: "A".to_string(),
            description: Some("B".to_string()),
            priority: Some(Priority::Low),
        },
    )
    .await?;

    // Make sure the refreshed updated_at lands strictly after creation.
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = todos_service::update_todo(
        conn,
        created.id,
        UpdateTodo {
            title: Some(String::new()),
            description: Some("C".to_string()),
            priority: None,
            status: None,
        },
    )
    .await?;

    assert_eq!(updated.title, "A");
    assert_eq!(updated.description.as_deref(), Some("C"));
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.status, Status::Pending);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    Ok(())
}

/// Test: explicit fields overwrite, including status transitions
#[tokio::test]
async fn test_update_overwrites_set_fields() -> Result<(), AppError> {
    let state = common::test_state().await;
    let conn = state.db();

    let created = todos_service::create_todo(
        conn,
        CreateTodo {
            title: "Start".to_string(),
            description: None,
            priority: None,
        },
    )
    .await?;

    let updated = todos_service::update_todo(
        conn,
        created.id,
        UpdateTodo {
            title: Some("Finish".to_string()),
            description: None,
            priority: Some(Priority::High),
            status: Some(Status::InProgress),
        },
    )
    .await?;

    assert_eq!(updated.title, "Finish");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.status, Status::InProgress);

    // The merge result is what got persisted.
    let fetched = todos_service::get_todo(conn, created.id).await?;
    assert_eq!(fetched, updated);

    Ok(())
}

/// Test: delete removes visibility
#[tokio::test]
async fn test_delete_removes_visibility() -> Result<(), AppError> {
    let state = common::test_state().await;
    let conn = state.db();

    let created = todos_service::create_todo(
        conn,
        CreateTodo {
            title: "Ephemeral".to_string(),
            description: None,
            priority: None,
        },
    )
    .await?;

    todos_service::delete_todo(conn, created.id).await?;

    let err = todos_service::get_todo(conn, created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(todos::find_by_id(conn, created.id).await?.is_none());

    Ok(())
}

/// Test: list passes filters straight through and reports the filtered total
#[tokio::test]
async fn test_list_filter_passthrough() -> Result<(), AppError> {
    let state = common::test_state().await;
    let conn = state.db();

    for (title, priority) in [
        ("low", Priority::Low),
        ("high-1", Priority::High),
        ("high-2", Priority::High),
    ] {
        todos_service::create_todo(
            conn,
            CreateTodo {
                title: title.to_string(),
                description: None,
                priority: Some(priority),
            },
        )
        .await?;
    }

    let page = todos_service::list_todos(
        conn,
        ListTodos {
            page: 1,
            page_size: 10,
            filter: TodoFilter {
                priority: Some(Priority::High),
                status: None,
            },
        },
    )
    .await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.todos.len(), 2);
    assert!(page.todos.iter().all(|t| t.priority == Priority::High));

    Ok(())
}

/// Test: pagination through the use-case layer returns the 3rd and 4th
/// newest records on page 2 of size 2
#[tokio::test]
async fn test_list_pagination() -> Result<(), AppError> {
    let state = common::test_state().await;
    let conn = state.db();

    // Seed through the repo so each record gets a distinct, known timestamp.
    for i in 0..5_i64 {
        let stamp = datetime!(2026-04-01 08:00 UTC) + time::Duration::minutes(i);
        todos::save(
            conn,
            NewTodo {
                title: format!("todo-{i}"),
                description: None,
                priority: Priority::Medium,
                status: Status::Pending,
                created_at: stamp,
                updated_at: stamp,
            },
        )
        .await?;
    }

    let page = todos_service::list_todos(
        conn,
        ListTodos {
            page: 2,
            page_size: 2,
            filter: TodoFilter::default(),
        },
    )
    .await?;

    assert_eq!(page.total, 5);
    let titles: Vec<&str> = page.todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["todo-2", "todo-1"]);

    Ok(())
}

/// Test: operations compose with the transaction helper; a failed closure
/// rolls the write back
#[tokio::test]
async fn test_with_txn_rolls_back_on_error() -> Result<(), AppError> {
    let state = common::test_state().await;

    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            todos_service::create_todo(
                txn,
                CreateTodo {
                    title: "Doomed".to_string(),
                    description: None,
                    priority: None,
                },
            )
            .await?;
            Err(AppError::internal("abort"))
        })
    })
    .await;
    assert!(result.is_err());

    let page = todos_service::list_todos(
        state.db(),
        ListTodos {
            page: 1,
            page_size: 10,
            filter: TodoFilter::default(),
        },
    )
    .await?;
    assert_eq!(page.total, 0);

    Ok(())
}
